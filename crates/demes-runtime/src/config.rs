//! Experiment configuration.
//!
//! Configuration files are TOML: one table per section, scalar values only.
//! Actions read their parameters from the section named after them, so the
//! store keeps every value as a string and lets the typed accessors on
//! [`ConfigSource`] do the parsing (and the complaining).

use std::collections::BTreeMap;
use std::path::Path;

use demes_core::config::ConfigSource;
use demes_core::error::{ConfigError, DemesError, Result};

/// Section/key/value configuration store backing an experiment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let value: toml::Value = content
            .parse()
            .map_err(|e: toml::de::Error| DemesError::Config(ConfigError::Malformed(e.to_string())))?;

        let table = value.as_table().ok_or_else(|| {
            DemesError::Config(ConfigError::Malformed(
                "top level must be a table of sections".to_string(),
            ))
        })?;

        let mut config = Config::new();
        for (section, entry) in table {
            let section_table = entry.as_table().ok_or_else(|| {
                DemesError::Config(ConfigError::Malformed(format!(
                    "'{}' must be a [section], not a bare value",
                    section
                )))
            })?;
            for (key, raw) in section_table {
                let rendered = scalar_to_string(raw).ok_or_else(|| {
                    DemesError::Config(ConfigError::Malformed(format!(
                        "'{}.{}' must be a scalar value",
                        section, key
                    )))
                })?;
                config.set(section, key, rendered);
            }
        }
        Ok(config)
    }

    /// Set a value programmatically (used by tests and the CLI overrides).
    pub fn set(&mut self, section: &str, key: &str, value: impl ToString) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

impl ConfigSource for Config {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section)?.get(key).cloned()
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(x) => Some(x.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_and_scalars() {
        let config = Config::from_toml_str(
            r#"
            [experiment]
            epochs = 100
            topology = "lattice"

            [type_clusters]
            frequency = 2
            header = true
            "#,
        )
        .unwrap();

        assert_eq!(config.get_int("experiment", "epochs", -1).unwrap(), 100);
        assert_eq!(config.get_str("experiment", "topology", ""), "lattice");
        assert_eq!(config.get_int("type_clusters", "frequency", 1).unwrap(), 2);
        assert!(config.get_bool("type_clusters", "header", false).unwrap());
        assert!(config.has_section("type_clusters"));
        assert!(!config.has_section("missing"));
    }

    #[test]
    fn rejects_non_table_sections() {
        assert!(matches!(
            Config::from_toml_str("epochs = 100"),
            Err(DemesError::Config(ConfigError::Malformed(_)))
        ));
    }

    #[test]
    fn rejects_nested_tables() {
        let result = Config::from_toml_str(
            r#"
            [experiment]
            nested = { a = 1 }
            "#,
        );
        assert!(matches!(
            result,
            Err(DemesError::Config(ConfigError::Malformed(_)))
        ));
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = Config::from_toml_str("[experiment]\n").unwrap();
        assert_eq!(config.get_int("experiment", "epochs", -1).unwrap(), -1);
    }
}
