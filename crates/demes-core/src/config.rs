//! The configuration-lookup capability consumed by the core.
//!
//! The engine does not parse configuration files itself; it consumes a
//! section/key string store through [`ConfigSource`] and defines the typed
//! accessors and their failure mode: a value that fails to parse is an
//! invalid-parameter error naming the section and key, never a silent
//! default.

use crate::error::{DemesError, Result};

/// Read-only section/key configuration lookup.
pub trait ConfigSource {
    /// The raw string value of `section.key`, if set.
    fn get(&self, section: &str, key: &str) -> Option<String>;

    fn get_str(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key)
            .unwrap_or_else(|| default.to_string())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64> {
        match self.get(section, key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| DemesError::invalid_parameter(section, key)),
        }
    }

    fn get_float(&self, section: &str, key: &str, default: f64) -> Result<f64> {
        match self.get(section, key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| DemesError::invalid_parameter(section, key)),
        }
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool> {
        match self.get(section, key) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(DemesError::invalid_parameter(section, key)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<(String, String), String>);

    impl MapConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                    .collect(),
            )
        }
    }

    impl ConfigSource for MapConfig {
        fn get(&self, section: &str, key: &str) -> Option<String> {
            self.0
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }
    }

    #[test]
    fn missing_keys_take_the_default() {
        let cfg = MapConfig::new(&[]);
        assert_eq!(cfg.get_int("s", "k", 42).unwrap(), 42);
        assert_eq!(cfg.get_str("s", "k", "fallback"), "fallback");
        assert!(cfg.get_bool("s", "k", true).unwrap());
    }

    #[test]
    fn present_keys_parse() {
        let cfg = MapConfig::new(&[("s", "n", " 7 "), ("s", "flag", "yes"), ("s", "rate", "0.25")]);
        assert_eq!(cfg.get_int("s", "n", 0).unwrap(), 7);
        assert!(cfg.get_bool("s", "flag", false).unwrap());
        assert_eq!(cfg.get_float("s", "rate", 0.0).unwrap(), 0.25);
    }

    #[test]
    fn unparseable_values_name_the_parameter() {
        let cfg = MapConfig::new(&[("experiment", "epochs", "many")]);
        let err = cfg.get_int("experiment", "epochs", 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter 'experiment.epochs'"
        );
    }
}
