//! Plugin descriptors, the plugin registry, and version resolution.
//!
//! Every loadable extension unit — Action, Cell, ResourceCell, or Topology —
//! is described by an immutable [`PluginDescriptor`] built once when the
//! plugin is discovered. The [`PluginRegistry`] indexes descriptors by
//! `(kind, name)` and resolves version constraints against them. The
//! registry is filled during a discovery phase and read-only afterwards.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DemesError, PluginError, Result};
use crate::version::{Constraint, Version};

/// The name plugins use to declare a requirement on the engine itself.
pub const ENGINE_NAME: &str = "demes";

/// The engine version requirements are checked against by default.
pub const ENGINE_VERSION: Version = Version::new(1, 0, 0);

/// The closed set of plugin kinds. Each kind has its own name namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginKind {
    Action,
    Cell,
    ResourceCell,
    Topology,
}

impl PluginKind {
    pub const ALL: [PluginKind; 4] = [
        PluginKind::Action,
        PluginKind::Cell,
        PluginKind::ResourceCell,
        PluginKind::Topology,
    ];
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PluginKind::Action => "Action",
            PluginKind::Cell => "Cell",
            PluginKind::ResourceCell => "ResourceCell",
            PluginKind::Topology => "Topology",
        };
        f.write_str(name)
    }
}

/// A dependency one plugin declares on another (or on the engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub constraint: Constraint,
}

impl Requirement {
    pub fn new(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }

    /// Parse a `"name <op>version"` requirement string.
    pub fn parse(name: impl Into<String>, constraint: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            constraint: constraint.parse()?,
        })
    }
}

/// Immutable description of one discovered plugin version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub kind: PluginKind,
    pub version: Version,
    /// Direct dependencies, checked one level deep at registration.
    pub requirements: Vec<Requirement>,
    pub description: String,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, kind: PluginKind, version: Version) -> Self {
        Self {
            name: name.into(),
            kind,
            version,
            requirements: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }
}

/// The registry of discovered plugins.
///
/// A `(kind, name)` key may hold several descriptors — one per registered
/// version. No two descriptors under one key share a version triple.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    engine_version: Version,
    plugins: HashMap<(PluginKind, String), Vec<PluginDescriptor>>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::with_engine_version(ENGINE_VERSION)
    }

    /// A registry that checks engine requirements against `version` instead
    /// of [`ENGINE_VERSION`]. Used by tests and embedders.
    pub fn with_engine_version(version: Version) -> Self {
        Self {
            engine_version: version,
            plugins: HashMap::new(),
        }
    }

    pub fn engine_version(&self) -> Version {
        self.engine_version
    }

    /// Insert a descriptor. Registering the same `(kind, name, version)`
    /// twice is an error.
    pub fn register(&mut self, descriptor: PluginDescriptor) -> Result<()> {
        let key = (descriptor.kind, descriptor.name.clone());
        let entries = self.plugins.entry(key).or_default();
        if entries.iter().any(|d| d.version == descriptor.version) {
            return Err(DemesError::Plugin(PluginError::DuplicateVersion {
                kind: descriptor.kind,
                name: descriptor.name,
                version: descriptor.version,
            }));
        }
        entries.push(descriptor);
        Ok(())
    }

    /// Iterate every registered descriptor, in no particular order.
    pub fn descriptors(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.values().flatten()
    }

    /// All registered versions of `(kind, name)`, or the kind-specific
    /// not-found error if there are none.
    pub fn find(&self, kind: PluginKind, name: &str) -> Result<&[PluginDescriptor]> {
        self.plugins
            .get(&(kind, name.to_string()))
            .map(Vec::as_slice)
            .ok_or_else(|| DemesError::plugin_not_found(kind, name))
    }

    /// Resolve `(kind, name)` to one descriptor.
    ///
    /// Without a constraint, the highest registered version wins. With one,
    /// the highest version satisfying it wins; if none does, the failure
    /// carries the requested name and constraint.
    pub fn resolve(
        &self,
        kind: PluginKind,
        name: &str,
        constraint: Option<&Constraint>,
    ) -> Result<&PluginDescriptor> {
        let candidates = self.find(kind, name)?;
        let best = candidates
            .iter()
            .filter(|d| constraint.map_or(true, |c| c.satisfied_by(d.version)))
            .max_by_key(|d| d.version);

        match (best, constraint) {
            (Some(descriptor), _) => Ok(descriptor),
            // find() guarantees at least one candidate, so reaching here
            // means a constraint filtered everything out.
            (None, Some(c)) => Err(DemesError::version_not_found(name, *c)),
            (None, None) => Err(DemesError::plugin_not_found(kind, name)),
        }
    }

    /// Validate a descriptor's requirements against the registry.
    ///
    /// Checking is fail-fast: the first unmet requirement aborts the whole
    /// check and its failure is surfaced unchanged. Requirements are
    /// validated one level deep — against what is registered now, not
    /// against a closure of nested requirements. A requirement named
    /// [`ENGINE_NAME`] is checked against the engine version instead.
    pub fn check_requirements(&self, descriptor: &PluginDescriptor) -> Result<()> {
        for requirement in &descriptor.requirements {
            if requirement.name == ENGINE_NAME {
                if !requirement.constraint.satisfied_by(self.engine_version) {
                    return Err(DemesError::Plugin(PluginError::EngineVersion {
                        constraint: requirement.constraint,
                    }));
                }
                continue;
            }
            self.resolve_requirement(descriptor.kind, requirement)?;
        }
        Ok(())
    }

    /// Resolve a requirement by name across kind namespaces.
    ///
    /// Requirements name a plugin without naming its kind. The declaring
    /// plugin's own kind is tried first, then the remaining kinds. A name
    /// registered nowhere is a generic plugin-not-found; a name that exists
    /// but has no satisfying version is a version-not-found.
    fn resolve_requirement(
        &self,
        own_kind: PluginKind,
        requirement: &Requirement,
    ) -> Result<&PluginDescriptor> {
        let mut name_exists = false;
        let kinds = std::iter::once(own_kind)
            .chain(PluginKind::ALL.into_iter().filter(move |k| *k != own_kind));

        for kind in kinds {
            match self.resolve(kind, &requirement.name, Some(&requirement.constraint)) {
                Ok(descriptor) => return Ok(descriptor),
                Err(DemesError::Plugin(PluginError::VersionNotFound { .. })) => {
                    name_exists = true;
                }
                Err(_) => {}
            }
        }

        if name_exists {
            Err(DemesError::version_not_found(
                &requirement.name,
                requirement.constraint,
            ))
        } else {
            Err(DemesError::Plugin(PluginError::NotFound(
                requirement.name.clone(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionOp;

    fn descriptor(name: &str, kind: PluginKind, version: Version) -> PluginDescriptor {
        PluginDescriptor::new(name, kind, version)
    }

    fn registry_with_x_versions() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        for version in [
            Version::new(1, 0, 0),
            Version::new(1, 2, 0),
            Version::new(2, 0, 0),
        ] {
            registry
                .register(descriptor("X", PluginKind::Cell, version))
                .unwrap();
        }
        registry
    }

    #[test]
    fn resolve_without_constraint_returns_highest() {
        let registry = registry_with_x_versions();
        let d = registry.resolve(PluginKind::Cell, "X", None).unwrap();
        assert_eq!(d.version, Version::new(2, 0, 0));
    }

    #[test]
    fn resolve_returns_highest_satisfying() {
        let registry = registry_with_x_versions();

        let c: Constraint = ">=1.1".parse().unwrap();
        let d = registry.resolve(PluginKind::Cell, "X", Some(&c)).unwrap();
        assert_eq!(d.version, Version::new(2, 0, 0));

        let c: Constraint = "=1.2.0".parse().unwrap();
        let d = registry.resolve(PluginKind::Cell, "X", Some(&c)).unwrap();
        assert_eq!(d.version, Version::new(1, 2, 0));
    }

    #[test]
    fn resolve_fails_with_version_not_found() {
        let registry = registry_with_x_versions();
        let c: Constraint = ">3.0".parse().unwrap();
        match registry.resolve(PluginKind::Cell, "X", Some(&c)) {
            Err(DemesError::Plugin(PluginError::VersionNotFound { name, constraint })) => {
                assert_eq!(name, "X");
                assert_eq!(constraint, c);
            }
            other => panic!("expected version-not-found, got {:?}", other),
        }
    }

    #[test]
    fn find_errors_are_kind_specific() {
        let registry = PluginRegistry::new();
        let cases = [
            (PluginKind::Action, "Action 'missing' not found"),
            (PluginKind::Cell, "Cell plugin 'missing' not found"),
            (PluginKind::ResourceCell, "ResourceCell 'missing' not found"),
            (PluginKind::Topology, "Topology type 'missing' not found"),
        ];
        for (kind, message) in cases {
            let err = registry.find(kind, "missing").unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn duplicate_version_is_rejected() {
        let mut registry = PluginRegistry::new();
        let d = descriptor("X", PluginKind::Cell, Version::new(1, 0, 0));
        registry.register(d.clone()).unwrap();
        assert!(matches!(
            registry.register(d),
            Err(DemesError::Plugin(PluginError::DuplicateVersion { .. }))
        ));
        // Same name and version under a different kind is a separate namespace
        registry
            .register(descriptor("X", PluginKind::Action, Version::new(1, 0, 0)))
            .unwrap();
    }

    #[test]
    fn requirement_check_is_fail_fast() {
        let mut registry = PluginRegistry::new();
        registry
            .register(descriptor("A", PluginKind::Cell, Version::new(1, 0, 0)))
            .unwrap();
        registry
            .register(descriptor("B", PluginKind::Cell, Version::new(1, 5, 0)))
            .unwrap();

        // A>=2.0 is unmet, B>=1.0 is met; only the A violation surfaces.
        let plugin = descriptor("P", PluginKind::Action, Version::new(1, 0, 0))
            .with_requirement(Requirement::parse("A", ">=2.0").unwrap())
            .with_requirement(Requirement::parse("B", ">=1.0").unwrap());

        match registry.check_requirements(&plugin) {
            Err(DemesError::Plugin(PluginError::VersionNotFound { name, .. })) => {
                assert_eq!(name, "A");
            }
            other => panic!("expected A's violation, got {:?}", other),
        }
    }

    #[test]
    fn requirement_check_passes_when_all_met() {
        let mut registry = PluginRegistry::new();
        registry
            .register(descriptor("A", PluginKind::Cell, Version::new(2, 1, 0)))
            .unwrap();

        let plugin = descriptor("P", PluginKind::Action, Version::new(1, 0, 0))
            .with_requirement(Requirement::parse("A", ">=2.0").unwrap());
        registry.check_requirements(&plugin).unwrap();
    }

    #[test]
    fn missing_requirement_is_generic_not_found() {
        let registry = PluginRegistry::new();
        let plugin = descriptor("P", PluginKind::Action, Version::new(1, 0, 0))
            .with_requirement(Requirement::parse("Ghost", ">=1.0").unwrap());
        match registry.check_requirements(&plugin) {
            Err(DemesError::Plugin(PluginError::NotFound(name))) => assert_eq!(name, "Ghost"),
            other => panic!("expected generic not-found, got {:?}", other),
        }
    }

    #[test]
    fn engine_requirement_checks_engine_version() {
        let registry = PluginRegistry::with_engine_version(Version::new(1, 0, 0));

        let ok = descriptor("P", PluginKind::Action, Version::new(1, 0, 0))
            .with_requirement(Requirement::parse(ENGINE_NAME, ">=1.0").unwrap());
        registry.check_requirements(&ok).unwrap();

        let unmet = descriptor("Q", PluginKind::Action, Version::new(1, 0, 0))
            .with_requirement(Requirement::parse(ENGINE_NAME, ">=2.0").unwrap());
        match registry.check_requirements(&unmet) {
            Err(DemesError::Plugin(PluginError::EngineVersion { constraint })) => {
                assert_eq!(constraint.to_string(), ">=2.0.0");
            }
            other => panic!("expected engine-version error, got {:?}", other),
        }
    }

    #[test]
    fn requirement_prefers_any_kind_registration() {
        // A requirement names a plugin, not a kind: a Topology-registered
        // dependency satisfies an Action's requirement.
        let mut registry = PluginRegistry::new();
        registry
            .register(descriptor("grid", PluginKind::Topology, Version::new(1, 0, 0)))
            .unwrap();
        let plugin = descriptor("P", PluginKind::Action, Version::new(1, 0, 0))
            .with_requirement(Requirement::parse("grid", ">=1.0").unwrap());
        registry.check_requirements(&plugin).unwrap();
    }
}
