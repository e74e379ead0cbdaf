//! Version triples and version constraints.
//!
//! Plugins carry a `major.minor.patch` version and may declare requirements
//! on other plugins as `<op><major>.<minor>[.<patch>]` constraint strings.
//! Versions are totally ordered by lexicographic comparison on the triple;
//! constraint satisfaction is a plain comparison under that order, with no
//! wildcard components.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DemesError, ParseError, Result};

/// An ordered `(major, minor, patch)` version triple.
///
/// The derived `Ord` is lexicographic on the fields in declaration order,
/// which is exactly the version order we want.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = DemesError;

    /// Parse `<major>.<minor>.<patch>` or the shorter `<major>.<minor>`
    /// form, where the missing patch component defaults to 0.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || DemesError::Parse(ParseError::VersionFormat(s.to_string()));

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(bad());
        }

        let mut components = [0u32; 3];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part.parse().map_err(|_| bad())?;
        }

        Ok(Version::new(components[0], components[1], components[2]))
    }
}

/// A version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionOp {
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
}

impl VersionOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            VersionOp::Less => "<",
            VersionOp::LessEqual => "<=",
            VersionOp::Equal => "=",
            VersionOp::GreaterEqual => ">=",
            VersionOp::Greater => ">",
        }
    }
}

impl fmt::Display for VersionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A version constraint: an operator plus a version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub op: VersionOp,
    pub version: Version,
}

impl Constraint {
    pub const fn new(op: VersionOp, version: Version) -> Self {
        Self { op, version }
    }

    /// Whether `candidate` satisfies this constraint under the total order.
    pub fn satisfied_by(&self, candidate: Version) -> bool {
        match self.op {
            VersionOp::Less => candidate < self.version,
            VersionOp::LessEqual => candidate <= self.version,
            VersionOp::Equal => candidate == self.version,
            VersionOp::GreaterEqual => candidate >= self.version,
            VersionOp::Greater => candidate > self.version,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl FromStr for Constraint {
    type Err = DemesError;

    /// Parse `<op><major>.<minor>[.<patch>]`.
    ///
    /// Two-character operators are matched before one-character ones so
    /// that `<` does not swallow the prefix of `<=`.
    fn from_str(s: &str) -> Result<Self> {
        const OPERATORS: [(&str, VersionOp); 5] = [
            ("<=", VersionOp::LessEqual),
            (">=", VersionOp::GreaterEqual),
            ("<", VersionOp::Less),
            (">", VersionOp::Greater),
            ("=", VersionOp::Equal),
        ];

        let s = s.trim();
        for (symbol, op) in OPERATORS {
            if let Some(rest) = s.strip_prefix(symbol) {
                let version = rest.trim().parse()?;
                return Ok(Constraint::new(op, version));
            }
        }

        Err(DemesError::Parse(ParseError::VersionOperator(s.to_string())))
    }
}
