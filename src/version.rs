//! Version components and the derived numeric build identifier.
//!
//! The four components are kept as the strings the operator typed, so they
//! are echoed verbatim into every output. Only the build number is computed,
//! and how it is computed depends on the selected [`BuildNumberStrategy`].

use crate::error::{Result, StampError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four user supplied parts of a version, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionComponents {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub material: String,
}

impl VersionComponents {
    /// Trims and validates the raw inputs. Every part must be a non-empty
    /// run of ASCII digits.
    pub fn new(major: &str, minor: &str, patch: &str, material: &str) -> Result<Self> {
        Ok(Self {
            major: numeric("Major version", major)?,
            minor: numeric("Minor version", minor)?,
            patch: numeric("Patch version", patch)?,
            material: numeric("Materialgram version", material)?,
        })
    }
}

pub(crate) fn numeric(field: &'static str, raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StampError::InvalidComponent { field, value: value.to_string() });
    }
    Ok(value.to_string())
}

/// Which formula turns the components into the build identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildNumberScheme {
    #[default]
    ZeroPadded,
    Arithmetic,
    Prefixed,
}

impl fmt::Display for BuildNumberScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildNumberScheme::ZeroPadded => "zero-padded",
            BuildNumberScheme::Arithmetic => "arithmetic",
            BuildNumberScheme::Prefixed => "prefixed",
        };
        f.write_str(name)
    }
}

/// A fully resolved derivation, ready to be applied to components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildNumberStrategy {
    /// `major` padded to 3 digits, `minor` to 3, `patch` to 2, then the
    /// materialgram version as typed.
    ZeroPadded,
    /// `major * 100` and `minor * 10` rendered in decimal, followed by
    /// `patch` and the materialgram version as typed.
    Arithmetic,
    /// A fixed prefix followed by an operator supplied suffix.
    Prefixed { prefix: String, suffix: String },
}

impl BuildNumberStrategy {
    pub fn derive(&self, components: &VersionComponents) -> Result<String> {
        match self {
            BuildNumberStrategy::ZeroPadded => Ok(format!(
                "{}{}{}{}",
                pad(&components.major, 3),
                pad(&components.minor, 3),
                pad(&components.patch, 2),
                components.material
            )),
            BuildNumberStrategy::Arithmetic => {
                let major = scaled(&components.major, 100)?;
                let minor = scaled(&components.minor, 10)?;
                Ok(format!("{}{}{}{}", major, minor, components.patch, components.material))
            }
            BuildNumberStrategy::Prefixed { prefix, suffix } => {
                Ok(format!("{}{}", prefix, suffix))
            }
        }
    }
}

// Left pad with zeros, never truncate.
fn pad(value: &str, width: usize) -> String {
    format!("{:0>width$}", value, width = width)
}

fn scaled(value: &str, factor: u64) -> Result<u64> {
    value
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(factor))
        .ok_or(StampError::BuildNumberOverflow)
}

/// Shorthand for `strategy.derive(components)`.
pub fn derive_build_number(
    components: &VersionComponents,
    strategy: &BuildNumberStrategy,
) -> Result<String> {
    strategy.derive(components)
}

/// Everything one run stamps into the artifacts. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    components: VersionComponents,
    build_number: String,
}

impl VersionSpec {
    pub fn new(components: VersionComponents, strategy: &BuildNumberStrategy) -> Result<Self> {
        let build_number = derive_build_number(&components, strategy)?;
        Ok(Self { components, build_number })
    }

    pub fn components(&self) -> &VersionComponents {
        &self.components
    }

    pub fn build_number(&self) -> &str {
        &self.build_number
    }

    /// `major.minor.patch.material`
    pub fn dotted(&self) -> String {
        let c = &self.components;
        format!("{}.{}.{}.{}", c.major, c.minor, c.patch, c.material)
    }

    /// `major,minor,patch,material`, the form used by `FILEVERSION` lines.
    pub fn comma_separated(&self) -> String {
        let c = &self.components;
        format!("{},{},{},{}", c.major, c.minor, c.patch, c.material)
    }

    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.components.major, self.components.minor)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}
