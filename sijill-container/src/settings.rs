//! Registry configuration.
//!
//! A registry runs under exactly one [`Policy`] for its whole life:
//! - [`Policy::Strict`] — a missing registration is an error
//! - [`Policy::Permissive`] — a missing registration falls back to an
//!   empty argument list
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a registry treats types it has no recipe for.
///
/// # Examples
/// ```
/// use sijill_container::settings::Policy;
///
/// let policy: Policy = "permissive".parse().unwrap();
/// assert!(policy.is_permissive());
/// assert_eq!(Policy::default(), Policy::Strict);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Missing registrations fail with `NotRegistered`.
    ///
    /// - `resolve` of an unregistered type fails
    /// - `append_args` on a missing recipe fails
    /// - `delete` / `delete_singleton` of a missing entry fails
    #[default]
    Strict,

    /// Missing registrations are treated as empty recipes.
    ///
    /// - `resolve` of an unregistered type builds it from zero arguments
    /// - `append_args` on a missing recipe creates it
    /// - `delete` / `delete_singleton` of a missing entry is a no-op
    Permissive,
}

impl Policy {
    /// Returns `true` for [`Policy::Strict`].
    #[inline]
    pub fn is_strict(&self) -> bool {
        matches!(self, Policy::Strict)
    }

    /// Returns `true` for [`Policy::Permissive`].
    #[inline]
    pub fn is_permissive(&self) -> bool {
        matches!(self, Policy::Permissive)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Strict => write!(f, "strict"),
            Policy::Permissive => write!(f, "permissive"),
        }
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown registry policy {0:?}, expected \"strict\" or \"permissive\"")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Policy::Strict),
            "permissive" => Ok(Policy::Permissive),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Settings a [`Registry`](crate::registry::Registry) is created with.
///
/// Deserializable so hosts can keep it in their own configuration files;
/// missing fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Missing-registration policy.
    pub policy: Policy,
}

impl RegistrySettings {
    /// Settings with the given policy.
    pub fn with_policy(policy: Policy) -> Self {
        Self { policy }
    }
}
