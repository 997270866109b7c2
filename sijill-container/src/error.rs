//! Error types for registry operations.
//!
//! Every failure names the type involved, and a missing registration
//! also lists what *is* registered under a similar name.

use std::fmt;

use sijill_support::rendering::render_path;

use crate::key::DependencyKey;

/// Main error type for all Sijill operations.
#[derive(Debug, thiserror::Error)]
pub enum SijillError {
    /// The requested type has no recipe (or no singleton) in the registry.
    #[error("{}", .0)]
    NotRegistered(NotRegisteredError),

    /// A constructor read past the end of its argument list.
    #[error(
        "{target} reads argument #{position}, but its recipe supplies only {supplied}"
    )]
    MissingArgument {
        target: DependencyKey,
        position: usize,
        supplied: usize,
    },

    /// A constructor read an argument as the wrong type.
    #[error("Argument #{position} of {target} is {found}, but the constructor expects {expected}")]
    ArgumentTypeMismatch {
        target: DependencyKey,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A constructor reported its own failure.
    #[error("Failed to construct {key}: {source}")]
    ConstructionFailed {
        key: DependencyKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored instance did not downcast to the requested type.
    #[error("Type mismatch while resolving {key}: expected {expected}")]
    TypeMismatch {
        key: DependencyKey,
        expected: &'static str,
    },
}

impl SijillError {
    /// Wraps a constructor's own failure for type `T`.
    ///
    /// ```
    /// use sijill_container::error::SijillError;
    ///
    /// struct Pool;
    /// let err = SijillError::construction::<Pool>("pool size must be positive");
    /// assert!(err.to_string().contains("pool size must be positive"));
    /// ```
    pub fn construction<T: ?Sized + 'static>(
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SijillError::ConstructionFailed {
            key: DependencyKey::of::<T>(),
            source: source.into(),
        }
    }

    /// Returns `true` for [`SijillError::NotRegistered`].
    pub fn is_not_registered(&self) -> bool {
        matches!(self, SijillError::NotRegistered(_))
    }
}

/// Error when a type was never registered.
#[derive(Debug)]
pub struct NotRegisteredError {
    /// The type that was requested
    pub requested: DependencyKey,
    /// The recipe that asked for it, if it was requested as a dependency
    pub required_by: Option<DependencyKey>,
    /// Recipes being built when the lookup failed, outermost first
    pub path: Vec<DependencyKey>,
    /// Registered types with a similar name
    pub suggestions: Vec<DependencyKey>,
}

impl fmt::Display for NotRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type not registered: {}", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.path.is_empty() {
            let mut names: Vec<String> = self.path.iter().map(DependencyKey::short_name).collect();
            names.push(self.requested.short_name());
            write!(f, "\n  Resolution path: {}", render_path(&names))?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: Did you forget to call .register::<{}>()?",
            self.requested.short_name()
        )
    }
}

/// Convenient Result type for Sijill operations.
pub type Result<T> = std::result::Result<T, SijillError>;
