//! The construction contract.
//!
//! A type becomes resolvable by implementing [`Injectable`]: given the
//! positional [`Args`] of its recipe (dependencies already substituted),
//! it builds itself. Implementing the trait is also what marks a type as
//! a dependency, as opposed to a plain value such as a callback.
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//! use sijill_container::prelude::*;
//!
//! struct Clock;
//!
//! impl Injectable for Clock {
//!     fn construct(_: &mut Args) -> Result<Self> {
//!         Ok(Clock)
//!     }
//! }
//!
//! struct Scheduler {
//!     clock: Arc<Clock>,
//!     workers: usize,
//! }
//!
//! impl Injectable for Scheduler {
//!     fn construct(args: &mut Args) -> Result<Self> {
//!         Ok(Scheduler {
//!             clock: args.next()?,
//!             workers: args.next_cloned()?,
//!         })
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!     .register::<Clock>(args![])
//!     .register::<Scheduler>(args![@Clock, 4usize]);
//!
//! let scheduler = registry.resolve::<Scheduler>().unwrap();
//! assert_eq!(scheduler.workers, 4);
//! ```

use std::any::{Any, type_name};
use std::sync::Arc;

use crate::error::{Result, SijillError};
use crate::key::DependencyKey;

/// A type-erased, shared instance as stored by the registry.
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// Type-erased constructor stored alongside a recipe.
pub(crate) type ConstructorFn = fn(&mut Args) -> Result<AnyInstance>;

/// A type the registry knows how to build.
///
/// Hand-written, or generated with `#[derive(Injectable)]` from the
/// `sijill` facade crate.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Builds `Self` from positional arguments.
    ///
    /// Errors returned here reach the caller of `resolve` unchanged.
    fn construct(args: &mut Args) -> Result<Self>;
}

pub(crate) fn constructor_of<T: Injectable>() -> ConstructorFn {
    construct_erased::<T>
}

fn construct_erased<T: Injectable>(args: &mut Args) -> Result<AnyInstance> {
    Ok(Arc::new(T::construct(args)?))
}

/// One substituted argument: the value plus the name of its type.
#[derive(Clone)]
pub(crate) struct ArgValue {
    pub value: AnyInstance,
    pub type_name: &'static str,
}

/// Positional arguments handed to [`Injectable::construct`].
///
/// Literal values from the recipe and resolved dependency instances sit
/// side by side, in recipe order. The `next*` accessors read them front
/// to back.
pub struct Args {
    target: DependencyKey,
    values: Vec<ArgValue>,
    cursor: usize,
}

impl Args {
    pub(crate) fn new(target: DependencyKey, values: Vec<ArgValue>) -> Self {
        Self { target, values, cursor: 0 }
    }

    /// The type being constructed.
    pub fn target(&self) -> &DependencyKey {
        &self.target
    }

    /// Total number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the recipe supplied no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the next argument `next*` will read.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of arguments not read yet.
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.cursor)
    }

    /// Reads the argument at `index` without moving the cursor.
    ///
    /// # Errors
    /// [`SijillError::MissingArgument`] past the end,
    /// [`SijillError::ArgumentTypeMismatch`] if it is not a `T`.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        let arg = self.values.get(index).ok_or(SijillError::MissingArgument {
            target: self.target,
            position: index,
            supplied: self.values.len(),
        })?;

        Arc::clone(&arg.value)
            .downcast::<T>()
            .map_err(|_| SijillError::ArgumentTypeMismatch {
                target: self.target,
                position: index,
                expected: type_name::<T>(),
                found: arg.type_name,
            })
    }

    /// Reads the next argument as a shared handle.
    ///
    /// Use this for injected dependencies: a singleton dependency comes
    /// back as the same `Arc` every time.
    pub fn next<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
        let value = self.get::<T>(self.cursor)?;
        self.cursor += 1;
        Ok(value)
    }

    /// Reads the next argument and clones it out.
    pub fn next_cloned<T: Clone + Any + Send + Sync>(&mut self) -> Result<T> {
        let value = self.next::<T>()?;
        Ok(T::clone(&value))
    }

    /// Reads the next argument, or returns `default` once the list is
    /// exhausted.
    ///
    /// A present argument of the wrong type is still an error.
    pub fn next_or<T: Clone + Any + Send + Sync>(&mut self, default: T) -> Result<T> {
        if self.remaining() == 0 {
            return Ok(default);
        }
        self.next_cloned()
    }

    /// Like [`Args::next_or`] with `T::default()`.
    pub fn next_or_default<T: Clone + Default + Any + Send + Sync>(&mut self) -> Result<T> {
        self.next_or(T::default())
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types: Vec<&str> = self.values.iter().map(|v| v.type_name).collect();
        f.debug_struct("Args")
            .field("target", &self.target)
            .field("values", &types)
            .field("cursor", &self.cursor)
            .finish()
    }
}
