//! Recipe arguments.
//!
//! An [`Arg`] is either a literal value, passed to the constructor as is,
//! or a reference to another injectable type, replaced by a resolved
//! instance when the recipe is built.
//!
//! Callables are values like any other: a closure stored with
//! [`Arg::value`] reaches the constructor untouched and can be called
//! there. Only [`Arg::inject`] asks the registry to resolve something.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::injectable::{ArgValue, ConstructorFn, Injectable, constructor_of};
use crate::key::DependencyKey;

/// One positional constructor argument in a recipe.
#[derive(Clone)]
pub enum Arg {
    /// Passed through unchanged.
    Value(Literal),
    /// Resolved against the registry at construction time.
    Inject(Dependency),
}

impl Arg {
    /// A literal argument.
    ///
    /// The value is shared by every construction that uses this recipe.
    pub fn value<V: Any + Send + Sync>(value: V) -> Self {
        Arg::Value(Literal(ArgValue {
            value: Arc::new(value),
            type_name: type_name::<V>(),
        }))
    }

    /// A literal argument that is already behind an `Arc`.
    ///
    /// The constructor reads it as `V`, not as `Arc<V>`.
    pub fn shared<V: Any + Send + Sync>(value: Arc<V>) -> Self {
        Arg::Value(Literal(ArgValue {
            value,
            type_name: type_name::<V>(),
        }))
    }

    /// A dependency on the injectable type `T`.
    pub fn inject<T: Injectable>() -> Self {
        Arg::Inject(Dependency {
            key: DependencyKey::of::<T>(),
            constructor: constructor_of::<T>(),
        })
    }

    /// Returns `true` for [`Arg::Inject`].
    pub fn is_dependency(&self) -> bool {
        matches!(self, Arg::Inject(_))
    }

    /// The referenced type, for [`Arg::Inject`].
    pub fn dependency_key(&self) -> Option<&DependencyKey> {
        match self {
            Arg::Inject(dep) => Some(&dep.key),
            Arg::Value(_) => None,
        }
    }

    /// Name of the argument's type (the value's, or the dependency's).
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Value(literal) => literal.0.type_name,
            Arg::Inject(dep) => dep.key.type_name(),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(_) => write!(f, "Value({})", self.type_name()),
            Arg::Inject(_) => write!(f, "Inject({})", self.type_name()),
        }
    }
}

/// A literal recipe argument.
#[derive(Clone)]
pub struct Literal(pub(crate) ArgValue);

/// A reference to an injectable type inside a recipe.
///
/// Carries the type's constructor so a permissive registry can build it
/// even when nothing was registered for it.
#[derive(Clone)]
pub struct Dependency {
    key: DependencyKey,
    constructor: ConstructorFn,
}

impl Dependency {
    /// The referenced type.
    pub fn key(&self) -> &DependencyKey {
        &self.key
    }

    pub(crate) fn constructor(&self) -> ConstructorFn {
        self.constructor
    }
}

/// Builds a `Vec<Arg>`.
///
/// `@Type` becomes [`Arg::inject`], any other expression becomes
/// [`Arg::value`].
///
/// ```
/// use sijill_container::prelude::*;
///
/// struct Clock;
/// impl Injectable for Clock {
///     fn construct(_: &mut Args) -> Result<Self> { Ok(Clock) }
/// }
///
/// let list = args![@Clock, 30u64, "utc"];
/// assert_eq!(list.len(), 3);
/// assert!(list[0].is_dependency());
/// assert!(!list[1].is_dependency());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::arg::Arg>::new()
    };
    ($($items:tt)+) => {
        $crate::__sijill_args!([] $($items)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sijill_args {
    ([$($done:expr),*]) => {
        ::std::vec![$($done),*]
    };
    ([$($done:expr),*] @ $ty:ty) => {
        ::std::vec![$($done,)* $crate::arg::Arg::inject::<$ty>()]
    };
    ([$($done:expr),*] @ $ty:ty , $($rest:tt)*) => {
        $crate::__sijill_args!([$($done,)* $crate::arg::Arg::inject::<$ty>()] $($rest)*)
    };
    ([$($done:expr),*] $value:expr) => {
        ::std::vec![$($done,)* $crate::arg::Arg::value($value)]
    };
    ([$($done:expr),*] $value:expr , $($rest:tt)*) => {
        $crate::__sijill_args!([$($done,)* $crate::arg::Arg::value($value)] $($rest)*)
    };
}
