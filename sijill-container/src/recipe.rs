//! Recipes — how to build one registered type.

use std::fmt;

use crate::arg::Arg;
use crate::injectable::{ConstructorFn, Injectable, constructor_of};
use crate::key::DependencyKey;

/// The stored construction recipe for one type.
///
/// Holds the ordered constructor arguments and the type's erased
/// constructor. Arguments can be appended or replaced after
/// registration; construction always reads the current list.
#[derive(Clone)]
pub struct Recipe {
    key: DependencyKey,
    args: Vec<Arg>,
    constructor: ConstructorFn,
}

impl Recipe {
    pub(crate) fn new<T: Injectable>(args: Vec<Arg>) -> Self {
        Self {
            key: DependencyKey::of::<T>(),
            args,
            constructor: constructor_of::<T>(),
        }
    }

    /// The type this recipe builds.
    pub fn key(&self) -> &DependencyKey {
        &self.key
    }

    /// The arguments, in constructor order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` if the recipe has no arguments.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Keys of the injected dependencies, in order.
    pub fn dependencies(&self) -> Vec<DependencyKey> {
        self.args.iter().filter_map(Arg::dependency_key).copied().collect()
    }

    pub(crate) fn constructor(&self) -> ConstructorFn {
        self.constructor
    }

    pub(crate) fn extend(&mut self, args: impl IntoIterator<Item = Arg>) {
        self.args.extend(args);
    }

    pub(crate) fn replace(&mut self, args: Vec<Arg>) {
        self.args = args;
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("key", &self.key)
            .field("args", &self.args)
            .finish()
    }
}
