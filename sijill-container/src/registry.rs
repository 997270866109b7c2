//! # The Registry — heart of Sijill
//!
//! Maps type identities to recipes or to prebuilt singletons, and
//! resolves types by recursively building their recipes.
//!
//! # Resolution
//! ```text
//! resolve::<T>()
//!    │
//!    ├── singleton for T?  ──yes──>  same Arc every call
//!    │
//!    ├── recipe for T?     ──yes──>  substitute @deps (recursively),
//!    │                               T::construct(args), fresh every call
//!    │
//!    └── neither           ──────>  Strict: NotRegistered
//!                                   Permissive: T::construct(empty args)
//! ```
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use sijill_container::prelude::*;
//!
//! struct Config {
//!     relay: String,
//! }
//!
//! impl Injectable for Config {
//!     fn construct(args: &mut Args) -> Result<Self> {
//!         Ok(Config { relay: args.next_cloned()? })
//!     }
//! }
//!
//! struct Mailer {
//!     config: Arc<Config>,
//! }
//!
//! impl Injectable for Mailer {
//!     fn construct(args: &mut Args) -> Result<Self> {
//!         Ok(Mailer { config: args.next()? })
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!     .register_singleton::<Config>(args![String::from("smtp.local")])
//!     .expect("config builds")
//!     .register::<Mailer>(args![@Config]);
//!
//! let mailer = registry.resolve::<Mailer>().expect("mailer resolves");
//! assert_eq!(mailer.config.relay, "smtp.local");
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sijill_support::rendering::suggest_similar;
use tracing::{debug, instrument, trace};

use crate::arg::Arg;
use crate::error::{NotRegisteredError, Result, SijillError};
use crate::injectable::{AnyInstance, ArgValue, Args, ConstructorFn, Injectable, constructor_of};
use crate::key::DependencyKey;
use crate::recipe::Recipe;
use crate::settings::{Policy, RegistrySettings};

const MAX_SUGGESTIONS: usize = 3;

// ============================================================
// RegistryBuilder
// ============================================================

/// Configures a [`Registry`] before it is created.
///
/// # Examples
/// ```rust
/// use sijill_container::prelude::*;
///
/// let registry = Registry::builder().policy(Policy::Permissive).build();
/// assert!(registry.policy().is_permissive());
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    settings: RegistrySettings,
}

impl RegistryBuilder {
    /// Sets the missing-registration policy.
    pub fn policy(mut self, policy: Policy) -> Self {
        self.settings.policy = policy;
        self
    }

    /// Replaces all settings at once.
    pub fn settings(mut self, settings: RegistrySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Creates the empty registry.
    pub fn build(self) -> Registry {
        Registry::with_settings(self.settings)
    }
}

// ═══════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════

/// Recipe and singleton tables plus the resolver.
///
/// Registration methods take `&mut self` and return `&mut Self` (or
/// `Result<&mut Self>` when they can fail) so calls chain.
pub struct Registry {
    recipes: HashMap<DependencyKey, Recipe>,
    singletons: HashMap<DependencyKey, AnyInstance>,
    settings: RegistrySettings,
}

impl Registry {
    /// Creates an empty strict registry.
    pub fn new() -> Self {
        Self::with_settings(RegistrySettings::default())
    }

    /// Creates an empty permissive registry.
    pub fn permissive() -> Self {
        Self::with_settings(RegistrySettings::with_policy(Policy::Permissive))
    }

    /// Creates an empty registry with the given settings.
    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            recipes: HashMap::new(),
            singletons: HashMap::new(),
            settings,
        }
    }

    /// Create a new builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The settings this registry was created with.
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// The missing-registration policy.
    pub fn policy(&self) -> Policy {
        self.settings.policy
    }

    // ── Registration ──

    /// Stores `args` as the recipe for `T`, replacing any previous one.
    ///
    /// Nothing is constructed until `T` is resolved.
    pub fn register<T: Injectable>(&mut self, args: impl IntoIterator<Item = Arg>) -> &mut Self {
        let recipe = Recipe::new::<T>(args.into_iter().collect());
        debug!(key = %recipe.key(), args = recipe.len(), "Registered recipe");
        self.recipes.insert(*recipe.key(), recipe);
        self
    }

    /// Builds `T` right away and binds the instance as its singleton.
    ///
    /// Dependencies in `args` are resolved against the registry as it is
    /// now; registering them differently later does not rebuild `T`.
    ///
    /// # Errors
    /// Whatever resolving the dependencies or `T::construct` returns.
    pub fn register_singleton<T: Injectable>(
        &mut self,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        let recipe = Recipe::new::<T>(args.into_iter().collect());
        let instance = self.build(&recipe, &mut Vec::new())?;
        debug!(key = %recipe.key(), "Registered singleton");
        self.singletons.insert(*recipe.key(), instance);
        Ok(self)
    }

    /// Binds an already built value as the singleton for `T`.
    pub fn register_instance<T: Injectable>(&mut self, instance: T) -> &mut Self {
        self.register_shared(Arc::new(instance))
    }

    /// Binds an already shared value as the singleton for `T`.
    pub fn register_shared<T: Injectable>(&mut self, instance: Arc<T>) -> &mut Self {
        let key = DependencyKey::of::<T>();
        debug!(key = %key, "Registered singleton instance");
        self.singletons.insert(key, instance);
        self
    }

    /// Appends `args` to the end of `T`'s recipe.
    ///
    /// # Errors
    /// [`SijillError::NotRegistered`] if `T` has no recipe, under
    /// [`Policy::Strict`]. A permissive registry creates the recipe.
    pub fn append_args<T: Injectable>(
        &mut self,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        let key = DependencyKey::of::<T>();

        match self.recipes.get_mut(&key) {
            Some(recipe) => {
                recipe.extend(args);
                debug!(key = %key, args = recipe.len(), "Appended recipe arguments");
            }
            None if self.settings.policy.is_permissive() => {
                debug!(key = %key, "No recipe to append to, creating one");
                self.register::<T>(args);
            }
            None => return Err(self.not_registered(&key, &[])),
        }

        Ok(self)
    }

    /// Replaces `T`'s recipe arguments, creating the recipe if needed.
    pub fn replace_args<T: Injectable>(&mut self, args: impl IntoIterator<Item = Arg>) -> &mut Self {
        let key = DependencyKey::of::<T>();

        match self.recipes.get_mut(&key) {
            Some(recipe) => {
                recipe.replace(args.into_iter().collect());
                debug!(key = %key, args = recipe.len(), "Replaced recipe arguments");
                self
            }
            None => self.register::<T>(args),
        }
    }

    // ── Resolution ──

    /// Resolves an instance of `T`.
    ///
    /// A singleton comes back as the same `Arc` every call; a recipe is
    /// built fresh every call.
    ///
    /// ```rust,ignore
    /// let mailer: Arc<Mailer> = registry.resolve()?;
    /// ```
    ///
    /// # Errors
    /// - [`SijillError::NotRegistered`] for `T` or any of its
    ///   dependencies, under [`Policy::Strict`]
    /// - argument errors and constructor errors, unchanged
    #[instrument(level = "trace", skip(self), fields(key = type_name::<T>()))]
    pub fn resolve<T: Injectable>(&self) -> Result<Arc<T>> {
        let key = DependencyKey::of::<T>();
        let instance = self.resolve_or_construct(&key, Some(constructor_of::<T>()), &mut Vec::new())?;

        instance.downcast::<T>().map_err(|_| SijillError::TypeMismatch {
            key,
            expected: type_name::<T>(),
        })
    }

    /// Type-erased resolution by key.
    ///
    /// Without a type there is no constructor to fall back to, so a key
    /// with neither singleton nor recipe is `NotRegistered` under both
    /// policies.
    pub fn resolve_key(&self, key: &DependencyKey) -> Result<AnyInstance> {
        self.resolve_or_construct(key, None, &mut Vec::new())
    }

    fn resolve_or_construct(
        &self,
        key: &DependencyKey,
        fallback: Option<ConstructorFn>,
        path: &mut Vec<DependencyKey>,
    ) -> Result<AnyInstance> {
        if let Some(instance) = self.singletons.get(key) {
            trace!(key = %key, "Resolved singleton");
            return Ok(Arc::clone(instance));
        }

        if let Some(recipe) = self.recipes.get(key) {
            return self.build(recipe, path);
        }

        match fallback {
            Some(constructor) if self.settings.policy.is_permissive() => {
                debug!(key = %key, "Not registered, constructing from no arguments");
                constructor(&mut Args::new(*key, Vec::new()))
            }
            _ => Err(self.not_registered(key, path)),
        }
    }

    /// Substitutes dependencies into the recipe and runs its constructor.
    fn build(&self, recipe: &Recipe, path: &mut Vec<DependencyKey>) -> Result<AnyInstance> {
        trace!(key = %recipe.key(), args = recipe.len(), "Building recipe");
        path.push(*recipe.key());

        let mut values = Vec::with_capacity(recipe.len());
        for arg in recipe.args() {
            let value = match arg {
                Arg::Value(literal) => literal.0.clone(),
                Arg::Inject(dependency) => {
                    let key = dependency.key();
                    trace!(key = %key, parent = %recipe.key(), "Injecting dependency");
                    ArgValue {
                        value: self.resolve_or_construct(key, Some(dependency.constructor()), path)?,
                        type_name: key.type_name(),
                    }
                }
            };
            values.push(value);
        }

        path.pop();
        (recipe.constructor())(&mut Args::new(*recipe.key(), values))
    }

    // ── Removal ──

    /// Removes `T`'s recipe.
    ///
    /// # Errors
    /// [`SijillError::NotRegistered`] if there is none, under
    /// [`Policy::Strict`].
    pub fn delete<T: Injectable>(&mut self) -> Result<&mut Self> {
        let key = DependencyKey::of::<T>();
        if self.recipes.remove(&key).is_some() {
            debug!(key = %key, "Deleted recipe");
        } else if self.settings.policy.is_strict() {
            return Err(self.not_registered(&key, &[]));
        }
        Ok(self)
    }

    /// Removes `T`'s singleton binding.
    ///
    /// # Errors
    /// [`SijillError::NotRegistered`] if there is none, under
    /// [`Policy::Strict`].
    pub fn delete_singleton<T: Injectable>(&mut self) -> Result<&mut Self> {
        let key = DependencyKey::of::<T>();
        if self.singletons.remove(&key).is_some() {
            debug!(key = %key, "Deleted singleton");
        } else if self.settings.policy.is_strict() {
            return Err(self.not_registered(&key, &[]));
        }
        Ok(self)
    }

    /// Drops every recipe and singleton.
    pub fn clear(&mut self) {
        debug!(
            recipes = self.recipes.len(),
            singletons = self.singletons.len(),
            "Cleared registry"
        );
        self.recipes.clear();
        self.singletons.clear();
    }

    // ── Queries ──

    /// Returns `true` if `T` has a recipe.
    pub fn has<T: Injectable>(&self) -> bool {
        self.has_key(&DependencyKey::of::<T>())
    }

    /// Returns `true` if `T` has a singleton binding.
    pub fn has_singleton<T: Injectable>(&self) -> bool {
        self.has_singleton_key(&DependencyKey::of::<T>())
    }

    /// Returns `true` if `key` has a recipe.
    pub fn has_key(&self, key: &DependencyKey) -> bool {
        self.recipes.contains_key(key)
    }

    /// Returns `true` if `key` has a singleton binding.
    pub fn has_singleton_key(&self, key: &DependencyKey) -> bool {
        self.singletons.contains_key(key)
    }

    /// The current recipe for `T`, if any.
    pub fn recipe<T: Injectable>(&self) -> Option<&Recipe> {
        self.recipes.get(&DependencyKey::of::<T>())
    }

    /// Number of distinct registered types.
    pub fn len(&self) -> usize {
        let bare_singletons = self
            .singletons
            .keys()
            .filter(|key| !self.recipes.contains_key(key))
            .count();
        self.recipes.len() + bare_singletons
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty() && self.singletons.is_empty()
    }

    /// Every type with a recipe or a singleton, each listed once, sorted
    /// by type name.
    pub fn registered_keys(&self) -> Vec<DependencyKey> {
        let mut keys: Vec<DependencyKey> = self.singletons.keys().copied().collect();
        keys.extend(
            self.recipes
                .keys()
                .filter(|key| !self.singletons.contains_key(key))
                .copied(),
        );
        keys.sort_by_key(|key| key.type_name());
        keys
    }

    fn not_registered(&self, key: &DependencyKey, path: &[DependencyKey]) -> SijillError {
        let registered = self.registered_keys();
        let names: Vec<&str> = registered.iter().map(DependencyKey::type_name).collect();
        let suggestions = suggest_similar(key.type_name(), &names, MAX_SUGGESTIONS)
            .iter()
            .filter_map(|name| registered.iter().find(|k| k.type_name() == name.as_str()).copied())
            .collect();

        SijillError::NotRegistered(NotRegisteredError {
            requested: *key,
            required_by: path.last().copied(),
            path: path.to_vec(),
            suggestions,
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("policy", &self.settings.policy)
            .field("recipes", &self.recipes.len())
            .field("singletons", &self.singletons.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Registry, RegistryBuilder};
    pub use crate::arg::Arg;
    pub use crate::args;
    pub use crate::error::{Result, SijillError};
    pub use crate::injectable::{Args, Injectable};
    pub use crate::key::DependencyKey;
    pub use crate::settings::{Policy, RegistrySettings};
    pub use crate::shared::SharedRegistry;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
