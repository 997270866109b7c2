//! A lock-guarded registry handle for multi-threaded hosts.
//!
//! [`Registry`] itself relies on `&mut` for mutation. When several
//! threads need the same registry, [`SharedRegistry`] puts it behind one
//! [`parking_lot::Mutex`]. The lock is held for a whole resolution, so an
//! `append_args` from another thread can never land halfway through a
//! recipe being built.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::arg::Arg;
use crate::error::Result;
use crate::injectable::Injectable;
use crate::registry::Registry;

/// Cloneable, thread-safe handle to a single [`Registry`].
///
/// Every clone talks to the same registry.
///
/// # Examples
/// ```
/// use sijill_container::prelude::*;
///
/// struct Counter(u64);
/// impl Injectable for Counter {
///     fn construct(args: &mut Args) -> Result<Self> {
///         Ok(Counter(args.next_or(0u64)?))
///     }
/// }
///
/// let shared = SharedRegistry::default();
/// shared.register::<Counter>(args![5u64]);
///
/// let worker = shared.clone();
/// let handle = std::thread::spawn(move || worker.resolve::<Counter>().map(|c| c.0));
/// assert_eq!(handle.join().unwrap().unwrap(), 5);
/// ```
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    /// Wraps an existing registry.
    pub fn new(registry: Registry) -> Self {
        Self { inner: Arc::new(Mutex::new(registry)) }
    }

    /// Runs `f` with exclusive access to the registry.
    ///
    /// Use this to batch several operations under one lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// See [`Registry::register`].
    pub fn register<T: Injectable>(&self, args: impl IntoIterator<Item = Arg>) -> &Self {
        self.inner.lock().register::<T>(args);
        self
    }

    /// See [`Registry::register_singleton`].
    pub fn register_singleton<T: Injectable>(
        &self,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&Self> {
        self.inner.lock().register_singleton::<T>(args)?;
        Ok(self)
    }

    /// See [`Registry::register_instance`].
    pub fn register_instance<T: Injectable>(&self, instance: T) -> &Self {
        self.inner.lock().register_instance(instance);
        self
    }

    /// See [`Registry::append_args`].
    pub fn append_args<T: Injectable>(&self, args: impl IntoIterator<Item = Arg>) -> Result<&Self> {
        self.inner.lock().append_args::<T>(args)?;
        Ok(self)
    }

    /// See [`Registry::replace_args`].
    pub fn replace_args<T: Injectable>(&self, args: impl IntoIterator<Item = Arg>) -> &Self {
        self.inner.lock().replace_args::<T>(args);
        self
    }

    /// See [`Registry::resolve`].
    pub fn resolve<T: Injectable>(&self) -> Result<Arc<T>> {
        self.inner.lock().resolve::<T>()
    }

    /// See [`Registry::delete`].
    pub fn delete<T: Injectable>(&self) -> Result<&Self> {
        self.inner.lock().delete::<T>()?;
        Ok(self)
    }

    /// See [`Registry::delete_singleton`].
    pub fn delete_singleton<T: Injectable>(&self) -> Result<&Self> {
        self.inner.lock().delete_singleton::<T>()?;
        Ok(self)
    }

    /// See [`Registry::has`].
    pub fn has<T: Injectable>(&self) -> bool {
        self.inner.lock().has::<T>()
    }

    /// See [`Registry::has_singleton`].
    pub fn has_singleton<T: Injectable>(&self) -> bool {
        self.inner.lock().has_singleton::<T>()
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}

impl fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(registry) => f.debug_tuple("SharedRegistry").field(&*registry).finish(),
            None => f.debug_tuple("SharedRegistry").field(&"<locked>").finish(),
        }
    }
}
