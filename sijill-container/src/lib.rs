//! Core registry implementation for Sijill DI.

pub mod arg;
pub mod error;
pub mod injectable;
pub mod key;
pub mod recipe;
pub mod registry;
pub mod settings;
pub mod shared;

pub use arg::Arg;
pub use error::{Result, SijillError};
pub use injectable::{AnyInstance, Args, Injectable};
pub use key::DependencyKey;
pub use registry::{Registry, RegistryBuilder, prelude};
pub use settings::{Policy, RegistrySettings};
pub use shared::SharedRegistry;
