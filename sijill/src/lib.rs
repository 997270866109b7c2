//! # Sijill — a recipe-based dependency injection registry
//!
//! Register how a type is built (its positional constructor arguments,
//! some of which may be other registered types) or bind a ready-made
//! singleton, then ask the registry for an instance.
//!
//! ```rust
//! use std::sync::Arc;
//! use sijill::prelude::*;
//!
//! #[derive(Injectable)]
//! struct Transport {
//!     host: String,
//! }
//!
//! #[derive(Injectable)]
//! struct Mailer {
//!     #[injectable(inject)]
//!     transport: Arc<Transport>,
//!     sender: &'static str,
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!     .register_singleton::<Transport>(args![String::from("smtp.local")])?
//!     .register::<Mailer>(args![@Transport, "noreply@example.com"]);
//!
//! let mailer = registry.resolve::<Mailer>()?;
//! assert_eq!(mailer.transport.host, "smtp.local");
//! # Ok::<(), SijillError>(())
//! ```

pub use sijill_container::*;
pub use sijill_macros::Injectable;
pub use sijill_support as support;

pub mod prelude {
    pub use sijill_container::prelude::*;
    pub use sijill_macros::Injectable;
}
