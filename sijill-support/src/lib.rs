//! # Sijill Support
//!
//! Shared helpers for the Sijill registry crates.
//!
//! This crate provides:
//! - Type-name shortening for log lines and error messages
//! - "Did you mean?" suggestions over registered type names
//! - Rendering of resolution paths

pub mod rendering;
