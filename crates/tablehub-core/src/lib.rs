//! # tablehub-core
//!
//! Core crate for TableHub. Contains traits, configuration schemas,
//! typed identifiers, time-of-day primitives, availability result types,
//! domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other TableHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
