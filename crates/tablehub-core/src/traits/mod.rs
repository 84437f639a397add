//! Core traits defined in `tablehub-core` and implemented by other crates.

pub mod cache;
pub mod hold;
pub mod service;

pub use cache::CacheProvider;
pub use hold::{HoldToken, SlotHold};
pub use service::Service;
