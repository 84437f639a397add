//! # tablehub-cache
//!
//! Caching for TableHub: the in-memory [`CacheProvider`] implementation
//! and the typed [`availability::AvailabilityCache`] that memoizes
//! availability verdicts with explicit invalidation on booking mutation.
//!
//! The cache is constructor-injected wherever it is used; there is no
//! process-wide static state.
//!
//! [`CacheProvider`]: tablehub_core::traits::CacheProvider

pub mod availability;
pub mod keys;
pub mod memory;

pub use availability::AvailabilityCache;
pub use memory::MemoryCacheProvider;
