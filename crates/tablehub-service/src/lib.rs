//! # tablehub-service
//!
//! Business logic for TableHub: the occupancy calculator, the
//! availability decision engine, the allocation engine, and the advisory
//! slot-hold service.
//!
//! All engines are written against the [`AvailabilityStore`] port and an
//! injected [`AvailabilityCache`]; nothing in this crate talks to
//! PostgreSQL directly.
//!
//! [`AvailabilityStore`]: tablehub_entity::store::AvailabilityStore
//! [`AvailabilityCache`]: tablehub_cache::AvailabilityCache

pub mod allocation;
pub mod availability;
pub mod hold;
pub mod occupancy;

pub use allocation::AllocationEngine;
pub use availability::AvailabilityEngine;
pub use hold::SlotHoldService;
