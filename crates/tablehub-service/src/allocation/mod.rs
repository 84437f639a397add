//! The allocation engine.

pub mod engine;

pub use engine::AllocationEngine;
