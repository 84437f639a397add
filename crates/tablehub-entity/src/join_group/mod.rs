//! Join-group domain entities.

pub mod model;

pub use model::JoinGroup;
