//! # tablehub-entity
//!
//! Domain entity models for TableHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! The crate also defines [`store::AvailabilityStore`], the data-access
//! port the engines are written against. `tablehub-database` provides the
//! PostgreSQL implementation; tests substitute in-memory fakes.

pub mod booking;
pub mod join_group;
pub mod priority;
pub mod store;
pub mod table;
pub mod window;
