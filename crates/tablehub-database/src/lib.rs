//! # tablehub-database
//!
//! PostgreSQL persistence for TableHub: connection pool management,
//! migrations, per-entity repositories, and the [`store::PgAvailabilityStore`]
//! implementation of the data-access port.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::PgAvailabilityStore;
