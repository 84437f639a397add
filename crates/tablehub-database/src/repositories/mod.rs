//! Repository implementations, one per entity.

pub mod booking;
pub mod join_group;
pub mod priority;
pub mod table;
pub mod window;

pub use booking::BookingRepository;
pub use join_group::JoinGroupRepository;
pub use priority::PriorityRepository;
pub use table::TableRepository;
pub use window::WindowRepository;
