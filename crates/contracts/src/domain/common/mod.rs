//! Common types and traits for all managed resources

pub mod endpoint;
pub mod filter;
pub mod resource;
pub mod status;

// Re-exports
pub use endpoint::Endpoint;
pub use filter::{FilterField, FilterKind};
pub use resource::{EntityId, Resource};
pub use status::Status;
