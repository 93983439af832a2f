pub mod actor;
pub mod role;
pub mod status;

// Re-exports
pub use actor::*;
pub use role::*;
pub use status::*;
