pub mod identifiable;
pub mod request;

// Re-exports
pub use identifiable::*;
pub use request::*;
