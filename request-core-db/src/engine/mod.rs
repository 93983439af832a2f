pub mod projection;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_store;

// Re-exports
pub use projection::*;
pub use workflow::*;
