pub mod engine;
pub mod models;
pub mod repository;

pub use engine::*;
pub use models::*;
pub use repository::*;
