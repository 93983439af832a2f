pub mod attachment;
pub mod command;
pub mod customer_request;
pub mod document;
pub mod history_entry;
pub mod request_product;

// Re-exports
pub use attachment::*;
pub use command::*;
pub use customer_request::*;
pub use document::*;
pub use history_entry::*;
pub use request_product::*;
