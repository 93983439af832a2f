pub mod repository;
pub mod utils;

pub use repository::request_repository::SqliteRequestRepository;

#[cfg(test)]
pub mod test_helper;
