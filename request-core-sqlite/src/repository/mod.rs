pub mod request_repository;
