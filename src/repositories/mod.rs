pub mod chat_repository;
pub mod memory_repository;
