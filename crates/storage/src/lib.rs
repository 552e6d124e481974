#![forbid(unsafe_code)]

pub mod mock;
pub mod repository;

pub use repository::{InMemoryRepository, Latency, Storage, StorageError};
