//! In-memory storage backend for testing and development.
//!
//! Holds records in a key-ordered map behind `Arc<RwLock<_>>`. Nothing
//! is persisted; data is lost when the last clone is dropped.

mod repository;

pub use repository::MemoryRepository;
