//! In-Memory Implementations
//!
//! 内存实现的档案表

mod profile_repository;

pub use profile_repository::InMemoryProfileRepository;
