//! Storage implementations

pub mod in_memory;
pub mod seed;

pub use in_memory::InMemoryRepository;
pub use seed::{sample_data, seed_repository};
