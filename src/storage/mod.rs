//! Backing collection implementations

pub mod in_memory;

pub use in_memory::InMemoryCollection;
