//! Session store backends.

mod memory;

pub use memory::InMemorySessionStore;
