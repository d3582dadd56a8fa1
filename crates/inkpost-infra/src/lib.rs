//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`.
//! This crate contains the database, password hashing, and session backends.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` the in-memory store is the only repository backend.

pub mod auth;
pub mod database;
pub mod memory;
pub mod session;

pub use auth::Argon2PasswordService;
pub use database::DatabaseConnections;
pub use memory::MemoryStore;
pub use session::InMemorySessionStore;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};
