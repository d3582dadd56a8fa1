//! Password hashing backend.

mod password;

pub use password::Argon2PasswordService;
