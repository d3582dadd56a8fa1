//! SeaORM entities mirroring the migration schema.

pub mod category;
pub mod comment;
pub mod post;
pub mod user;
