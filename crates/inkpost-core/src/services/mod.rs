//! Application services - orchestration over the ports.
//!
//! These are explicit service objects handed to the handlers, not global
//! singletons: construct them once at startup and share via `Arc`.

mod content;
mod identity;

pub use content::{ContentService, PostDraft};
pub use identity::{IdentityService, NewUser};
