//! # Inkpost Shared
//!
//! Form payload types and the field-error container shared between the
//! handlers and the templates.

pub mod forms;

pub use forms::{CommentForm, FormErrors, LoginForm, PostForm, SearchQuery, SignupForm};
