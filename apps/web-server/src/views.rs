//! Askama page contexts. Templates live under `templates/`.

use actix_web::http::StatusCode;
use askama::Template;
use uuid::Uuid;

use inkpost_core::domain::{Category, Comment, Post, User};
use inkpost_shared::{FormErrors, SignupForm};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub posts: Vec<Post>,
    pub query: String,
    pub user: Option<User>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage {
    pub form: SignupForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub email: String,
    pub error_message: Option<String>,
    pub registered: bool,
}

/// One `<option>` in the category dropdown, with selection precomputed so
/// the template stays a plain loop.
pub struct CategoryChoice {
    pub id: Uuid,
    pub name: String,
    pub selected: bool,
}

impl CategoryChoice {
    pub fn list(categories: Vec<Category>, selected: Option<Uuid>) -> Vec<Self> {
        categories
            .into_iter()
            .map(|c| CategoryChoice {
                selected: selected == Some(c.id),
                id: c.id,
                name: c.name,
            })
            .collect()
    }
}

/// Shared by the create and edit forms; they differ only in heading,
/// action URL, and prefilled values.
#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormPage {
    pub heading: &'static str,
    pub action: String,
    pub title: String,
    pub content: String,
    pub categories: Vec<CategoryChoice>,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailPage {
    pub post: Post,
    pub category: Option<Category>,
    pub comments: Vec<Comment>,
    pub can_edit: bool,
}

#[derive(Template)]
#[template(path = "create_comment.html")]
pub struct CommentPage {
    pub post: Post,
    pub name: String,
    pub body: String,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status_code: u16,
    pub reason: String,
    pub detail: String,
}

impl ErrorPage {
    pub fn new(status: StatusCode, detail: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
            detail: detail.to_string(),
        }
    }
}
