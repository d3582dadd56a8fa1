//! HTTP handlers and route configuration.

mod auth;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, http::header, web};
use askama::Template;

use inkpost_core::DomainError;
use inkpost_shared::FormErrors;

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::home))
        .service(
            web::resource("/signup/")
                .route(web::get().to(auth::signup_page))
                .route(web::post().to(auth::signup_submit)),
        )
        .service(
            web::resource("/login/")
                .route(web::get().to(auth::login_page))
                .route(web::post().to(auth::login_submit)),
        )
        .route("/logout/", web::get().to(auth::logout))
        .service(
            web::resource("/create/post/")
                .route(web::get().to(posts::create_post_page))
                .route(web::post().to(posts::create_post_submit)),
        )
        .route("/post/{post_id}/", web::get().to(posts::post_detail))
        .service(
            web::resource("/post/{post_id}/comment/")
                .route(web::get().to(posts::comment_page))
                .route(web::post().to(posts::comment_submit)),
        )
        .service(
            web::resource("/post/{post_id}/edit/")
                .route(web::get().to(posts::edit_post_page))
                .route(web::post().to(posts::edit_post_submit)),
        )
        .route(
            "/post/{post_id}/delete/",
            web::post().to(posts::delete_post),
        );
}

/// Render a template into a 200 HTML response.
pub(crate) fn render<T: Template>(template: T) -> AppResult<HttpResponse> {
    let body = template
        .render()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// 303 See Other - the post/redirect/get convention for form submissions.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Split a service failure into field errors (for form redisplay) or an
/// application error (for an error page).
pub(crate) fn field_errors(err: DomainError) -> Result<FormErrors, AppError> {
    match err {
        DomainError::Validation { field, message } | DomainError::Conflict { field, message } => {
            Ok(FormErrors::single(field, message))
        }
        other => Err(other.into()),
    }
}
