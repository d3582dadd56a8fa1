//! Session-cookie authentication extractors.
//!
//! The browser holds an opaque token in the `sid` cookie; the extractors
//! resolve it through the session store and user repository on every request.

use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures::future::LocalBoxFuture;

use inkpost_core::domain::User;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Authenticated user extractor - the route guard for login-required pages.
///
/// ```ignore
/// async fn create_post(user: CurrentUser) -> impl Responder {
///     // user.0 is the logged-in User
/// }
/// ```
///
/// Unauthenticated requests are redirected to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Optional variant - pages that merely adapt to login state.
pub struct MaybeUser(pub Option<User>);

/// Rejection for guarded routes: a redirect, matching the framework
/// convention for HTML auth gating.
#[derive(Debug)]
pub struct LoginRequired;

impl std::fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "authentication required")
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((actix_web::http::header::LOCATION, "/login/"))
            .finish()
    }
}

async fn resolve_user(req: &HttpRequest) -> Option<User> {
    let state = req.app_data::<web::Data<AppState>>()?;
    let cookie = req.cookie(SESSION_COOKIE)?;

    let user_id = state.sessions.user_id(cookie.value()).await?;
    let user = state.users.find_by_id(user_id).await.ok().flatten()?;

    // A deactivated account keeps its cookie but loses its session.
    user.is_active.then_some(user)
}

impl FromRequest for CurrentUser {
    type Error = LoginRequired;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            match resolve_user(&req).await {
                Some(user) => Ok(CurrentUser(user)),
                None => Err(LoginRequired),
            }
        })
    }
}

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { Ok(MaybeUser(resolve_user(&req).await)) })
    }
}
