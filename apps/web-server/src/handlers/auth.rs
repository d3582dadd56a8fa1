//! Signup, login, and logout.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use serde::Deserialize;

use inkpost_core::services::NewUser;
use inkpost_shared::{FormErrors, LoginForm, SignupForm};

use crate::middleware::auth::{CurrentUser, MaybeUser, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{LoginPage, SignupPage};

use super::{field_errors, redirect, render};

/// GET /signup/
pub async fn signup_page(user: MaybeUser) -> AppResult<HttpResponse> {
    if user.0.is_some() {
        return Ok(redirect("/login/"));
    }

    render(SignupPage {
        form: SignupForm::default(),
        errors: FormErrors::new(),
    })
}

/// POST /signup/
pub async fn signup_submit(
    state: web::Data<AppState>,
    form: web::Form<SignupForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    if form.password1 != form.password2 {
        return render(SignupPage {
            errors: FormErrors::single("password2", "The two password fields didn't match."),
            form: scrub_passwords(form),
        });
    }

    let new_user = NewUser {
        email: form.email.clone(),
        password: form.password1.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
    };

    match state.identity.create_user(new_user).await {
        // No auto-login: back to the login page with a success notice.
        Ok(_) => Ok(redirect("/login/?registered=1")),
        Err(err) => render(SignupPage {
            errors: field_errors(err)?,
            form: scrub_passwords(form),
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    registered: Option<String>,
}

/// GET /login/
pub async fn login_page(
    user: MaybeUser,
    query: web::Query<LoginQuery>,
) -> AppResult<HttpResponse> {
    if user.0.is_some() {
        return Ok(redirect("/"));
    }

    render(LoginPage {
        email: String::new(),
        error_message: None,
        registered: query.registered.is_some(),
    })
}

/// POST /login/
pub async fn login_submit(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let Some(user) = state
        .identity
        .verify_credentials(&form.email, &form.password)
        .await?
    else {
        // Deliberately generic: never reveal which credential was wrong.
        return render(LoginPage {
            email: form.email,
            error_message: Some("Email or Password is Incorrect".to_string()),
            registered: false,
        });
    };

    let token = state
        .sessions
        .create(user.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish())
}

/// GET /logout/ - guarded; anonymous requests bounce to the login page.
pub async fn logout(
    req: HttpRequest,
    _user: CurrentUser,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state
            .sessions
            .destroy(cookie.value())
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    let mut response = redirect("/");
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    response
        .add_removal_cookie(&removal)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(response)
}

fn scrub_passwords(mut form: SignupForm) -> SignupForm {
    form.password1.clear();
    form.password2.clear();
    form
}
