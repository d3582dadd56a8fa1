//! End-to-end handler tests against the in-memory store.

use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use uuid::Uuid;

use inkpost_core::domain::{Post, User};
use inkpost_core::services::{NewUser, PostDraft};

use crate::handlers::configure_routes;
use crate::state::AppState;

fn state() -> AppState {
    AppState::in_memory(Duration::from_secs(3600))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn seed_user(state: &AppState, email: &str) -> User {
    state
        .identity
        .create_user(NewUser {
            email: email.to_string(),
            password: "password123".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        })
        .await
        .unwrap()
}

async fn seed_post(state: &AppState, author: &User, title: &str) -> Post {
    state
        .content
        .create_post(
            author,
            PostDraft {
                title: title.to_string(),
                content: format!("Content of {title}"),
                category_id: None,
            },
        )
        .await
        .unwrap()
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .unwrap()
}

#[actix_web::test]
async fn home_lists_posts_and_filters_by_query() {
    let state = state();
    let author = seed_user(&state, "author@example.com").await;
    seed_post(&state, &author, "Test Post 1").await;
    seed_post(&state, &author, "Another Post").await;
    let app = test_app!(state);

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("Test Post 1"));
    assert!(page.contains("Another Post"));

    let body =
        test::call_and_read_body(&app, test::TestRequest::get().uri("/?q=Test").to_request()).await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("Test Post 1"));
    assert!(!page.contains("Another Post"));
}

#[actix_web::test]
async fn signup_redirects_to_login_without_auto_login() {
    let state = state();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup/")
            .set_form([
                ("first_name", "Jane"),
                ("last_name", "Doe"),
                ("email", "jane@example.com"),
                ("password1", "password123"),
                ("password2", "password123"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/?registered=1");
    assert!(resp.response().cookies().next().is_none());

    let stored = state
        .users
        .find_by_email("jane@example.com")
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[actix_web::test]
async fn duplicate_signup_redisplays_the_form_with_a_field_error() {
    let state = state();
    seed_user(&state, "jane@example.com").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup/")
            .set_form([
                ("email", "jane@example.com"),
                ("password1", "password123"),
                ("password2", "password123"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("already exists"));
}

#[actix_web::test]
async fn mismatched_passwords_redisplay_the_form() {
    let state = state();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup/")
            .set_form([
                ("email", "jane@example.com"),
                ("password1", "password123"),
                ("password2", "different456"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("The two password fields"));
}

#[actix_web::test]
async fn failed_login_shows_a_generic_message() {
    let state = state();
    seed_user(&state, "jane@example.com").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login/")
            .set_form([("email", "jane@example.com"), ("password", "wrong")])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("Email or Password is Incorrect"));
}

#[actix_web::test]
async fn login_establishes_a_session() {
    let state = state();
    seed_user(&state, "jane@example.com").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login/")
            .set_form([("email", "jane@example.com"), ("password", "password123")])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "sid")
        .expect("session cookie")
        .into_owned();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/create/post/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn guarded_routes_redirect_anonymous_visitors_to_login() {
    let state = state();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/create/post/").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");
}

#[actix_web::test]
async fn create_post_binds_the_session_user_as_author() {
    let state = state();
    let user = seed_user(&state, "jane@example.com").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login/")
            .set_form([("email", "jane@example.com"), ("password", "password123")])
            .to_request(),
    )
    .await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "sid")
        .unwrap()
        .into_owned();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create/post/")
            .cookie(cookie)
            .set_form([
                ("title", "My first post"),
                ("content", "Hello, world."),
                ("category", ""),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let posts = state.content.list_posts(None).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author_id, user.id);
}

#[actix_web::test]
async fn empty_title_redisplays_the_post_form() {
    let state = state();
    seed_user(&state, "jane@example.com").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login/")
            .set_form([("email", "jane@example.com"), ("password", "password123")])
            .to_request(),
    )
    .await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "sid")
        .unwrap()
        .into_owned();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create/post/")
            .cookie(cookie)
            .set_form([("title", ""), ("content", "Hello"), ("category", "")])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("This field is required."));
    assert!(state.content.list_posts(None).await.unwrap().is_empty());
}

#[actix_web::test]
async fn commenting_needs_no_session_and_redirects_to_the_post() {
    let state = state();
    let author = seed_user(&state, "author@example.com").await;
    let post = seed_post(&state, &author, "Commentable").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/post/{}/comment/", post.id))
            .set_form([("name", "Visitor"), ("body", "Nice post!")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/post/{}/", post.id));

    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get()
            .uri(&format!("/post/{}/", post.id))
            .to_request(),
    )
    .await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("Visitor"));
    assert!(page.contains("Nice post!"));
}

#[actix_web::test]
async fn comment_routes_404_for_an_unknown_post() {
    let state = state();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/post/{}/comment/", Uuid::new_v4()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn editing_someone_elses_post_is_forbidden() {
    let state = state();
    let author = seed_user(&state, "author@example.com").await;
    let post = seed_post(&state, &author, "Protected").await;
    seed_user(&state, "other@example.com").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login/")
            .set_form([("email", "other@example.com"), ("password", "password123")])
            .to_request(),
    )
    .await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "sid")
        .unwrap()
        .into_owned();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/post/{}/edit/", post.id))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/post/{}/delete/", post.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn logout_destroys_the_session() {
    let state = state();
    seed_user(&state, "jane@example.com").await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login/")
            .set_form([("email", "jane@example.com"), ("password", "password123")])
            .to_request(),
    )
    .await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "sid")
        .unwrap()
        .into_owned();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout/")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    // The old token no longer authenticates.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/create/post/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");
}
