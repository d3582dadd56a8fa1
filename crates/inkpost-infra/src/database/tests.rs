use std::sync::Arc;

use sea_orm::{DatabaseBackend, MockDatabase};

use inkpost_core::domain::{Post, User};
use inkpost_core::ports::{BaseRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

#[tokio::test]
async fn find_post_by_id_maps_to_the_domain_entity() {
    let post_id = uuid::Uuid::new_v4();
    let author_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            author_id,
            category_id: None,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.author_id, author_id);
    assert_eq!(post.category_id, None);
}

#[tokio::test]
async fn find_user_by_email_maps_flags_through() {
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            email: "jane@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            is_staff: false,
            is_superuser: true,
            is_active: true,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(Arc::new(db));

    let result: Option<User> = repo.find_by_email("jane@example.com").await.unwrap();

    let user = result.expect("user should be found");
    assert_eq!(user.id, user_id);
    assert!(user.is_superuser);
    assert!(!user.is_staff);
}

#[tokio::test]
async fn missing_rows_resolve_to_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(Arc::new(db));

    let result = repo.find_by_email("nobody@example.com").await.unwrap();
    assert!(result.is_none());
}
