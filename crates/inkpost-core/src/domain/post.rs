use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// Post entity - a published entry owned by its author.
///
/// The author is fixed at creation time and never changes; the category link
/// is optional and is cleared (not cascaded) when the category is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: Uuid, title: String, content: String, category_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author_id,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Edit permission: the author or any superuser.
    ///
    /// Pure and evaluated on every edit/delete attempt - authorship and the
    /// superuser flag can both change between requests.
    pub fn can_edit(&self, user: &User) -> bool {
        self.author_id == user.id || user.is_superuser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(email.into(), "hash".into(), String::new(), String::new())
    }

    #[test]
    fn author_can_edit_own_post() {
        let author = user("author@example.com");
        let post = Post::new(author.id, "Title".into(), "Body".into(), None);
        assert!(post.can_edit(&author));
    }

    #[test]
    fn other_user_cannot_edit() {
        let author = user("author@example.com");
        let other = user("other@example.com");
        let post = Post::new(author.id, "Title".into(), "Body".into(), None);
        assert!(!post.can_edit(&other));
    }

    #[test]
    fn superuser_can_edit_any_post() {
        let author = user("author@example.com");
        let admin = User::new_superuser(
            "admin@example.com".into(),
            "hash".into(),
            String::new(),
            String::new(),
        );
        let post = Post::new(author.id, "Title".into(), "Body".into(), None);
        assert!(post.can_edit(&admin));
    }
}
