//! Content service - post, comment, and category lifecycle.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Category, Comment, Post, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{CategoryRepository, CommentRepository, PostRepository};

/// Input for creating or editing a post. The author never comes from here -
/// it is fixed server-side from the authenticated caller.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category_id: Option<Uuid>,
}

/// Owns the Category/Post/Comment lifecycle.
pub struct ContentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ContentService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            posts,
            comments,
            categories,
        }
    }

    /// List posts, optionally filtered by a case-insensitive title substring.
    /// An empty or absent query returns everything.
    pub async fn list_posts(&self, query: Option<&str>) -> Result<Vec<Post>, DomainError> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => self.posts.search_by_title(q).await.map_err(internal),
            None => self.posts.find_all().await.map_err(internal),
        }
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(internal)?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id: post_id,
            })
    }

    /// Create a post owned by `author`. The author id is taken from the
    /// authenticated caller, never from client input.
    pub async fn create_post(&self, author: &User, draft: PostDraft) -> Result<Post, DomainError> {
        let draft = self.validate_draft(draft).await?;
        let post = Post::new(author.id, draft.title, draft.content, draft.category_id);
        let saved = self.posts.save(post).await.map_err(internal)?;
        tracing::info!(post_id = %saved.id, author_id = %author.id, "post created");
        Ok(saved)
    }

    /// Update a post. Permission is re-checked on every call.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        editor: &User,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_post(post_id).await?;
        if !post.can_edit(editor) {
            return Err(DomainError::Forbidden);
        }
        let draft = self.validate_draft(draft).await?;

        post.title = draft.title;
        post.content = draft.content;
        post.category_id = draft.category_id;
        post.updated_at = Utc::now();

        self.posts.save(post).await.map_err(internal)
    }

    /// Delete a post. The store cascades its comments.
    pub async fn delete_post(&self, post_id: Uuid, editor: &User) -> Result<(), DomainError> {
        let post = self.get_post(post_id).await?;
        if !post.can_edit(editor) {
            return Err(DomainError::Forbidden);
        }
        self.posts.delete(post_id).await.map_err(internal)?;
        tracing::info!(post_id = %post_id, editor_id = %editor.id, "post deleted");
        Ok(())
    }

    /// Attach a visitor comment to an existing post. No authentication.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        name: &str,
        body: &str,
    ) -> Result<Comment, DomainError> {
        // Resolve the post first: a bad id is a 404, not a form error.
        let post = self.get_post(post_id).await?;

        let name = name.trim();
        let body = body.trim();
        if name.is_empty() {
            return Err(DomainError::required("name"));
        }
        if body.is_empty() {
            return Err(DomainError::required("body"));
        }

        let comment = Comment::new(post.id, name.to_string(), body.to_string());
        self.comments.save(comment).await.map_err(internal)
    }

    /// Comments on a post, oldest first.
    pub async fn comments_for(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.comments.find_by_post(post_id).await.map_err(internal)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.find_all().await.map_err(internal)
    }

    pub async fn category(&self, category_id: Uuid) -> Result<Option<Category>, DomainError> {
        self.categories
            .find_by_id(category_id)
            .await
            .map_err(internal)
    }

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::required("name"));
        }
        let category = Category::new(name.to_string(), description);
        self.categories.save(category).await.map_err(internal)
    }

    async fn validate_draft(&self, draft: PostDraft) -> Result<PostDraft, DomainError> {
        let title = draft.title.trim().to_string();
        let content = draft.content.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::required("title"));
        }
        if content.is_empty() {
            return Err(DomainError::required("content"));
        }

        if let Some(category_id) = draft.category_id {
            let known = self
                .categories
                .find_by_id(category_id)
                .await
                .map_err(internal)?
                .is_some();
            if !known {
                return Err(DomainError::validation(
                    "category",
                    "Select a valid category.",
                ));
            }
        }

        Ok(PostDraft {
            title,
            content,
            category_id: draft.category_id,
        })
    }
}

fn internal(e: RepoError) -> DomainError {
    DomainError::Internal(e.to_string())
}
