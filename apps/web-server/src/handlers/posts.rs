//! Post listing, detail, creation, editing, deletion, and comments.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkpost_core::services::PostDraft;
use inkpost_shared::{CommentForm, FormErrors, PostForm, SearchQuery};

use crate::middleware::auth::{CurrentUser, MaybeUser};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{CategoryChoice, CommentPage, HomePage, PostDetailPage, PostFormPage};

use super::{field_errors, redirect, render};

/// GET / - post list, optionally filtered by `?q=`.
pub async fn home(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
    user: MaybeUser,
) -> AppResult<HttpResponse> {
    let query = query.into_inner().q.unwrap_or_default();
    let posts = state.content.list_posts(Some(&query)).await?;

    render(HomePage {
        posts,
        query,
        user: user.0,
    })
}

/// GET /create/post/
pub async fn create_post_page(
    state: web::Data<AppState>,
    _user: CurrentUser,
) -> AppResult<HttpResponse> {
    post_form_page(&state, "Create post", "/create/post/".to_string(), PostForm::default(), FormErrors::new()).await
}

/// POST /create/post/
pub async fn create_post_submit(
    state: web::Data<AppState>,
    user: CurrentUser,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match state.content.create_post(&user.0, draft_from(&form)).await {
        Ok(_) => Ok(redirect("/")),
        Err(err) => {
            let errors = field_errors(err)?;
            post_form_page(&state, "Create post", "/create/post/".to_string(), form, errors).await
        }
    }
}

/// GET /post/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    user: MaybeUser,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state.content.get_post(post_id).await?;
    let comments = state.content.comments_for(post_id).await?;

    let category = match post.category_id {
        Some(id) => state.content.category(id).await?,
        None => None,
    };

    let can_edit = user.0.as_ref().is_some_and(|u| post.can_edit(u));

    render(PostDetailPage {
        post,
        category,
        comments,
        can_edit,
    })
}

/// GET /post/{post_id}/edit/
pub async fn edit_post_page(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    user: CurrentUser,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state.content.get_post(post_id).await?;

    // Checked again on submit; this only keeps the form off-limits.
    if !post.can_edit(&user.0) {
        return Err(AppError::Forbidden);
    }

    let form = PostForm {
        title: post.title,
        content: post.content,
        category: post.category_id,
    };
    post_form_page(&state, "Edit post", format!("/post/{post_id}/edit/"), form, FormErrors::new()).await
}

/// POST /post/{post_id}/edit/
pub async fn edit_post_submit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    user: CurrentUser,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let form = form.into_inner();

    match state
        .content
        .update_post(post_id, &user.0, draft_from(&form))
        .await
    {
        Ok(_) => Ok(redirect(&format!("/post/{post_id}/"))),
        Err(err) => {
            let errors = field_errors(err)?;
            post_form_page(&state, "Edit post", format!("/post/{post_id}/edit/"), form, errors).await
        }
    }
}

/// POST /post/{post_id}/delete/
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    user: CurrentUser,
) -> AppResult<HttpResponse> {
    state.content.delete_post(path.into_inner(), &user.0).await?;
    Ok(redirect("/"))
}

/// GET /post/{post_id}/comment/ - open to any visitor.
pub async fn comment_page(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.content.get_post(path.into_inner()).await?;

    render(CommentPage {
        post,
        name: String::new(),
        body: String::new(),
        errors: FormErrors::new(),
    })
}

/// POST /post/{post_id}/comment/
pub async fn comment_submit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let form = form.into_inner();

    match state
        .content
        .create_comment(post_id, &form.name, &form.body)
        .await
    {
        Ok(_) => Ok(redirect(&format!("/post/{post_id}/"))),
        Err(err) => {
            let errors = field_errors(err)?;
            let post = state.content.get_post(post_id).await?;
            render(CommentPage {
                post,
                name: form.name,
                body: form.body,
                errors,
            })
        }
    }
}

async fn post_form_page(
    state: &web::Data<AppState>,
    heading: &'static str,
    action: String,
    form: PostForm,
    errors: FormErrors,
) -> AppResult<HttpResponse> {
    let categories = state.content.categories().await?;

    render(PostFormPage {
        heading,
        action,
        title: form.title,
        content: form.content,
        categories: CategoryChoice::list(categories, form.category),
        errors,
    })
}

fn draft_from(form: &PostForm) -> PostDraft {
    PostDraft {
        title: form.title.clone(),
        content: form.content.clone(),
        category_id: form.category,
    }
}
