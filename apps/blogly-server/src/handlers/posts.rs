//! Post pages. Posts are created under a user and carry any number of tags.

use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;

use blogly_shared::dto::PostForm;
use blogly_shared::parse_form;

use super::{page, redirect, redirect_with_flash};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /posts/{id}
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.post_or_404(path.into_inner()).await?;
    let user = state.user_or_404(post.user_id).await?;
    let tags = state.tags.find_by_post(post.id).await?;
    page(&req, "posts/detail.html", context! { post, user, tags })
}

/// GET /users/{id}/posts/new
pub async fn new_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.user_or_404(path.into_inner()).await?;
    let tags = state.tags.find_all().await?;
    page(&req, "posts/new.html", context! { user, tags })
}

/// POST /users/{id}/posts/new
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let user = state.user_or_404(path.into_inner()).await?;
    let mut form: PostForm = parse_form(&body)?;
    form.tags = existing_tag_ids(&state, &form.tags).await?;
    let tags = form.tags.len();
    let post = state.posts.create(form.into_new_post(user.id)).await?;
    tracing::info!(post_id = post.id, user_id = user.id, tags, "Post created");

    Ok(redirect(&format!("/users/{}", user.id)))
}

/// GET /posts/{id}/edit
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.post_or_404(path.into_inner()).await?;
    let tags = state.tags.find_all().await?;
    let tag_ids: Vec<i32> = state
        .tags
        .find_by_post(post.id)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();
    page(&req, "posts/edit.html", context! { post, tags, tag_ids })
}

/// POST /posts/{id}/edit
///
/// Title, content and the tag selection are saved in one transaction.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let post = state.post_or_404(path.into_inner()).await?;
    let mut form: PostForm = parse_form(&body)?;
    form.tags = existing_tag_ids(&state, &form.tags).await?;
    let tags = form.tags.len();
    state.posts.update(post.id, form.into()).await?;
    tracing::info!(post_id = post.id, tags, "Post updated");

    Ok(redirect(&format!("/posts/{}", post.id)))
}

/// POST /posts/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.posts.delete(path.into_inner()).await?;
    tracing::info!(post_id = post.id, user_id = post.user_id, "Post deleted");

    Ok(redirect_with_flash(
        &format!("/users/{}", post.user_id),
        format!("Post {} deleted.", post.title),
    ))
}

/// The selected ids that name an existing tag; unknown ids are dropped.
async fn existing_tag_ids(state: &AppState, selected: &[i32]) -> AppResult<Vec<i32>> {
    let tags = state.tags.find_by_ids(selected).await?;
    Ok(tags.into_iter().map(|t| t.id).collect())
}
