//! Tag pages.

use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;

use blogly_shared::dto::TagForm;
use blogly_shared::parse_form;

use super::{page, redirect, redirect_with_flash};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /tags
pub async fn list(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.find_all().await?;
    page(&req, "tags/list.html", context! { tags })
}

/// GET /tags/{id}
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag = state.tag_or_404(path.into_inner()).await?;
    let posts = state.posts.find_by_tag(tag.id).await?;
    page(&req, "tags/detail.html", context! { tag, posts })
}

/// GET /tags/new
pub async fn new_form(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    page(&req, "tags/new.html", context! { posts })
}

/// POST /tags/new
pub async fn create(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let form: TagForm = parse_form(&body)?;
    let tag = state.tags.create(form.into()).await?;
    tracing::info!(tag_id = tag.id, "Tag created");

    Ok(redirect("/tags"))
}

/// GET /tags/{id}/edit
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag = state.tag_or_404(path.into_inner()).await?;
    let posts = state.posts.find_all().await?;
    page(&req, "tags/edit.html", context! { tag, posts })
}

/// POST /tags/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let tag = state.tag_or_404(path.into_inner()).await?;
    let form: TagForm = parse_form(&body)?;
    state.tags.update(tag.id, form.into()).await?;

    Ok(redirect("/tags"))
}

/// POST /tags/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let tag = state.tags.delete(path.into_inner()).await?;
    tracing::info!(tag_id = tag.id, "Tag deleted");

    Ok(redirect_with_flash("/tags", format!("Tag {} deleted.", tag.name)))
}
