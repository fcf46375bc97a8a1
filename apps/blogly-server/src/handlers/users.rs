//! User pages.

use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;

use blogly_shared::dto::UserForm;
use blogly_shared::parse_form;

use super::{page, redirect, redirect_with_flash};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /, GET /users
pub async fn list(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;
    page(&req, "users/list.html", context! { users })
}

/// GET /users/new
pub async fn new_form(req: HttpRequest) -> AppResult<HttpResponse> {
    page(&req, "users/new.html", context! {})
}

/// POST /users/new
pub async fn create(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let form: UserForm = parse_form(&body)?;
    let user = state.users.create(form.into()).await?;
    tracing::info!(user_id = user.id, "User created");

    Ok(redirect("/users"))
}

/// GET /users/{id}
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.user_or_404(path.into_inner()).await?;
    let posts = state.posts.find_by_user(user.id).await?;
    page(&req, "users/detail.html", context! { user, posts })
}

/// GET /users/{id}/edit
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.user_or_404(path.into_inner()).await?;
    page(&req, "users/edit.html", context! { user })
}

/// POST /users/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let user = state.user_or_404(path.into_inner()).await?;
    let form: UserForm = parse_form(&body)?;
    state.users.update(user.id, form.into()).await?;
    tracing::info!(user_id = user.id, "User updated");

    Ok(redirect("/users"))
}

/// POST /users/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = state.users.delete(path.into_inner()).await?;
    tracing::info!(user_id = user.id, "User deleted");

    Ok(redirect_with_flash("/users", "User deleted."))
}
