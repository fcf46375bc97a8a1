//! HTTP handlers and route configuration.

mod health;
mod posts;
mod tags;
mod users;

#[cfg(test)]
mod tests;

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::{Value, context};

use crate::flash;
use crate::middleware::error::{AppError, AppResult};
use crate::templates;

/// Configure all application routes.
///
/// Literal segments (`/users/new`) are registered before the `{id}` patterns they overlap.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(users::list))
        .route("/health", web::get().to(health::health_check))
        // Users
        .route("/users", web::get().to(users::list))
        .service(
            web::resource("/users/new")
                .route(web::get().to(users::new_form))
                .route(web::post().to(users::create)),
        )
        .route("/users/{id}", web::get().to(users::show))
        .service(
            web::resource("/users/{id}/edit")
                .route(web::get().to(users::edit_form))
                .route(web::post().to(users::update)),
        )
        .route("/users/{id}/delete", web::post().to(users::delete))
        // Posts
        .service(
            web::resource("/users/{id}/posts/new")
                .route(web::get().to(posts::new_form))
                .route(web::post().to(posts::create)),
        )
        .route("/posts/{id}", web::get().to(posts::show))
        .service(
            web::resource("/posts/{id}/edit")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::update)),
        )
        .route("/posts/{id}/delete", web::post().to(posts::delete))
        // Tags
        .route("/tags", web::get().to(tags::list))
        .service(
            web::resource("/tags/new")
                .route(web::get().to(tags::new_form))
                .route(web::post().to(tags::create)),
        )
        .route("/tags/{id}", web::get().to(tags::show))
        .service(
            web::resource("/tags/{id}/edit")
                .route(web::get().to(tags::edit_form))
                .route(web::post().to(tags::update)),
        )
        .route("/tags/{id}/delete", web::post().to(tags::delete));
}

/// Fallback for unmatched paths.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No page at {}", req.path())))
}

/// Render a page, delivering and clearing any pending flash message.
fn page(req: &HttpRequest, template: &str, ctx: Value) -> AppResult<HttpResponse> {
    let flash = flash::pending(req);
    let delivered = flash.is_some();
    let html = templates::render(template, context! { flash => flash, ..ctx })?;

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if delivered {
        response.cookie(flash::removal());
    }
    Ok(response.body(html))
}

/// 303 redirect after a form submission.
fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// 303 redirect that leaves a confirmation message for the next page.
fn redirect_with_flash(location: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .insert_header((header::SET_COOKIE, flash::header_value(message)))
        .finish()
}
