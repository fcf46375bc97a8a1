//! One-shot confirmation messages carried across a redirect in a cookie.

use actix_web::HttpRequest;
use actix_web::cookie::Cookie;

pub const FLASH_COOKIE: &str = "flash";

/// Cookie carrying `message` to the next rendered page.
fn cookie(message: impl Into<String>) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, message.into())
        .path("/")
        .http_only(true)
        .finish()
}

/// `Set-Cookie` value for `message`, percent-encoded.
///
/// Messages quote titles and names as typed, which may hold `;` or line breaks.
pub fn header_value(message: impl Into<String>) -> String {
    cookie(message).encoded().to_string()
}

/// Cookie that clears a delivered message.
pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Message pending for this request, if any.
pub fn pending(req: &HttpRequest) -> Option<String> {
    req.cookie(FLASH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
