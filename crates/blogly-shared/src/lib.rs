//! # Blogly Shared
//!
//! Types exchanged with the browser: submitted forms and error payloads.

pub mod dto;
pub mod response;

pub use dto::{FormError, parse_form};
pub use response::ErrorResponse;
