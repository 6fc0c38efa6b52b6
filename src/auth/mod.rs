//! Session-cookie authentication.

mod extractor;
pub mod password;

use actix_web::cookie::Cookie;
use uuid::Uuid;

use crate::config::SESSION_COOKIE;

pub use extractor::{AdminAuth, OptionalSessionAuth, SessionAuth};

/// Generate a fresh opaque session or magic-link token.
pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

/// Cookie carrying a newly issued session token.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

/// Cookie that clears the session on the client (`Max-Age=-1`).
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(actix_web::cookie::time::Duration::seconds(-1));
    cookie
}
