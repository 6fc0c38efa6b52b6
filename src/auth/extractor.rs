//! Actix-web extractors for session-cookie authentication.
//!
//! # Security
//! - The cookie value is wrapped in `SecretString` as soon as it is read
//! - Token values are never logged
//! - Non-UUID tokens are rejected without touching the database

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::config::SESSION_COOKIE;
use crate::db::DbPool;
use crate::entity::user;
use crate::error::AppError;

const NOT_LOGGED_IN: &str = "Not logged in";
const INVALID_SESSION: &str = "Invalid session";

/// Extractor that requires a valid session cookie.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: SessionAuth) -> impl Responder {
///     // auth.user is the caller's row
/// }
/// ```
///
/// For optional authentication use [`OptionalSessionAuth`].
#[derive(Debug, Clone)]
pub struct SessionAuth {
    pub user: user::Model,
}

impl SessionAuth {
    pub fn user_id(&self) -> i32 {
        self.user.id
    }
}

/// Extractor for pages that render for anonymous and signed-in visitors alike.
///
/// A missing, malformed or stale cookie yields `None`. Store failures still
/// surface as errors instead of silently serving the anonymous view.
#[derive(Debug, Clone)]
pub struct OptionalSessionAuth(pub Option<SessionAuth>);

/// Extractor that requires a valid session belonging to an administrator.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub user: user::Model,
}

fn session_token(req: &HttpRequest) -> Option<SecretString> {
    req.cookie(SESSION_COOKIE)
        .map(|c| SecretString::from(c.value().to_string()))
}

async fn resolve(
    pool: Option<web::Data<DbPool>>,
    token: Option<SecretString>,
) -> Result<user::Model, AppError> {
    let pool =
        pool.ok_or_else(|| AppError::Internal("Internal configuration error".to_string()))?;
    let token = token.ok_or_else(|| AppError::Unauthorized(NOT_LOGGED_IN.to_string()))?;

    if Uuid::parse_str(token.expose_secret()).is_err() {
        return Err(AppError::Unauthorized(INVALID_SESSION.to_string()));
    }

    pool.find_session_user(token.expose_secret())
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_SESSION.to_string()))
}

impl FromRequest for SessionAuth {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let user = resolve(pool, token).await?;
            Ok(SessionAuth { user })
        })
    }
}

impl FromRequest for OptionalSessionAuth {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            match resolve(pool, token).await {
                Ok(user) => Ok(OptionalSessionAuth(Some(SessionAuth { user }))),
                Err(AppError::Unauthorized(_)) => Ok(OptionalSessionAuth(None)),
                Err(e) => Err(e),
            }
        })
    }
}

impl FromRequest for AdminAuth {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let user = resolve(pool, token).await?;
            if !user.is_admin {
                return Err(AppError::Forbidden(
                    "Administrator access required".to_string(),
                ));
            }
            Ok(AdminAuth { user })
        })
    }
}
