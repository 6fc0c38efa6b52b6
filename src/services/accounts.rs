//! Account service: registration, password login and magic-link redemption.
//!
//! Handlers stay thin; everything that touches more than one table or needs
//! hashing lives here.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::auth::new_token;
use crate::auth::password::{self, Verification};
use crate::db::DbPool;
use crate::db::users::NewUser;
use crate::entity::{magic_link, user};
use crate::error::{AppError, AppResult};
use crate::models::RegisterRequest;
use crate::models::magic_link::DEFAULT_REDIRECT;

/// A freshly issued session.
#[derive(Debug)]
pub struct IssuedSession {
    pub token: String,
    pub user: user::Model,
}

/// Register a new account with an Argon2-hashed password.
pub async fn register(pool: &DbPool, req: &RegisterRequest) -> AppResult<user::Model> {
    let username = req.username.trim();
    let password = req.password.expose_secret();

    if username.is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }
    if password != req.confirm_password.expose_secret() {
        return Err(AppError::InvalidInput("Passwords do not match".to_string()));
    }

    if pool.find_user_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let new = NewUser {
        username: username.to_string(),
        password: password::hash_password(password)?,
        fullname: None,
        bio: Some(req.bio.clone()),
        linked_in_url: Some(req.linked_in_url.clone()),
        github_url: Some(req.github_url.clone()),
        photo_url: Some(req.photo_url.clone()),
    };

    let created = pool
        .insert_user(new)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Username already exists"))?;

    info!(user_id = created.id, username = %created.username, "User registered");
    Ok(created)
}

/// Check credentials and open a session.
///
/// Unknown users and wrong passwords produce the same error. A legacy
/// plaintext password is replaced by a hash on successful login.
pub async fn login(
    pool: &DbPool,
    username: &str,
    password: &SecretString,
) -> AppResult<IssuedSession> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let Some(found) = pool.find_user_by_username(username).await? else {
        warn!(username = %username, "Login failed: unknown user");
        return Err(invalid());
    };

    match password::verify_password(password.expose_secret(), &found.password) {
        Verification::Invalid => {
            warn!(user_id = found.id, "Login failed: wrong password");
            return Err(invalid());
        }
        Verification::ValidNeedsRehash => {
            let hashed = password::hash_password(password.expose_secret())?;
            pool.update_password(found.id, &hashed).await?;
            info!(user_id = found.id, "Upgraded legacy password to argon2");
        }
        Verification::Valid => {}
    }

    let session = open_session(pool, found).await?;
    info!(user_id = session.user.id, "User logged in");
    Ok(session)
}

/// Create a magic link for the caller. A blank redirect becomes `/`.
pub async fn create_magic_link(
    pool: &DbPool,
    user_id: i32,
    redirect_url: &str,
    now: DateTime<Utc>,
) -> AppResult<magic_link::Model> {
    let redirect = match redirect_url.trim() {
        "" => DEFAULT_REDIRECT,
        url => url,
    };

    let link = pool
        .insert_magic_link(user_id, &new_token(), redirect, now)
        .await?;
    info!(user_id, link_id = link.id, "Magic link created");
    Ok(link)
}

/// Redeem a magic link into a new session. Links stay valid until they expire.
pub async fn redeem_magic_link(
    pool: &DbPool,
    token: &str,
    now: DateTime<Utc>,
) -> AppResult<(IssuedSession, magic_link::Model)> {
    let not_found = || AppError::NotFound("Invalid or expired magic link".to_string());

    let link = pool
        .find_active_magic_link(token, now)
        .await?
        .ok_or_else(not_found)?;

    let owner = pool
        .find_user_by_id(link.user_id)
        .await?
        .ok_or_else(not_found)?;

    let session = open_session(pool, owner).await?;
    info!(user_id = session.user.id, link_id = link.id, "Magic link redeemed");
    Ok((session, link))
}

async fn open_session(pool: &DbPool, user: user::Model) -> AppResult<IssuedSession> {
    let token = new_token();
    pool.insert_session(user.id, &token).await?;
    Ok(IssuedSession { token, user })
}
