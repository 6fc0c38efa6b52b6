//! Database operations for users.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::entity::session;
use crate::entity::user::{self, ActiveModel, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{AdminUpdateUserRequest, UpdateProfileRequest};

use super::{DbPool, page_offset};

/// Fields stored for a new account. `password` is already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub fullname: Option<String>,
    pub bio: Option<String>,
    pub linked_in_url: Option<String>,
    pub github_url: Option<String>,
    pub photo_url: Option<String>,
}

impl DbPool {
    /// Insert a user. Unique-name violations surface as the raw `DbErr`
    /// so the caller can decide how to report them.
    pub async fn insert_user(&self, new: NewUser) -> Result<user::Model, sea_orm::DbErr> {
        let model = ActiveModel {
            username: Set(new.username),
            password: Set(new.password),
            fullname: Set(new.fullname),
            bio: Set(new.bio),
            linked_in_url: Set(new.linked_in_url),
            github_url: Set(new.github_url),
            photo_url: Set(new.photo_url),
            created_at: Set(Utc::now()),
            is_admin: Set(false),
            ..Default::default()
        };

        model.insert(self.connection()).await
    }

    /// Find a user by ID.
    pub async fn find_user_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        Ok(UserEntity::find_by_id(id).one(self.connection()).await?)
    }

    /// Find a user by username.
    pub async fn find_user_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        Ok(UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.connection())
            .await?)
    }

    /// The first three accounts, oldest first.
    pub async fn homepage_users(&self) -> AppResult<Vec<user::Model>> {
        Ok(UserEntity::find()
            .order_by_asc(user::Column::Id)
            .limit(3)
            .all(self.connection())
            .await?)
    }

    /// Update the self-service profile fields. Full name and admin flag are untouched.
    pub async fn update_profile(&self, id: i32, req: &UpdateProfileRequest) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Bio, Expr::value(req.bio.clone()))
            .col_expr(user::Column::LinkedInUrl, Expr::value(req.linked_in_url.clone()))
            .col_expr(user::Column::GithubUrl, Expr::value(req.github_url.clone()))
            .col_expr(user::Column::PhotoUrl, Expr::value(req.photo_url.clone()))
            .filter(user::Column::Id.eq(id))
            .exec(self.connection())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    /// Replace the stored password hash.
    pub async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<()> {
        UserEntity::update_many()
            .col_expr(user::Column::Password, Expr::value(password_hash))
            .filter(user::Column::Id.eq(id))
            .exec(self.connection())
            .await?;
        Ok(())
    }

    /// One page of users, newest first, plus the total row count.
    pub async fn list_users(
        &self,
        page: u64,
        page_size: u64,
    ) -> AppResult<(Vec<user::Model>, u64)> {
        let total = UserEntity::find().count(self.connection()).await?;

        let users = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .offset(page_offset(page, page_size))
            .limit(page_size)
            .all(self.connection())
            .await?;

        Ok((users, total))
    }

    /// All users ordered by id.
    pub async fn all_users(&self) -> AppResult<Vec<user::Model>> {
        Ok(UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(self.connection())
            .await?)
    }

    /// Administrative edit of every profile column plus the admin flag.
    pub async fn admin_update_user(
        &self,
        id: i32,
        username: &str,
        req: &AdminUpdateUserRequest,
    ) -> Result<(), sea_orm::DbErr> {
        UserEntity::update_many()
            .col_expr(user::Column::Username, Expr::value(username))
            .col_expr(user::Column::Fullname, Expr::value(req.fullname.clone()))
            .col_expr(user::Column::Bio, Expr::value(req.bio.clone()))
            .col_expr(user::Column::LinkedInUrl, Expr::value(req.linked_in_url.clone()))
            .col_expr(user::Column::GithubUrl, Expr::value(req.github_url.clone()))
            .col_expr(user::Column::PhotoUrl, Expr::value(req.photo_url.clone()))
            .col_expr(user::Column::IsAdmin, Expr::value(req.is_admin))
            .filter(user::Column::Id.eq(id))
            .exec(self.connection())
            .await?;
        Ok(())
    }

    /// Set the admin flag by username. Returns false when no such user exists.
    pub async fn set_admin(&self, username: &str, is_admin: bool) -> AppResult<bool> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::IsAdmin, Expr::value(is_admin))
            .filter(user::Column::Username.eq(username))
            .exec(self.connection())
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Delete a user and their sessions atomically. Returns false when the user is absent.
    pub async fn delete_user(&self, id: i32) -> AppResult<bool> {
        let txn = self.connection().begin().await?;

        session::Entity::delete_many()
            .filter(session::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        let result = UserEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        Ok(true)
    }
}
