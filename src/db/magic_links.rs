//! Database operations for magic links.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::magic_link::{self, ActiveModel, Entity as MagicLink};
use crate::error::AppResult;

use super::DbPool;

/// Lifetime of a magic link.
pub const MAGIC_LINK_TTL_DAYS: i64 = 7;

impl DbPool {
    /// Create a link expiring seven days after `now`.
    pub async fn insert_magic_link(
        &self,
        user_id: i32,
        token: &str,
        redirect_url: &str,
        now: DateTime<Utc>,
    ) -> AppResult<magic_link::Model> {
        let model = ActiveModel {
            user_id: Set(user_id),
            token: Set(token.to_string()),
            created_at: Set(now),
            expires_at: Set(now + Duration::days(MAGIC_LINK_TTL_DAYS)),
            redirect_url: Set(Some(redirect_url.to_string())),
            ..Default::default()
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// A user's links, newest first.
    pub async fn list_magic_links(&self, user_id: i32) -> AppResult<Vec<magic_link::Model>> {
        Ok(MagicLink::find()
            .filter(magic_link::Column::UserId.eq(user_id))
            .order_by_desc(magic_link::Column::CreatedAt)
            .order_by_desc(magic_link::Column::Id)
            .all(self.connection())
            .await?)
    }

    /// Look up a token that has not expired at `now`.
    pub async fn find_active_magic_link(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<magic_link::Model>> {
        let found = MagicLink::find()
            .filter(magic_link::Column::Token.eq(token))
            .one(self.connection())
            .await?;

        Ok(found.filter(|link| now <= link.expires_at))
    }

    /// Delete one of the caller's links; other users' ids match nothing.
    pub async fn delete_magic_link(&self, id: i32, user_id: i32) -> AppResult<u64> {
        let result = MagicLink::delete_many()
            .filter(magic_link::Column::Id.eq(id))
            .filter(magic_link::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;
        Ok(result.rows_affected)
    }
}
