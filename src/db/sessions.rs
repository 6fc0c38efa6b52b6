//! Database operations for login sessions.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::entity::session::{self, ActiveModel, Entity as Session};
use crate::entity::user;
use crate::error::AppResult;

use super::DbPool;

impl DbPool {
    /// Store a new session token for a user.
    pub async fn insert_session(&self, user_id: i32, token: &str) -> AppResult<session::Model> {
        let model = ActiveModel {
            user_id: Set(user_id),
            token: Set(token.to_string()),
            ..Default::default()
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Resolve a token to the owning user in one query.
    ///
    /// Sessions whose user row is gone resolve to `None`.
    pub async fn find_session_user(&self, token: &str) -> AppResult<Option<user::Model>> {
        let found = Session::find()
            .filter(session::Column::Token.eq(token))
            .find_also_related(user::Entity)
            .one(self.connection())
            .await?;

        Ok(found.and_then(|(_, user)| user))
    }

    /// Delete a session by token. Unknown tokens are not an error.
    pub async fn delete_session(&self, token: &str) -> AppResult<u64> {
        let result = Session::delete_many()
            .filter(session::Column::Token.eq(token))
            .exec(self.connection())
            .await?;
        Ok(result.rows_affected)
    }
}
