//! Database operations for prompts.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

use crate::entity::prompt::{self, ActiveModel, Entity as Prompt};
use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::models::PromptRequest;
use crate::models::prompt::join_tags;

use super::DbPool;

impl DbPool {
    /// A user's prompts, newest first.
    pub async fn list_prompts(&self, user_id: i32) -> AppResult<Vec<prompt::Model>> {
        Ok(Prompt::find()
            .filter(prompt::Column::UserId.eq(user_id))
            .order_by_desc(prompt::Column::CreatedAt)
            .order_by_desc(prompt::Column::Id)
            .all(self.connection())
            .await?)
    }

    /// Prompts of the user with the given name; empty for unknown names.
    pub async fn list_prompts_by_username(&self, username: &str) -> AppResult<Vec<prompt::Model>> {
        Ok(Prompt::find()
            .join(JoinType::InnerJoin, prompt::Relation::User.def())
            .filter(user::Column::Username.eq(username))
            .order_by_desc(prompt::Column::CreatedAt)
            .order_by_desc(prompt::Column::Id)
            .all(self.connection())
            .await?)
    }

    pub async fn insert_prompt(
        &self,
        user_id: i32,
        req: &PromptRequest,
    ) -> AppResult<prompt::Model> {
        let model = ActiveModel {
            user_id: Set(user_id),
            title: Set(req.title.clone()),
            content: Set(req.content.clone()),
            tags: Set(Some(join_tags(&req.tags))),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Fetch a prompt and check that `user_id` owns it.
    pub async fn find_owned_prompt(
        &self,
        id: i32,
        user_id: i32,
        action: &str,
    ) -> AppResult<prompt::Model> {
        let found = Prompt::find_by_id(id)
            .one(self.connection())
            .await?
            .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;

        if found.user_id != user_id {
            return Err(AppError::Forbidden(format!(
                "You don't have permission to {} this prompt",
                action
            )));
        }
        Ok(found)
    }

    /// Update an owned prompt; the owner predicate is repeated in the UPDATE.
    pub async fn update_prompt(
        &self,
        id: i32,
        user_id: i32,
        req: &PromptRequest,
    ) -> AppResult<prompt::Model> {
        let result = Prompt::update_many()
            .col_expr(prompt::Column::Title, Expr::value(req.title.clone()))
            .col_expr(prompt::Column::Content, Expr::value(req.content.clone()))
            .col_expr(prompt::Column::Tags, Expr::value(join_tags(&req.tags)))
            .filter(prompt::Column::Id.eq(id))
            .filter(prompt::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Prompt not found".to_string()));
        }

        Prompt::find_by_id(id)
            .one(self.connection())
            .await?
            .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))
    }

    pub async fn delete_prompt(&self, id: i32, user_id: i32) -> AppResult<()> {
        let result = Prompt::delete_many()
            .filter(prompt::Column::Id.eq(id))
            .filter(prompt::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Prompt not found".to_string()));
        }
        Ok(())
    }
}
