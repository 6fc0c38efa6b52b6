//! Database operations for projects.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

use crate::entity::project::{self, ActiveModel, Entity as Project};
use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::models::ProjectRequest;
use crate::models::user::non_empty;

use super::DbPool;

impl DbPool {
    /// A user's projects, newest first.
    pub async fn list_projects(&self, user_id: i32) -> AppResult<Vec<project::Model>> {
        Ok(Project::find()
            .filter(project::Column::UserId.eq(user_id))
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(self.connection())
            .await?)
    }

    /// Projects of the user with the given name; empty for unknown names.
    pub async fn list_projects_by_username(
        &self,
        username: &str,
    ) -> AppResult<Vec<project::Model>> {
        Ok(Project::find()
            .join(JoinType::InnerJoin, project::Relation::User.def())
            .filter(user::Column::Username.eq(username))
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(self.connection())
            .await?)
    }

    pub async fn insert_project(
        &self,
        user_id: i32,
        req: &ProjectRequest,
    ) -> AppResult<project::Model> {
        let model = ActiveModel {
            user_id: Set(user_id),
            title: Set(req.title.clone()),
            description: Set(req.description.clone()),
            github_url: Set(non_empty(&req.github_url)),
            website_url: Set(non_empty(&req.website_url)),
            image_url1: Set(non_empty(&req.image_url1)),
            image_url2: Set(non_empty(&req.image_url2)),
            image_url3: Set(non_empty(&req.image_url3)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Fetch a project and check that `user_id` owns it.
    pub async fn find_owned_project(
        &self,
        id: i32,
        user_id: i32,
        action: &str,
    ) -> AppResult<project::Model> {
        let found = Project::find_by_id(id)
            .one(self.connection())
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if found.user_id != user_id {
            return Err(AppError::Forbidden(format!(
                "You don't have permission to {} this project",
                action
            )));
        }
        Ok(found)
    }

    /// Update an owned project; the owner predicate is repeated in the UPDATE.
    pub async fn update_project(
        &self,
        id: i32,
        user_id: i32,
        req: &ProjectRequest,
    ) -> AppResult<project::Model> {
        let result = Project::update_many()
            .col_expr(project::Column::Title, Expr::value(req.title.clone()))
            .col_expr(
                project::Column::Description,
                Expr::value(req.description.clone()),
            )
            .col_expr(project::Column::GithubUrl, Expr::value(non_empty(&req.github_url)))
            .col_expr(
                project::Column::WebsiteUrl,
                Expr::value(non_empty(&req.website_url)),
            )
            .col_expr(project::Column::ImageUrl1, Expr::value(non_empty(&req.image_url1)))
            .col_expr(project::Column::ImageUrl2, Expr::value(non_empty(&req.image_url2)))
            .col_expr(project::Column::ImageUrl3, Expr::value(non_empty(&req.image_url3)))
            .filter(project::Column::Id.eq(id))
            .filter(project::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }

        Project::find_by_id(id)
            .one(self.connection())
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn delete_project(&self, id: i32, user_id: i32) -> AppResult<()> {
        let result = Project::delete_many()
            .filter(project::Column::Id.eq(id))
            .filter(project::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
