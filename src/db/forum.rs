//! Database operations for the forum: posts, comments and the vote toggle.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::entity::{forum_comment, forum_post, forum_vote, user};
use crate::error::{AppError, AppResult};
use crate::models::{ForumComment, ForumPost, PostSort, UserSummary};

use super::{DbPool, page_offset};

/// Result of a vote toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    Added,
    Removed,
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

fn post_view(post: forum_post::Model, author: user::Model) -> ForumPost {
    ForumPost {
        id: post.id,
        user_id: post.user_id,
        title: post.title,
        content: post.content,
        url: post.url,
        score: post.score,
        created_at: post.created_at,
        user: UserSummary::from(author),
        comments: None,
        vote_status: None,
    }
}

impl DbPool {
    /// One page of posts with their authors. Comments are not loaded.
    pub async fn list_posts(
        &self,
        sort: PostSort,
        page: u64,
        limit: u64,
    ) -> AppResult<Vec<ForumPost>> {
        let mut query = forum_post::Entity::find();
        query = match sort {
            PostSort::Top => query
                .order_by_desc(forum_post::Column::Score)
                .order_by_desc(forum_post::Column::CreatedAt)
                .order_by_desc(forum_post::Column::Id),
            PostSort::Newest => query
                .order_by_desc(forum_post::Column::CreatedAt)
                .order_by_desc(forum_post::Column::Id),
        };

        let rows = query
            .find_also_related(user::Entity)
            .offset(page_offset(page, limit))
            .limit(limit)
            .all(self.connection())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(post, author)| author.map(|a| post_view(post, a)))
            .collect())
    }

    /// Full view of a post: author, comments oldest first, and the viewer's vote.
    ///
    /// `viewer_id` of `None` means an anonymous reader.
    pub async fn get_post(&self, id: i32, viewer_id: Option<i32>) -> AppResult<ForumPost> {
        let (post, author) = forum_post::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(self.connection())
            .await?
            .ok_or_else(post_not_found)?;
        let author = author.ok_or_else(post_not_found)?;

        let comments = forum_comment::Entity::find()
            .filter(forum_comment::Column::PostId.eq(id))
            .find_also_related(user::Entity)
            .order_by_asc(forum_comment::Column::CreatedAt)
            .order_by_asc(forum_comment::Column::Id)
            .all(self.connection())
            .await?
            .into_iter()
            .filter_map(|(c, author)| {
                author.map(|a| ForumComment {
                    id: c.id,
                    post_id: c.post_id,
                    user_id: c.user_id,
                    content: c.content,
                    created_at: c.created_at,
                    user: UserSummary::from(a),
                })
            })
            .collect();

        let vote_status = match viewer_id {
            Some(uid) if self.has_voted(id, uid).await? => Some(1),
            _ => None,
        };

        let mut view = post_view(post, author);
        view.comments = Some(comments);
        view.vote_status = vote_status;
        Ok(view)
    }

    pub async fn has_voted(&self, post_id: i32, user_id: i32) -> AppResult<bool> {
        let count = forum_vote::Entity::find()
            .filter(forum_vote::Column::PostId.eq(post_id))
            .filter(forum_vote::Column::UserId.eq(user_id))
            .count(self.connection())
            .await?;
        Ok(count > 0)
    }

    /// Create a post with score 0. Empty content or url are stored as NULL.
    pub async fn insert_post(
        &self,
        user_id: i32,
        title: &str,
        content: Option<String>,
        url: Option<String>,
    ) -> AppResult<forum_post::Model> {
        let model = forum_post::ActiveModel {
            user_id: Set(user_id),
            title: Set(title.to_string()),
            content: Set(content),
            url: Set(url),
            score: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Add a comment to an existing post.
    pub async fn insert_comment(
        &self,
        post_id: i32,
        user_id: i32,
        content: &str,
    ) -> AppResult<forum_comment::Model> {
        let exists = forum_post::Entity::find_by_id(post_id)
            .count(self.connection())
            .await?
            > 0;
        if !exists {
            return Err(post_not_found());
        }

        let model = forum_comment::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(user_id),
            content: Set(content.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Add the caller's vote, or remove it if present, and move the score by one.
    ///
    /// The first statement is a DELETE, so SQLite takes its write lock before
    /// anything is read and concurrent toggles on the same database serialize.
    pub async fn toggle_vote(&self, post_id: i32, user_id: i32) -> AppResult<VoteChange> {
        let txn = self.connection().begin().await?;

        let removed = forum_vote::Entity::delete_many()
            .filter(forum_vote::Column::PostId.eq(post_id))
            .filter(forum_vote::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let (change, delta) = if removed > 0 {
            (VoteChange::Removed, -1)
        } else {
            (VoteChange::Added, 1)
        };

        let updated = forum_post::Entity::update_many()
            .col_expr(
                forum_post::Column::Score,
                Expr::col(forum_post::Column::Score).add(delta),
            )
            .filter(forum_post::Column::Id.eq(post_id))
            .exec(&txn)
            .await?
            .rows_affected;

        if updated == 0 {
            txn.rollback().await?;
            return Err(post_not_found());
        }

        if change == VoteChange::Added {
            forum_vote::ActiveModel {
                post_id: Set(post_id),
                user_id: Set(user_id),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(change)
    }

    /// Number of vote rows for a post.
    pub async fn count_votes(&self, post_id: i32) -> AppResult<u64> {
        Ok(forum_vote::Entity::find()
            .filter(forum_vote::Column::PostId.eq(post_id))
            .count(self.connection())
            .await?)
    }
}
