//! Database operations for budget categories and transactions.

use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::warn;

use crate::entity::budget_category::{self, Entity as Category};
use crate::entity::budget_transaction::{self, Entity as Transaction};
use crate::error::{AppError, AppResult};
use crate::models::{BudgetTransaction, ImportTransaction};

use super::DbPool;

const DUPLICATE_CATEGORY: &str = "Category already exists";

impl DbPool {
    /// A user's categories, alphabetical.
    pub async fn list_categories(&self, user_id: i32) -> AppResult<Vec<budget_category::Model>> {
        Ok(Category::find()
            .filter(budget_category::Column::UserId.eq(user_id))
            .order_by_asc(budget_category::Column::Name)
            .all(self.connection())
            .await?)
    }

    /// Create a category; a duplicate name for the same user is a conflict.
    pub async fn insert_category(
        &self,
        user_id: i32,
        name: &str,
    ) -> AppResult<budget_category::Model> {
        budget_category::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.connection())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_CATEGORY))
    }

    /// Rename one of the caller's categories.
    pub async fn rename_category(
        &self,
        id: i32,
        user_id: i32,
        name: &str,
    ) -> AppResult<budget_category::Model> {
        let result = Category::update_many()
            .col_expr(budget_category::Column::Name, Expr::value(name))
            .filter(budget_category::Column::Id.eq(id))
            .filter(budget_category::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_CATEGORY))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        Category::find_by_id(id)
            .one(self.connection())
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// A user's transactions, newest date first, with category names attached.
    pub async fn list_transactions(&self, user_id: i32) -> AppResult<Vec<BudgetTransaction>> {
        let rows = Transaction::find()
            .filter(budget_transaction::Column::UserId.eq(user_id))
            .find_also_related(Category)
            .order_by_desc(budget_transaction::Column::Date)
            .order_by_desc(budget_transaction::Column::Id)
            .all(self.connection())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(t, category)| BudgetTransaction {
                id: t.id,
                user_id: t.user_id,
                date: t.date,
                amount: t.amount,
                description: t.description,
                category_id: t.category_id,
                created_at: t.created_at,
                category_name: category.map(|c| c.name),
            })
            .collect())
    }

    /// Point a transaction at one of the caller's categories, or clear it.
    ///
    /// Missing transaction is 404, a foreign one 403, and a category that is
    /// missing or owned by someone else is 404.
    pub async fn set_transaction_category(
        &self,
        transaction_id: i32,
        category_id: Option<i32>,
        user_id: i32,
    ) -> AppResult<()> {
        let txn_row = Transaction::find_by_id(transaction_id)
            .one(self.connection())
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        if txn_row.user_id != user_id {
            return Err(AppError::Forbidden(
                "You don't have permission to update this transaction".to_string(),
            ));
        }

        let mut condition = Condition::all()
            .add(budget_transaction::Column::Id.eq(transaction_id))
            .add(budget_transaction::Column::UserId.eq(user_id));

        if let Some(cid) = category_id {
            let owned = Category::find()
                .filter(budget_category::Column::Id.eq(cid))
                .filter(budget_category::Column::UserId.eq(user_id))
                .one(self.connection())
                .await?
                .is_some();
            if !owned {
                return Err(AppError::NotFound("Category not found".to_string()));
            }

            condition = condition.add(Expr::exists(
                Query::select()
                    .expr(Expr::val(1))
                    .from(Category)
                    .and_where(budget_category::Column::Id.eq(cid))
                    .and_where(budget_category::Column::UserId.eq(user_id))
                    .to_owned(),
            ));
        }

        let result = Transaction::update_many()
            .col_expr(budget_transaction::Column::CategoryId, Expr::value(category_id))
            .filter(condition)
            .exec(self.connection())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }
        Ok(())
    }

    /// Insert every row in one transaction. Any bad row rolls back the batch.
    pub async fn import_transactions(
        &self,
        user_id: i32,
        rows: &[ImportTransaction],
    ) -> AppResult<usize> {
        let txn = self.connection().begin().await?;
        let now = Utc::now();

        for (index, row) in rows.iter().enumerate() {
            let Some(amount) = row.parsed_amount() else {
                warn!(user_id, row = index, "Bulk import aborted: non-numeric amount");
                txn.rollback().await?;
                return Err(AppError::Internal(format!(
                    "Failed to import transaction {}: invalid amount",
                    index + 1
                )));
            };

            budget_transaction::ActiveModel {
                user_id: Set(user_id),
                date: Set(row.date.clone()),
                amount: Set(amount),
                description: Set(row.description.clone()),
                category_id: Set(None),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(rows.len())
    }
}
