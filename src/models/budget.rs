//! Budget models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::budget_category;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BudgetCategory {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<budget_category::Model> for BudgetCategory {
    fn from(m: budget_category::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BudgetTransaction {
    pub id: i32,
    pub user_id: i32,
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTransactionCategoryRequest {
    pub transaction_id: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
}

/// One row of a bulk import. `amount` may be a JSON number or a numeric string.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportTransaction {
    #[serde(default)]
    pub date: String,
    #[schema(value_type = f64)]
    pub amount: serde_json::Value,
    #[serde(default)]
    pub description: String,
}

impl ImportTransaction {
    /// Numeric amount, or `None` when the value is not a number.
    pub fn parsed_amount(&self) -> Option<f64> {
        match &self.amount {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|a| a.is_finite())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BulkImportRequest {
    pub transactions: Vec<ImportTransaction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkImportResponse {
    pub status: String,
    pub message: String,
    pub count: usize,
}
