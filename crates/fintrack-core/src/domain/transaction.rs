//! Transaction booked against a category.

use crate::{CategoryId, TransactionId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Data accepted when creating or updating a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TransactionInput {
    #[validate(length(min = 3, max = 60, message = "Name must be 3 to 60 characters"))]
    pub name: String,

    /// Amount, checked against the category limit by storage.
    #[validate(range(min = 1, message = "Count must be a positive amount"))]
    pub count: i64,

    #[serde(default)]
    #[validate(length(max = 100, message = "Description must be at most 100 characters"))]
    pub description: String,
}

/// Transaction as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub id: TransactionId,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub name: String,
    pub count: i64,
    pub description: String,
}

impl TransactionOutput {
    /// Builds the output of a freshly created transaction.
    #[must_use]
    pub fn from_input(
        id: TransactionId,
        user_id: UserId,
        category_id: CategoryId,
        input: TransactionInput,
    ) -> Self {
        Self {
            id,
            user_id,
            category_id,
            name: input.name,
            count: input.count,
            description: input.description,
        }
    }
}
