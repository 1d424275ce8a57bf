//! Spending category.

use crate::{CategoryId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Data accepted when creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 3, max = 60, message = "Name must be 3 to 60 characters"))]
    pub name: String,

    /// Spending cap for transactions in this category.
    #[validate(range(min = 1, message = "Limit must be a positive amount"))]
    pub limit: i64,

    /// Free-text classifier used by query-by-type.
    #[serde(rename = "type", default)]
    #[validate(length(max = 100, message = "Type must be at most 100 characters"))]
    pub kind: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Description must be at most 100 characters"))]
    pub description: String,
}

/// Category as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOutput {
    pub id: CategoryId,
    pub user_id: UserId,
    pub name: String,
    pub limit: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

impl CategoryOutput {
    /// Builds the output of a freshly created category.
    #[must_use]
    pub fn from_input(id: CategoryId, user_id: UserId, input: CategoryInput) -> Self {
        Self {
            id,
            user_id,
            name: input.name,
            limit: input.limit,
            kind: input.kind,
            description: input.description,
        }
    }
}
