//! Flat string-map encoding of cached entities.
//!
//! Field names are shared with other services reading the same hashes and
//! must not change. Missing string fields decode to empty strings; a missing
//! or malformed numeric field fails the decode, which callers treat as a miss.

use super::{cache_keys, CacheError, CacheFields};
use fintrack_core::{CategoryId, CategoryOutput, TransactionId, TransactionOutput, UserId};
use std::str::FromStr;

const USER_ID: &str = "userID";
const CATEGORY_ID: &str = "categoryID";
const NAME: &str = "name";
const TYPE: &str = "type";
const DESCRIPTION: &str = "description";
const LIMIT: &str = "limit";
const COUNT: &str = "count";

/// An entity that can be stored as a flat field map.
pub trait CacheRecord: Sized {
    /// Identifier the entry is keyed by. It is not part of the field map.
    type Id: Copy;

    /// Cache key for `id`.
    fn cache_key(id: Self::Id) -> String;

    /// Encodes every field except the id.
    fn to_fields(&self) -> CacheFields;

    /// Rebuilds the entity from its id and stored fields.
    fn from_fields(id: Self::Id, fields: &CacheFields) -> Result<Self, CacheError>;
}

fn text(fields: &CacheFields, name: &str) -> String {
    fields.get(name).cloned().unwrap_or_default()
}

fn number<T: FromStr>(fields: &CacheFields, name: &str) -> Result<T, CacheError> {
    let raw = fields
        .get(name)
        .ok_or_else(|| CacheError::Decode(format!("missing field '{name}'")))?;
    raw.parse()
        .map_err(|_| CacheError::Decode(format!("field '{name}' is not a number: '{raw}'")))
}

impl CacheRecord for CategoryOutput {
    type Id = CategoryId;

    fn cache_key(id: CategoryId) -> String {
        cache_keys::category(id)
    }

    fn to_fields(&self) -> CacheFields {
        CacheFields::from([
            (USER_ID.to_string(), self.user_id.to_string()),
            (NAME.to_string(), self.name.clone()),
            (TYPE.to_string(), self.kind.clone()),
            (DESCRIPTION.to_string(), self.description.clone()),
            (LIMIT.to_string(), self.limit.to_string()),
        ])
    }

    fn from_fields(id: CategoryId, fields: &CacheFields) -> Result<Self, CacheError> {
        Ok(Self {
            id,
            user_id: UserId::new(number(fields, USER_ID)?),
            name: text(fields, NAME),
            limit: number(fields, LIMIT)?,
            kind: text(fields, TYPE),
            description: text(fields, DESCRIPTION),
        })
    }
}

impl CacheRecord for TransactionOutput {
    type Id = TransactionId;

    fn cache_key(id: TransactionId) -> String {
        cache_keys::transaction(id)
    }

    fn to_fields(&self) -> CacheFields {
        CacheFields::from([
            (USER_ID.to_string(), self.user_id.to_string()),
            (CATEGORY_ID.to_string(), self.category_id.to_string()),
            (NAME.to_string(), self.name.clone()),
            (COUNT.to_string(), self.count.to_string()),
            (DESCRIPTION.to_string(), self.description.clone()),
        ])
    }

    fn from_fields(id: TransactionId, fields: &CacheFields) -> Result<Self, CacheError> {
        Ok(Self {
            id,
            user_id: UserId::new(number(fields, USER_ID)?),
            category_id: CategoryId::new(number(fields, CATEGORY_ID)?),
            name: text(fields, NAME),
            count: number(fields, COUNT)?,
            description: text(fields, DESCRIPTION),
        })
    }
}
