//! Stub services and request helpers for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use fintrack_config::ServerConfig;
use fintrack_core::{
    CategoryId, CategoryInput, CategoryOutput, FintrackResult, RequestContext, ServiceError,
    TransactionId, TransactionInput, TransactionOutput, UserId, ValidateExt,
};
use fintrack_rest::{create_router, AppState, ReadinessCheck};
use fintrack_service::{CategoryService, TransactionService};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const KNOWN_CATEGORY: i64 = 1;
pub const KNOWN_TRANSACTION: i64 = 5;
pub const BROKEN_TRANSACTION: i64 = 500;
pub const CATEGORY_LIMIT: i64 = 1000;

/// Request id and owner of the last create call.
#[derive(Default)]
pub struct Seen {
    pub request_id: Mutex<Option<String>>,
    pub owner: Mutex<Option<UserId>>,
}

impl Seen {
    fn record(&self, ctx: &RequestContext, owner: UserId) {
        *self.request_id.lock().unwrap() = Some(ctx.request_id().to_string());
        *self.owner.lock().unwrap() = Some(owner);
    }
}

pub fn category(id: CategoryId) -> CategoryOutput {
    CategoryOutput {
        id,
        user_id: UserId::new(2),
        name: "food".to_string(),
        limit: CATEGORY_LIMIT,
        kind: "daily".to_string(),
        description: "d".to_string(),
    }
}

pub fn transaction(id: TransactionId) -> TransactionOutput {
    TransactionOutput {
        id,
        user_id: UserId::new(2),
        category_id: CategoryId::new(KNOWN_CATEGORY),
        name: "lunch".to_string(),
        count: 350,
        description: String::new(),
    }
}

#[derive(Default)]
pub struct StubCategories {
    pub seen: Seen,
}

#[async_trait]
impl CategoryService for StubCategories {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        input: CategoryInput,
    ) -> FintrackResult<CategoryId> {
        self.seen.record(ctx, owner);
        input.validate_request()?;
        if input.name == "taken" {
            return Err(ServiceError::Duplicated.into());
        }
        Ok(CategoryId::new(KNOWN_CATEGORY))
    }

    async fn get(&self, _ctx: &RequestContext, id: CategoryId) -> FintrackResult<CategoryOutput> {
        if id.into_inner() == KNOWN_CATEGORY {
            Ok(category(id))
        } else {
            Err(ServiceError::NotFound.into())
        }
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        input: CategoryInput,
    ) -> FintrackResult<CategoryOutput> {
        input.validate_request()?;
        let existing = self.get(ctx, id).await?;
        Ok(CategoryOutput::from_input(id, existing.user_id, input))
    }

    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> FintrackResult<()> {
        self.get(ctx, id).await.map(|_| ())
    }

    async fn find_by_type(
        &self,
        _ctx: &RequestContext,
        kind: &str,
    ) -> FintrackResult<Vec<CategoryOutput>> {
        match kind.trim() {
            "" => Err(ServiceError::ValidateType.into()),
            "daily" => Ok(vec![category(CategoryId::new(KNOWN_CATEGORY))]),
            _ => Ok(Vec::new()),
        }
    }
}

#[derive(Default)]
pub struct StubTransactions {
    pub seen: Seen,
}

#[async_trait]
impl TransactionService for StubTransactions {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        category: CategoryId,
        input: TransactionInput,
    ) -> FintrackResult<TransactionId> {
        self.seen.record(ctx, owner);
        input.validate_request()?;
        if category.into_inner() != KNOWN_CATEGORY {
            return Err(ServiceError::NotFound.into());
        }
        if input.count > CATEGORY_LIMIT {
            return Err(ServiceError::Limit.into());
        }
        Ok(TransactionId::new(KNOWN_TRANSACTION))
    }

    async fn get(
        &self,
        _ctx: &RequestContext,
        id: TransactionId,
    ) -> FintrackResult<TransactionOutput> {
        match id.into_inner() {
            KNOWN_TRANSACTION => Ok(transaction(id)),
            BROKEN_TRANSACTION => Err(ServiceError::Database.into()),
            _ => Err(ServiceError::NotFound.into()),
        }
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        input: TransactionInput,
    ) -> FintrackResult<TransactionOutput> {
        input.validate_request()?;
        let existing = self.get(ctx, id).await?;
        if input.count > CATEGORY_LIMIT {
            return Err(ServiceError::Limit.into());
        }
        Ok(TransactionOutput::from_input(
            id,
            existing.user_id,
            existing.category_id,
            input,
        ))
    }

    async fn delete(&self, ctx: &RequestContext, id: TransactionId) -> FintrackResult<()> {
        self.get(ctx, id).await.map(|_| ())
    }

    async fn list_by_category(
        &self,
        _ctx: &RequestContext,
        category: CategoryId,
    ) -> FintrackResult<Vec<TransactionOutput>> {
        if !category.is_valid() {
            return Err(ServiceError::ValidateType.into());
        }
        if category.into_inner() == KNOWN_CATEGORY {
            Ok(vec![transaction(TransactionId::new(KNOWN_TRANSACTION))])
        } else {
            Ok(Vec::new())
        }
    }
}

/// Readiness probe with a fixed answer.
pub struct FixedProbe(pub Result<(), String>);

#[async_trait]
impl ReadinessCheck for FixedProbe {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        self.0.clone()
    }
}

pub struct TestApp {
    pub router: Router,
    pub categories: Arc<StubCategories>,
    pub transactions: Arc<StubTransactions>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_probe(FixedProbe(Ok(())))
    }

    pub fn with_probe(probe: FixedProbe) -> Self {
        let categories = Arc::new(StubCategories::default());
        let transactions = Arc::new(StubTransactions::default());
        let state = AppState::new(
            categories.clone(),
            transactions.clone(),
            Duration::from_secs(5),
        )
        .with_readiness_check(Arc::new(probe));

        Self {
            router: create_router(state, &ServerConfig::default()),
            categories,
            transactions,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        into_json(response).await
    }
}

pub async fn into_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: &str, uri: &str, owner: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(owner) = owner {
        builder = builder.header("x-user-id", owner);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
