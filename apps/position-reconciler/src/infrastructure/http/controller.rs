//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::dto::ReconciliationReportDto;
use crate::application::ports::TransactionSourcePort;
use crate::application::use_cases::{ReconcilePositionsRequest, ReconcilePositionsUseCase};
use crate::error::ApiError;

use super::request::{PositionsQuery, ReconcileRequest};
use super::response::HealthResponse;

/// Application state shared across handlers.
pub struct AppState<S>
where
    S: TransactionSourcePort,
{
    /// Use case for reconciling positions.
    pub reconcile: Arc<ReconcilePositionsUseCase<S>>,
    /// Configured source kind, reported by `/health`.
    pub source: String,
    /// Application version.
    pub version: String,
}

impl<S> AppState<S>
where
    S: TransactionSourcePort,
{
    /// Create state around a transaction source.
    pub fn new(source: Arc<S>, source_kind: impl Into<String>) -> Self {
        Self {
            reconcile: Arc::new(ReconcilePositionsUseCase::new(source)),
            source: source_kind.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl<S> Clone for AppState<S>
where
    S: TransactionSourcePort,
{
    fn clone(&self) -> Self {
        Self {
            reconcile: Arc::clone(&self.reconcile),
            source: self.source.clone(),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: TransactionSourcePort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/positions", get(get_positions))
        .route("/api/v1/reconcile", post(reconcile_records))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<S>(State(state): State<AppState<S>>) -> impl IntoResponse
where
    S: TransactionSourcePort,
{
    Json(HealthResponse::healthy(
        state.version.clone(),
        state.source.clone(),
    ))
}

/// Reconcile the configured ledger.
async fn get_positions<S>(
    State(state): State<AppState<S>>,
    query: Result<Query<PositionsQuery>, QueryRejection>,
) -> Result<Json<ReconciliationReportDto>, ApiError>
where
    S: TransactionSourcePort,
{
    let Query(query) = query.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let mut request = ReconcilePositionsRequest::all(query.as_of_date()?);
    if let Some(underlying) = query.underlying_symbol()? {
        request = request.for_underlying(underlying);
    }

    let report = state.reconcile.execute(request).await?;
    Ok(Json(report))
}

/// Reconcile records posted in the request body.
async fn reconcile_records<S>(
    State(state): State<AppState<S>>,
    body: Result<Json<ReconcileRequest>, JsonRejection>,
) -> Result<Json<ReconciliationReportDto>, ApiError>
where
    S: TransactionSourcePort,
{
    let Json(request) = body.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let as_of = request.as_of_date()?;

    let report = state.reconcile.reconcile_records(&request.records, as_of)?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpErrorResponse;
    use crate::infrastructure::source::InMemoryTransactionSource;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        let source = Arc::new(InMemoryTransactionSource::new());
        create_router(AppState::new(source, "memory"))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn positions_rejects_bad_as_of() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/positions?as_of=soon")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn positions_rejects_undecodable_query_as_json() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/positions?underlying=riot&underlying=clsk")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: HttpErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, "INVALID_REQUEST");
        assert!(body.message.contains("underlying"));
    }

    #[tokio::test]
    async fn reconcile_rejects_malformed_body() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/reconcile")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"records\": 5}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
