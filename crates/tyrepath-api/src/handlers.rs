//! Request handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tyrepath_query::{BrandCount, CatalogStats, SearchPage, SearchRequest};

use crate::error::ApiResult;
use crate::state::ApiState;

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

impl HealthStatus {
    fn connected() -> Self {
        Self {
            status: "ok".to_string(),
            database: "connected".to_string(),
        }
    }

    fn missing() -> Self {
        Self {
            status: "error".to_string(),
            database: "not found".to_string(),
        }
    }
}

/// `GET /api/search`
pub async fn search(
    State(state): State<ApiState>,
    Query(request): Query<SearchRequest>,
) -> ApiResult<Json<SearchPage>> {
    let page = state.search().search(&request).await?;
    Ok(Json(page))
}

/// `GET /api/stats`
pub async fn stats(State(state): State<ApiState>) -> ApiResult<Json<CatalogStats>> {
    Ok(Json(state.search().stats().await?))
}

/// `GET /api/brands`
pub async fn brands(State(state): State<ApiState>) -> ApiResult<Json<Vec<BrandCount>>> {
    Ok(Json(state.search().brands().await?))
}

/// `GET /api/health`
///
/// Reports whether the store file exists; its contents are not checked.
pub async fn health(State(state): State<ApiState>) -> (StatusCode, Json<HealthStatus>) {
    if state.search().catalog().is_available() {
        (StatusCode::OK, Json(HealthStatus::connected()))
    } else {
        tracing::warn!(
            "health check: store not found at {}",
            state.search().catalog().path().display()
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthStatus::missing()),
        )
    }
}
