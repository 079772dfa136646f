//! Request handlers.

use crate::error::ApiError;
use crate::models::{HealthResponse, ListPoolsResponse, PoolAprResponse, PoolSummary};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use farm_apr_domain::AprResult;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};

/// `GET /`: APR of the default pool under its legacy key,
/// e.g. `{"auroraswap_near_weth_apr": 1.03}`.
pub async fn default_pool_apr(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let breakdown = state.apr.calculate_default_apr().await?;
    let result = AprResult::from(&breakdown);

    let mut body = Map::new();
    body.insert(
        state.apr.farm().response_key(&result.pool_id),
        json_number(result.apr)?,
    );
    Ok(Json(Value::Object(body)))
}

/// `GET /pools/{id}/apr`: APR of any configured pool with its breakdown.
pub async fn pool_apr(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PoolAprResponse>, ApiError> {
    let breakdown = state.apr.calculate_apr(&id).await?;
    Ok(Json(breakdown.into()))
}

/// `GET /pools`: configured pools.
pub async fn list_pools(State(state): State<AppState>) -> Json<ListPoolsResponse> {
    let farm = state.apr.farm();
    Json(ListPoolsResponse {
        farm: farm.name.clone(),
        default_pool: farm.default_pool.clone(),
        pools: farm.pools.iter().map(PoolSummary::from).collect(),
    })
}

/// `GET /health`: liveness.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// A finite JSON number; never `null`.
fn json_number(value: Decimal) -> Result<Value, ApiError> {
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ApiError::Internal(format!("APR {value} is not representable")))
}
