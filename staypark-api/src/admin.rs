use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use staypark_admin::CatalogEntry;
use staypark_shared::{BookingType, Customer, DashboardStats};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    #[serde(rename = "type")]
    pub booking_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub customer_id: String,
    pub booking_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveResponse {
    pub customer_id: String,
    pub is_active: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/stats", get(get_stats))
        .route("/v1/admin/bookings", get(list_bookings))
        .route(
            "/v1/admin/customers/{customer_id}/bookings/{booking_id}/status",
            put(update_booking_status),
        )
        .route("/v1/admin/customers", get(list_customers))
        .route("/v1/admin/customers/{customer_id}/active", put(set_customer_active))
}

// ============================================================================
// Dashboard & Catalog Handlers
// ============================================================================

/// GET /v1/admin/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    if let Some(stats) = state.cache.stats().await {
        return Ok(Json(stats));
    }

    let generation = state.cache.generation().await;
    let stats = state.stats.compute_stats().await?;
    state.cache.put_stats(generation, stats).await;

    Ok(Json(stats))
}

/// GET /v1/admin/bookings?type=hotel|parking
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<CatalogEntry>>, AppError> {
    let filter = match query.booking_type.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<BookingType>()
                .map_err(|e| AppError::ValidationError(e.to_string()))?,
        ),
    };

    if let Some(entries) = state.cache.catalog(filter).await {
        return Ok(Json(entries));
    }

    let generation = state.cache.generation().await;
    let entries = state.catalog.list_bookings(filter).await?;
    state.cache.put_catalog(generation, filter, entries.clone()).await;

    Ok(Json(entries))
}

// ============================================================================
// Mutation Handlers
// ============================================================================

/// PUT /v1/admin/customers/{customer_id}/bookings/{booking_id}/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path((customer_id, booking_id)): Path<(String, String)>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .transitions
        .update_status(&customer_id, &booking_id, &req.status)
        .await?;
    state.cache.invalidate().await;

    Ok(Json(StatusResponse {
        customer_id,
        booking_id,
        status: req.status,
    }))
}

/// GET /v1/admin/customers
pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.customers.list_customers().await?))
}

/// PUT /v1/admin/customers/{customer_id}/active
pub async fn set_customer_active(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<ActiveResponse>, AppError> {
    state.customers.set_active(&customer_id, req.is_active).await?;
    state.cache.invalidate().await;

    Ok(Json(ActiveResponse {
        customer_id,
        is_active: req.is_active,
    }))
}
