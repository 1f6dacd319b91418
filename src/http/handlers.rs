//! Route handlers.
//!
//! Each local route forwards to exactly one upstream endpoint and falls into
//! one of three shapes:
//! - a single call returning the envelope's `data`, optionally with date
//!   field normalization,
//! - a paginated aggregation flattening every page's `data` array,
//! - a fire-and-forget call whose upstream status is relayed with an empty
//!   body.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::auth::BearerToken;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::upstream::normalize::{normalize_each, normalize_fields};
use crate::upstream::pagination::fetch_all_pages;
use crate::upstream::DateFormat;

const NO_BODY: Option<&Value> = None;

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub coupon: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RenameRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct DevicesQuery {
    /// Lenient flag: anything other than a case-insensitive "true" is
    /// treated as false rather than rejected.
    #[serde(default)]
    pub deleted: String,
}

impl DevicesQuery {
    fn show_deleted(&self) -> bool {
        self.deleted.eq_ignore_ascii_case("true")
    }
}

/// POST /auth/register → POST users (unauthenticated).
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let data = state.client.post_data("users", &request).await?;
    Ok((StatusCode::CREATED, Json(data)))
}

/// POST /auth/token → POST users/tokens (unauthenticated).
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = state.client.post_data("users/tokens", &request).await?;
    Ok(Json(data))
}

/// GET /users/me → GET users/me, with `created_at` normalized.
pub async fn about_me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, ApiError> {
    let mut data = state.client.get_data("users/me", &token).await?;
    normalize_fields(&mut data, &[("created_at", DateFormat::Rfc3339Utc)])?;
    Ok(Json(data))
}

/// GET /users/tos → GET users/tos.
pub async fn tos_status(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.client.get_data("users/tos", &token).await?))
}

/// GET /stats/traffic → GET dashboards/traffic_stats, with each entry's
/// `date` normalized.
pub async fn traffic_stats(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, ApiError> {
    let mut data = state
        .client
        .get_data("dashboards/traffic_stats", &token)
        .await?;
    if let Some(entries) = data.get_mut("traffic_stats").and_then(Value::as_array_mut) {
        normalize_each(entries, &[("date", DateFormat::CalendarDate)])?;
    }
    Ok(Json(data))
}

/// GET /users/balances → GET users/balances.
pub async fn balances(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.client.get_data("users/balances", &token).await?))
}

/// GET /devices → aggregated GET devices, forwarding the `deleted` flag.
pub async fn list_devices(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Query(query): Query<DevicesQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let base_query: Vec<(&str, String)> = if query.show_deleted() {
        vec![("deleted", "true".to_string())]
    } else {
        Vec::new()
    };
    let devices = fetch_all_pages(
        &state.client,
        "devices",
        &base_query,
        &token,
        state.config.upstream.max_pages,
    )
    .await?;
    Ok(Json(devices))
}

/// GET /referrals → aggregated GET referrals.
pub async fn list_referrals(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Vec<Value>>, ApiError> {
    let referrals = fetch_all_pages(
        &state.client,
        "referrals",
        &[],
        &token,
        state.config.upstream.max_pages,
    )
    .await?;
    Ok(Json(referrals))
}

/// GET /transactions → aggregated GET transactions, with `booked_at` and
/// `created_at` normalized per record.
pub async fn list_transactions(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Vec<Value>>, ApiError> {
    let mut transactions = fetch_all_pages(
        &state.client,
        "transactions",
        &[],
        &token,
        state.config.upstream.max_pages,
    )
    .await?;
    normalize_each(
        &mut transactions,
        &[
            ("booked_at", DateFormat::SpaceSeparated),
            ("created_at", DateFormat::SpaceSeparated),
        ],
    )?;
    Ok(Json(transactions))
}

/// PUT /users/password → PUT users/passwords; upstream status relayed.
pub async fn change_password(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(request): Json<PasswordChangeRequest>,
) -> Result<StatusCode, ApiError> {
    let status = state
        .client
        .send_status(Method::PUT, "users/passwords", &token, Some(&request))
        .await?;
    Ok(status)
}

/// PUT /devices/{id}/title → PUT devices/{id}/titles; upstream status relayed.
pub async fn rename_device(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(device_id): Path<String>,
    Json(request): Json<RenameRequest>,
) -> Result<StatusCode, ApiError> {
    let path = format!("devices/{}/titles", device_id);
    let status = state
        .client
        .send_status(Method::PUT, &path, &token, Some(&request))
        .await?;
    Ok(status)
}

/// DELETE /devices/{id} → DELETE devices/{id}; upstream status relayed.
pub async fn delete_device(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let path = format!("devices/{}", device_id);
    let status = state
        .client
        .send_status(Method::DELETE, &path, &token, NO_BODY)
        .await?;
    Ok(status)
}

/// PATCH /devices/{id}/restore → PATCH devices/{id} with `deleted: false`;
/// upstream status relayed.
pub async fn restore_device(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let path = format!("devices/{}", device_id);
    let body = serde_json::json!({ "deleted": false });
    let status = state
        .client
        .send_status(Method::PATCH, &path, &token, Some(&body))
        .await?;
    Ok(status)
}
