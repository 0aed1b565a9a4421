//! API request handlers for sponsorship tracking operations

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    core::{account, account::Session, funding, funding::ItemFunding, item, sponsorship},
    entities::{item::Model as ItemModel, sponsorship::Model as SponsorshipModel},
    errors::Error,
};

use super::AppState;

/// Visitor login request
#[derive(Debug, Deserialize)]
pub struct VisitorLoginRequest {
    /// The shared passcode for one account's visitor view
    pub passcode: String,
}

/// Admin login request
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    /// Admin username
    pub username: String,
    /// Admin password
    pub password: String,
}

/// Response from either login path
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    /// Resolved role: "admin" or "visitor"
    pub role: account::Role,

    /// Display name of the account the session is scoped to
    pub display_name: String,
}

/// Request body for creating or editing an item
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    /// Item name
    pub name: String,

    /// Target price in dollars
    pub price: f64,

    /// Optional image reference (data URL or external URL)
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Funding overview of every item in the session's scope
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Items joined with their funding status, in creation order
    pub items: Vec<ItemFunding>,
}

/// Ledger for a single item
#[derive(Debug, Serialize)]
pub struct SponsorshipListResponse {
    /// Pledges in insertion order
    pub sponsorships: Vec<SponsorshipModel>,
}

/// Request body for recording a pledge
#[derive(Debug, Deserialize)]
pub struct SponsorRequest {
    /// The item being funded
    pub item_id: String,

    /// Display name of the sponsor
    pub sponsor_name: String,

    /// Pledged amount in dollars
    pub amount: f64,
}

/// Response from recording a pledge
#[derive(Debug, Serialize)]
pub struct SponsorResponse {
    /// The recorded pledge
    pub sponsorship: SponsorshipModel,

    /// One-shot acknowledgment addressed to the sponsor. Transient
    /// response data, never persisted.
    pub thank_you: String,
}

/// Request body for correcting a pledge
#[derive(Debug, Deserialize)]
pub struct SponsorshipPayload {
    /// Corrected sponsor name
    pub sponsor_name: String,

    /// Corrected amount
    pub amount: f64,
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status to respond with
    pub status: StatusCode,
    /// Message placed in the JSON error body
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Validation { .. }
            | Error::InvalidAmount { .. }
            | Error::ExceedsRemaining { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            Error::ItemNotFound { .. } | Error::SponsorshipNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Error::Config { .. } | Error::Database(_) | Error::Io(_) | Error::EnvVar(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the request's bearer token to a live session.
async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError {
        status: StatusCode::UNAUTHORIZED,
        message: "Missing bearer token".to_string(),
    })?;

    state
        .sessions
        .read()
        .await
        .get(token)
        .cloned()
        .ok_or(ApiError {
            status: StatusCode::UNAUTHORIZED,
            message: "Unknown or expired session".to_string(),
        })
}

/// Resolves the session and rejects non-admin roles.
async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<Session, ApiError> {
    let session = require_session(state, headers).await?;
    if !session.is_admin() {
        return Err(ApiError {
            status: StatusCode::FORBIDDEN,
            message: "Admin role required".to_string(),
        });
    }
    Ok(session)
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sponsorboard"
    }))
}

/// Visitor login: a single passcode resolves to a visitor session.
pub async fn login_visitor_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VisitorLoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = account::authenticate_visitor(&state.database, &payload.passcode).await?;
    info!(account_id = %session.account_id, "Visitor login");

    Ok(Json(register_session(&state, session).await))
}

/// Admin login: username/password resolves to an admin session.
pub async fn login_admin_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session =
        account::authenticate_admin(&state.database, &payload.username, &payload.password).await?;
    info!(account_id = %session.account_id, "Admin login");

    Ok(Json(register_session(&state, session).await))
}

/// Stores a freshly authenticated session and mints its bearer token.
async fn register_session(state: &AppState, session: Session) -> LoginResponse {
    let token = Uuid::new_v4().to_string();
    let response = LoginResponse {
        token: token.clone(),
        role: session.role,
        display_name: session.display_name.clone(),
    };
    state.sessions.write().await.insert(token, session);
    response
}

/// Logout: invalidates the bearer token.
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError {
        status: StatusCode::UNAUTHORIZED,
        message: "Missing bearer token".to_string(),
    })?;

    state.sessions.write().await.remove(token);
    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard read path: every item in the session's scope with its funding
/// status.
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, ApiError> {
    let session = require_session(&state, &headers).await?;

    let items = funding::funding_overview(&state.database, &session.account_id).await?;
    Ok(Json(DashboardResponse { items }))
}

/// Create an item in the acting admin's scope.
pub async fn create_item_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ItemPayload>,
) -> Result<(StatusCode, Json<ItemModel>), ApiError> {
    let session = require_admin(&state, &headers).await?;

    let created = item::create_item(
        &state.database,
        &session.account_id,
        payload.name,
        payload.price,
        payload.image_url,
    )
    .await?;
    info!(item_id = %created.id, "Created item");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Edit an item's name, price, and image reference.
pub async fn update_item_handler(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ItemPayload>,
) -> Result<Json<ItemModel>, ApiError> {
    let session = require_admin(&state, &headers).await?;

    let updated = item::update_item(
        &state.database,
        &session.account_id,
        &item_id,
        payload.name,
        payload.price,
        payload.image_url,
    )
    .await?;
    info!(item_id = %updated.id, "Updated item");

    Ok(Json(updated))
}

/// Delete an item and, atomically, every pledge referencing it.
pub async fn delete_item_handler(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let session = require_admin(&state, &headers).await?;

    item::delete_item(&state.database, &session.account_id, &item_id).await?;
    info!(item_id = %item_id, "Deleted item and its sponsorships");

    Ok(StatusCode::NO_CONTENT)
}

/// Ledger for one item, in insertion order.
pub async fn list_sponsorships_handler(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<SponsorshipListResponse>, ApiError> {
    let session = require_session(&state, &headers).await?;

    // Resolve the item through the session's scope before touching the
    // ledger, so out-of-scope ids read as missing.
    item::get_item_by_id(&state.database, &session.account_id, &item_id)
        .await?
        .ok_or_else(|| ApiError::from(Error::ItemNotFound {
            id: item_id.clone(),
        }))?;

    let sponsorships =
        sponsorship::get_sponsorships_for_item(&state.database, &item_id).await?;
    Ok(Json(SponsorshipListResponse { sponsorships }))
}

/// Record a pledge. Visitors and admins may both sponsor.
pub async fn create_sponsorship_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SponsorRequest>,
) -> Result<(StatusCode, Json<SponsorResponse>), ApiError> {
    let session = require_session(&state, &headers).await?;

    let created = sponsorship::create_sponsorship(
        &state.database,
        &session.account_id,
        &payload.item_id,
        payload.sponsor_name,
        payload.amount,
    )
    .await?;
    info!(sponsorship_id = %created.id, item_id = %created.item_id, "Recorded sponsorship");

    let thank_you = format!("Thank you, {}!", created.sponsor_name);
    Ok((
        StatusCode::CREATED,
        Json(SponsorResponse {
            sponsorship: created,
            thank_you,
        }),
    ))
}

/// Correct a pledge's sponsor name or amount.
pub async fn update_sponsorship_handler(
    State(state): State<Arc<AppState>>,
    Path(sponsorship_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<SponsorshipPayload>,
) -> Result<Json<SponsorshipModel>, ApiError> {
    let session = require_admin(&state, &headers).await?;

    let updated = sponsorship::update_sponsorship(
        &state.database,
        &session.account_id,
        &sponsorship_id,
        payload.sponsor_name,
        payload.amount,
    )
    .await?;
    info!(sponsorship_id = %updated.id, "Corrected sponsorship");

    Ok(Json(updated))
}
