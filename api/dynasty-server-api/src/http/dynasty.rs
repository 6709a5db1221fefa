use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use dynasty_server_app::{
    ServiceError,
    domain::DynastyId,
    workflow::dynasty::DynastyView,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::Auth,
    error::{ApiError, ApiJson},
    http::parse_id,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDynasty {
    id: String,
    owner_id: String,
    name: String,
    start_date: String,
    current_year: i32,
    shared_with: Vec<String>,
    created_at: String,
    updated_at: String,
}

impl From<DynastyView> for JsonDynasty {
    fn from(dynasty: DynastyView) -> Self {
        JsonDynasty {
            id: dynasty.dynasty_id.to_string(),
            owner_id: dynasty.owner_id.to_string(),
            name: dynasty.name,
            start_date: dynasty.start_date.format("%Y-%m-%d").to_string(),
            current_year: dynasty.current_year,
            shared_with: dynasty.shared_with.iter().map(|id| id.to_string()).collect(),
            created_at: dynasty.created_at.to_rfc3339(),
            updated_at: dynasty.updated_at.to_rfc3339(),
        }
    }
}

pub(super) fn dynasty_id(raw: &str) -> Result<DynastyId, ApiError> {
    parse_id(raw, "Dynasty").map(DynastyId)
}

/// Accepts a plain date or a full RFC 3339 timestamp.
fn parse_start_date(raw: &str) -> Result<NaiveDate, ApiError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| {
            ApiError(ServiceError::InvalidInput {
                field: Some("startDate".to_string()),
                message: "Start date must be a valid date".to_string(),
            })
        })
}

pub async fn list(
    Auth(account): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonDynasty>>, ApiError> {
    let dynasties = state
        .app
        .dynasty_list_use_case
        .list_dynasties(account.account_id)
        .await?;
    Ok(Json(dynasties.into_iter().map(JsonDynasty::from).collect()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDynastyRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    start_date: String,
    current_year: Option<i32>,
}

pub async fn create(
    Auth(account): Auth,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateDynastyRequest>,
) -> Result<(StatusCode, Json<JsonDynasty>), ApiError> {
    let start_date = parse_start_date(&req.start_date)?;
    let dynasty = state
        .app
        .dynasty_create_use_case
        .create_dynasty(account.account_id, &req.name, start_date, req.current_year)
        .await?;
    Ok((StatusCode::CREATED, Json(dynasty.into())))
}

pub async fn get(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JsonDynasty>, ApiError> {
    let dynasty = state
        .app
        .dynasty_get_use_case
        .get_dynasty(account.account_id, dynasty_id(&id)?)
        .await?;
    Ok(Json(dynasty.into()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDynastyRequest {
    name: Option<String>,
    start_date: Option<String>,
}

pub async fn update(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateDynastyRequest>,
) -> Result<Json<JsonDynasty>, ApiError> {
    let start_date = req.start_date.as_deref().map(parse_start_date).transpose()?;
    let dynasty = state
        .app
        .dynasty_update_use_case
        .update_dynasty(
            account.account_id,
            dynasty_id(&id)?,
            req.name.as_deref(),
            start_date,
        )
        .await?;
    Ok(Json(dynasty.into()))
}

pub async fn delete(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .dynasty_delete_use_case
        .delete_dynasty(account.account_id, dynasty_id(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ShareRequest {
    #[serde(default)]
    username: String,
}

pub async fn share(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ShareRequest>,
) -> Result<Json<JsonDynasty>, ApiError> {
    let dynasty = state
        .app
        .dynasty_share_use_case
        .share_dynasty(account.account_id, dynasty_id(&id)?, &req.username)
        .await?;
    Ok(Json(dynasty.into()))
}

pub async fn revoke(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path((id, username)): Path<(String, String)>,
) -> Result<Json<JsonDynasty>, ApiError> {
    let dynasty = state
        .app
        .dynasty_share_use_case
        .revoke_dynasty(account.account_id, dynasty_id(&id)?, &username)
        .await?;
    Ok(Json(dynasty.into()))
}
