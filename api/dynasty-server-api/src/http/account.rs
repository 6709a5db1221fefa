use axum::{Json, extract::State, http::StatusCode};
use dynasty_server_app::workflow::account::AccountView;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::Auth,
    error::{ApiError, ApiJson},
    jwt::generate_jwt,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAccount {
    id: String,
    username: String,
    email: String,
    favorite_team: String,
    dynasty_ids: Vec<String>,
    created_at: String,
}

impl From<AccountView> for JsonAccount {
    fn from(account: AccountView) -> Self {
        JsonAccount {
            id: account.account_id.to_string(),
            username: account.username,
            email: account.email,
            favorite_team: account.favorite_team,
            dynasty_ids: account.dynasty_ids.iter().map(|id| id.to_string()).collect(),
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    token: String,
    user: JsonAccount,
}

fn issue(account: AccountView) -> Result<AuthResponse, ApiError> {
    let token = generate_jwt(account.account_id)?;
    Ok(AuthResponse {
        token,
        user: account.into(),
    })
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let account = state
        .app
        .account_register_use_case
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(issue(account)?)))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let account = state
        .app
        .account_login_use_case
        .login(&req.email, &req.password)
        .await?;
    Ok(Json(issue(account)?))
}

pub async fn me(Auth(account): Auth) -> Json<JsonAccount> {
    Json(account.into())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteTeam {
    #[serde(default)]
    favorite_team: String,
}

pub async fn get_favorite_team(
    Auth(account): Auth,
    State(state): State<AppState>,
) -> Result<Json<FavoriteTeam>, ApiError> {
    let favorite_team = state
        .app
        .account_favorite_team_use_case
        .get_favorite_team(account.account_id)
        .await?;
    Ok(Json(FavoriteTeam { favorite_team }))
}

pub async fn set_favorite_team(
    Auth(account): Auth,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FavoriteTeam>,
) -> Result<Json<FavoriteTeam>, ApiError> {
    let favorite_team = state
        .app
        .account_favorite_team_use_case
        .set_favorite_team(account.account_id, &req.favorite_team)
        .await?;
    Ok(Json(FavoriteTeam { favorite_team }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsernameRequest {
    #[serde(default)]
    new_username: String,
}

pub async fn update_username(
    Auth(account): Auth,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateUsernameRequest>,
) -> Result<Json<JsonAccount>, ApiError> {
    let account = state
        .app
        .account_change_username_use_case
        .change_username(account.account_id, &req.new_username)
        .await?;
    Ok(Json(account.into()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    old_password: String,
    #[serde(default)]
    new_password: String,
}

pub async fn update_password(
    Auth(account): Auth,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .app
        .account_change_password_use_case
        .change_password(account.account_id, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Password updated" })))
}
