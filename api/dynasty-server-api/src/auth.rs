use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use dynasty_server_app::{ServiceError, workflow::account::AccountView};

use crate::{AppState, ApiError, jwt::validate_jwt};

/// The account behind a valid bearer token.
pub struct Auth(pub AccountView);

impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| unauthorized("Missing bearer token"))?;

        let account_id = validate_jwt(bearer.token()).ok_or_else(|| unauthorized("Invalid token"))?;

        match state.app.account_get_use_case.get_account(account_id).await {
            Ok(account) => Ok(Auth(account)),
            Err(ServiceError::NotFound(_)) => {
                log::warn!("Token for unknown account {}", account_id);
                Err(unauthorized("Invalid token"))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn unauthorized(msg: &str) -> ApiError {
    ApiError(ServiceError::Unauthorized(msg.to_string()))
}
