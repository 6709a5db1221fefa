use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dynasty_server_app::ServiceError;

/// HTTP face of a [`ServiceError`].
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ServiceError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::LimitExceeded(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            ServiceError::InvalidInput { message, .. } => message.clone(),
            ServiceError::NotFound(msg)
            | ServiceError::Forbidden(msg)
            | ServiceError::LimitExceeded(msg)
            | ServiceError::Unauthorized(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message(),
            "kind": self.0.kind(),
            "field": self.0.field(),
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        ApiError(value)
    }
}

impl From<dynasty_core::SeasonError> for ApiError {
    fn from(value: dynasty_core::SeasonError) -> Self {
        ApiError(value.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("Rejected request body: {}", rejection.body_text());
        ApiError(ServiceError::InvalidInput {
            field: None,
            message: rejection.body_text(),
        })
    }
}

/// `Json` whose rejections use the API error body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(error: ServiceError) -> (StatusCode, serde_json::Value) {
        let response = ApiError(error).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_input_carries_field() {
        let (status, body) = body_of(ServiceError::InvalidInput {
            field: Some("wins".to_string()),
            message: "wins must be a non-negative integer".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({
                "error": "wins must be a non-negative integer",
                "kind": "invalid_input",
                "field": "wins",
            })
        );
    }

    #[tokio::test]
    async fn test_status_per_kind() {
        let cases = [
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ServiceError::LimitExceeded("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            let kind = error.kind();
            let (status, body) = body_of(error).await;
            assert_eq!(status, expected);
            assert_eq!(body["kind"], kind);
            assert_eq!(body["field"], serde_json::Value::Null);
            assert_eq!(body["error"], "x");
        }
    }
}
