use dynasty_core::SeasonError;
use thiserror::Error;

use crate::domain::{RepoError, RepoRetrieveError, RepoUpdateError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("{message}")]
    InvalidInput {
        field: Option<String>,
        message: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid_input<R>(field: &str, msg: impl Into<String>) -> ServiceResult<R> {
        Err(ServiceError::InvalidInput {
            field: Some(field.to_string()),
            message: msg.into(),
        })
    }

    pub fn not_found<R>(msg: impl Into<String>) -> ServiceResult<R> {
        Err(ServiceError::NotFound(msg.into()))
    }

    pub fn forbidden<R>(msg: impl Into<String>) -> ServiceResult<R> {
        Err(ServiceError::Forbidden(msg.into()))
    }

    pub fn limit_exceeded<R>(msg: impl Into<String>) -> ServiceResult<R> {
        Err(ServiceError::LimitExceeded(msg.into()))
    }

    pub fn unauthorized<R>(msg: impl Into<String>) -> ServiceResult<R> {
        Err(ServiceError::Unauthorized(msg.into()))
    }

    pub fn conflict<R>(msg: impl Into<String>) -> ServiceResult<R> {
        Err(ServiceError::Conflict(msg.into()))
    }

    pub fn internal<R>(msg: impl Into<String>) -> ServiceResult<R> {
        Err(ServiceError::Internal(msg.into()))
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput { .. } => "invalid_input",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Forbidden(_) => "forbidden",
            ServiceError::LimitExceeded(_) => "limit_exceeded",
            ServiceError::Unauthorized(_) => "unauthorized",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::Internal(_) => "internal",
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ServiceError::InvalidInput { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<SeasonError> for ServiceError {
    fn from(e: SeasonError) -> Self {
        match e {
            SeasonError::SeasonNotFound(_) => ServiceError::NotFound(e.to_string()),
            SeasonError::SeasonLocked(_) => ServiceError::Forbidden(e.to_string()),
            SeasonError::DuplicateSeason(_) => ServiceError::Conflict(e.to_string()),
            SeasonError::InvalidInput { field, message } => ServiceError::InvalidInput {
                field: Some(field.to_string()),
                message,
            },
        }
    }
}

/// Storage failures are logged where they happen; callers only see a generic message.
pub(crate) fn storage_failure(context: &str, e: impl std::fmt::Display) -> ServiceError {
    log::error!("{}: {}", context, e);
    ServiceError::Internal(format!("{} failed", context))
}

pub(crate) fn from_retrieve(context: &str, what: &str, e: RepoRetrieveError) -> ServiceError {
    match e {
        RepoRetrieveError::NotFound => ServiceError::NotFound(format!("{} not found", what)),
        RepoRetrieveError::StorageError(e) => storage_failure(context, e),
    }
}

pub(crate) fn from_update(context: &str, what: &str, e: RepoUpdateError) -> ServiceError {
    match e {
        RepoUpdateError::NotFound => ServiceError::NotFound(format!("{} not found", what)),
        RepoUpdateError::Conflict => ServiceError::Conflict(format!("{} already exists", what)),
        RepoUpdateError::StorageError(e) => storage_failure(context, e),
    }
}

pub(crate) fn from_repo(context: &str, e: RepoError) -> ServiceError {
    match e {
        RepoError::StorageError(e) => storage_failure(context, e),
    }
}
