use std::fmt;
use std::io;

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::api::http::HttpError;

pub type SdkResult<T> = Result<T, SdkError>;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("authentication error: {0}")]
    Authentication(ApiError),
    #[error("not found: {0}")]
    NotFound(ApiError),
    #[error("rate limit exceeded: {0}")]
    RateLimit(ApiError),
    #[error("internal server error: {0}")]
    InternalServer(ApiError),
    #[error("api error {}: {}", .0.status.as_u16(), .0.message)]
    Api(ApiError),
    #[error("connection error: {0}")]
    Connection(#[from] HttpError),
    #[error("invalid json response from api: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    NotFound,
    RateLimit,
    InternalServer,
    Api,
    Connection,
    Decode,
    Other,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub body: Value,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl SdkError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::InternalServer(_) => ErrorKind::InternalServer,
            Self::Api(_) => ErrorKind::Api,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Other(message) => message.clone(),
            Self::Connection(err) => err.to_string(),
            Self::Decode(err) => err.to_string(),
            _ => self
                .api_error()
                .map(|api| api.message.clone())
                .unwrap_or_default(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.api_error().map(|api| api.status)
    }

    pub fn raw_response(&self) -> Option<&Value> {
        self.api_error().map(|api| &api.body)
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Authentication(api)
            | Self::NotFound(api)
            | Self::RateLimit(api)
            | Self::InternalServer(api)
            | Self::Api(api) => Some(api),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Sdk(#[from] SdkError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
