use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // general
    #[error("{0}")]
    General(String, StatusCode),
    // http
    #[error("Param missing: {0}")]
    ParamMissing(String),
    #[error("Param error: {0}")]
    ParamError(String),
    #[error("no body provided")]
    BodyMissing,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("JSON parse error")]
    ParseError(#[from] serde_json::error::Error),
    #[error("HTTP general error")]
    HttpError(#[from] http::Error),
    #[error("Invalid URI")]
    InvalidUri(#[from] http::uri::InvalidUri),
    #[error("Config error")]
    ConfigError(#[from] config::ConfigError),
    #[error("Database error")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Database connection error")]
    PoolError(#[from] diesel::r2d2::PoolError),
    #[error("Error when calling remote server")]
    HttpClientError(#[from] hyper::Error),
    #[error("Upstream webhook returned {status}")]
    Upstream { status: StatusCode, body: String },
}

impl Error {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Error::General(_, status) => *status,
            Error::ParamMissing(_) => StatusCode::BAD_REQUEST,
            Error::ParamError(_) => StatusCode::BAD_REQUEST,
            Error::BodyMissing => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::ParseError(_) => StatusCode::BAD_REQUEST,
            Error::HttpError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidUri(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::DatabaseError(diesel::result::Error::NotFound) => StatusCode::NOT_FOUND,
            Error::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PoolError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::HttpClientError(_) => StatusCode::BAD_GATEWAY,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Underlying cause, rendered into the `details` field of error bodies.
    pub fn details(&self) -> Option<String> {
        match self {
            Error::ParseError(e) => Some(e.to_string()),
            Error::HttpError(e) => Some(e.to_string()),
            Error::InvalidUri(e) => Some(e.to_string()),
            Error::ConfigError(e) => Some(e.to_string()),
            Error::DatabaseError(e) => Some(e.to_string()),
            Error::PoolError(e) => Some(e.to_string()),
            Error::HttpClientError(e) => Some(e.to_string()),
            Error::Upstream { body, .. } if !body.is_empty() => Some(body.clone()),
            _ => None,
        }
    }
}
