use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::{
    auth::CryptError,
    error::log_error,
    model::ResourceType,
    session::{Precondition, SessionError},
};

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("AuthenticationCookieInvalid, cookie: {cookie}. Error: {error}")]
    AuthenticationCookieInvalid { cookie: String, error: CryptError },

    #[error("AuthenticationRequired")]
    AuthenticationRequired,
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("ResourceNotFound: {resource_type:?}")]
    ResourceNotFound { resource_type: ResourceType },

    #[error("ResourceBadRequest: {resource_type:?}")]
    ResourceBadRequest { resource_type: ResourceType },
}

/// The operation is valid in general but not in the current state.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("PreconditionFailed: {0}")]
    PreconditionFailed(#[from] Precondition),
}

impl AuthenticationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::AuthenticationCookieInvalid { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::AuthenticationCookieInvalid { .. } => {
                String::from("Authentication error, cookie invalid.")
            }
            Self::AuthenticationRequired => String::from("Authentication required."),
        }
    }
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ResourceBadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceNotFound { .. } => String::from("Resource error, resource not found."),
            Self::ResourceBadRequest { .. } => String::from("Resource error, bad request."),
        }
    }
}

impl PreconditionError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::CONFLICT
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::PreconditionFailed(reason) => {
                let mut message = reason.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{message}.")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("ResourceError - {0}")]
    ResourceError(#[from] ResourceError),
    #[error("AuthenticationError - {0}")]
    AuthenticationError(#[from] AuthenticationError),
    #[error("PreconditionError - {0}")]
    PreconditionError(#[from] PreconditionError),
}

impl From<SessionError> for WebError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::NotFound { resource_type } => Self::resource_not_found(resource_type),
            SessionError::Rejected(reason) => Self::precondition_failed(reason),
        }
    }
}

impl WebError {
    pub fn resource_not_found(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceNotFound {
            resource_type: r#type,
        })
    }

    pub fn resource_bad_request(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceBadRequest {
            resource_type: r#type,
        })
    }

    pub fn auth_cookie_invalid<S: Into<String>>(cookie: S, error: CryptError) -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationCookieInvalid {
            cookie: cookie.into(),
            error,
        })
    }

    pub fn auth_required() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationRequired)
    }

    pub fn precondition_failed(reason: Precondition) -> Self {
        Self::PreconditionError(PreconditionError::PreconditionFailed(reason))
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            Self::ResourceError(e) => e.status_code(),
            Self::AuthenticationError(e) => e.status_code(),
            Self::PreconditionError(e) => e.status_code(),
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceError(e) => e.client_display(),
            Self::AuthenticationError(e) => e.client_display(),
            Self::PreconditionError(e) => e.client_display(),
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message for the client
    pub message: String,
    /// HTTP status code (stringified)
    pub status_code: String,
    /// Optional debug details (only in debug mode)
    pub details: Option<String>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            log_error(&self);
        } else {
            tracing::debug!("request rejected: {self}");
        }

        let body = ErrorResponse {
            message: self.client_display(),
            status_code: status_code.as_str().to_string(),
            details: cfg!(debug_assertions).then(|| self.to_string()),
        };

        (status_code, Json(body)).into_response()
    }
}
