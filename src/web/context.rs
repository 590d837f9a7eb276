//! Request context: who is calling, if anyone.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::web::{WebResult, error::WebError};

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user_id: Uuid,
    loyalty_points: u32,
}

impl AuthenticatedUser {
    pub fn new(user_id: Uuid, loyalty_points: u32) -> Self {
        Self {
            user_id,
            loyalty_points,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn loyalty_points(&self) -> u32 {
        self.loyalty_points
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    maybe_user: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn new(maybe_user: Option<AuthenticatedUser>) -> Self {
        Self { maybe_user }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn maybe_user(&self) -> Option<&AuthenticatedUser> {
        self.maybe_user.as_ref()
    }

    pub fn user(&self) -> WebResult<&AuthenticatedUser> {
        self.maybe_user.as_ref().ok_or(WebError::auth_required())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default())
    }
}
