use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    auth,
    web::{AppState, RequestContext, context::AuthenticatedUser, error::WebError},
};

pub static AUTH_TOKEN: &str = "SID";

/// Resolves the `SID` cookie into a [`RequestContext`]. No cookie means an
/// anonymous caller; a cookie that does not verify is rejected outright.
pub async fn extract_context_fn(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(token) = cookies.get(AUTH_TOKEN) else {
        req.extensions_mut().insert(RequestContext::anonymous());
        return Ok(next.run(req).await);
    };

    let data = auth::process_token(token.value(), state.config().app().jwt())
        .map_err(|e| WebError::auth_cookie_invalid(AUTH_TOKEN, e))?;
    let user_id = data
        .claims
        .user_id()
        .map_err(|e| WebError::auth_cookie_invalid(AUTH_TOKEN, e))?;

    tracing::trace!(%user_id, "request authenticated");
    req.extensions_mut().insert(RequestContext::new(Some(AuthenticatedUser::new(
        user_id,
        data.claims.loyalty_points,
    ))));

    Ok(next.run(req).await)
}
