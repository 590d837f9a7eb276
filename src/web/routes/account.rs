use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    model::ResourceType,
    notify::{NotificationSink, Severity},
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::account::{AccountResponse, MentorshipRequest, MentorshipResponse},
        error::ErrorResponse,
        middlewares,
    },
};

const MENTORSHIP_SUBMITTED: &str = "Mentorship request submitted!";

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/account/me", get(account_me_handler))
        .route("/mentorship", post(mentorship_request_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/account/me",
    description = "Whether the caller is signed in, and their loyalty points",
    responses(
        (status = 200, description = "Account summary", body = AccountResponse),
        (status = 400, description = "Cookie invalid", body = ErrorResponse),
    ),
    tag = "account"
)]
async fn account_me_handler(ctx: RequestContext) -> WebResult<impl IntoResponse> {
    let body = match ctx.maybe_user() {
        Some(user) => AccountResponse {
            authenticated: true,
            loyalty_points: user.loyalty_points(),
        },
        None => AccountResponse {
            authenticated: false,
            loyalty_points: 0,
        },
    };

    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    post,
    path = "/api/v1/mentorship",
    request_body = MentorshipRequest,
    description = "Submits a mentorship request",
    responses(
        (status = 200, description = "Request accepted", body = MentorshipResponse),
        (status = 400, description = "Goals are empty", body = ErrorResponse),
        (status = 401, description = "You had to be authorized to do this", body = ErrorResponse),
    ),
    tag = "account",
    security(
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip(ctx, state))]
async fn mentorship_request_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(payload): Json<MentorshipRequest>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if payload.goals.trim().is_empty() {
        return Err(WebError::resource_bad_request(ResourceType::Mentorship));
    }

    tokio::time::sleep(state.config().app().mentorship_delay()).await;
    tracing::info!(user_id = %user.user_id(), topic = ?payload.topic, "mentorship requested");
    state.toasts().notify(MENTORSHIP_SUBMITTED, Severity::Success);

    Ok((
        StatusCode::OK,
        Json(MentorshipResponse {
            submitted: true,
            message: MENTORSHIP_SUBMITTED.to_string(),
        }),
    ))
}
