use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};

use crate::{
    model::ResourceTyped,
    notify::{Toast, ToastId},
    web::{AppState, WebError, WebResult, error::ErrorResponse},
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(notifications_list_handler))
        .route("/{id}", delete(notification_dismiss_handler))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    description = "Toasts that have not expired yet, oldest first",
    responses(
        (status = 200, description = "Active toasts", body = Vec<Toast>),
    ),
    tag = "notifications"
)]
async fn notifications_list_handler(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    Ok((StatusCode::OK, Json(state.toasts().active())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/notifications/{id}",
    params(("id" = u64, Path, description = "Toast id")),
    responses(
        (status = 200, description = "Dismissed toast", body = Toast),
        (status = 404, description = "Toast already gone", body = ErrorResponse),
    ),
    tag = "notifications"
)]
async fn notification_dismiss_handler(
    Path(id): Path<ToastId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let toast = state
        .toasts()
        .dismiss(id)
        .ok_or_else(|| WebError::resource_not_found(Toast::get_resource_type()))?;

    Ok((StatusCode::OK, Json(toast)))
}
