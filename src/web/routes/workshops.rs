use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};

use crate::{
    model::entity::Workshop,
    web::{AppState, WebResult},
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(workshops_list_handler))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/workshops",
    description = "Upcoming live workshops",
    responses(
        (status = 200, description = "Workshops", body = Vec<Workshop>),
    ),
    tag = "workshops"
)]
async fn workshops_list_handler(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let workshops = state.mm().repo().workshops().await;
    Ok((StatusCode::OK, Json(workshops)))
}
