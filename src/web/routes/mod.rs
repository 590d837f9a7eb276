use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::{AppState, doc::ApiDoc};

pub mod account;
pub mod courses;
pub mod notifications;
pub mod sessions;
pub mod workshops;

pub fn build_app<S: Send + Sync + Clone + 'static>(state: AppState) -> Router<S> {
    let docs = state.config().app().docs();

    let mut router = Router::new()
        .nest("/api/v1/courses", courses::routes(state.clone()))
        .nest("/api/v1/sessions", sessions::routes(state.clone()))
        .nest("/api/v1/workshops", workshops::routes(state.clone()))
        .nest("/api/v1/notifications", notifications::routes(state.clone()))
        .nest("/api/v1", account::routes(state.clone()))
        .layer(CookieManagerLayer::default())
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if docs {
        router = router.merge(
            SwaggerUi::new("/api/v1/docs").url("/api-doc/openapi.json", ApiDoc::openapi()),
        );
    }

    router
}
