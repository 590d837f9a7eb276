use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::web::middlewares::AUTH_TOKEN;

pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme(
                "cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    AUTH_TOKEN,
                    "JWT carrying the user id and loyalty points",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::courses::courses_list_handler,
        crate::web::routes::courses::categories_list_handler,
        crate::web::routes::courses::my_courses_handler,
        crate::web::routes::courses::course_get_handler,
        crate::web::routes::courses::course_route_handler,
        crate::web::routes::courses::course_bookmark_handler,
        crate::web::routes::sessions::session_create_handler,
        crate::web::routes::sessions::session_get_handler,
        crate::web::routes::sessions::session_close_handler,
        crate::web::routes::sessions::lesson_select_handler,
        crate::web::routes::sessions::lesson_next_handler,
        crate::web::routes::sessions::lesson_previous_handler,
        crate::web::routes::sessions::lesson_complete_handler,
        crate::web::routes::sessions::transport_handler,
        crate::web::routes::sessions::note_add_handler,
        crate::web::routes::sessions::note_edit_handler,
        crate::web::routes::sessions::note_delete_handler,
        crate::web::routes::sessions::note_jump_handler,
        crate::web::routes::sessions::quiz_answer_handler,
        crate::web::routes::sessions::quiz_submit_handler,
        crate::web::routes::sessions::quiz_retake_handler,
        crate::web::routes::workshops::workshops_list_handler,
        crate::web::routes::notifications::notifications_list_handler,
        crate::web::routes::notifications::notification_dismiss_handler,
        crate::web::routes::account::account_me_handler,
        crate::web::routes::account::mentorship_request_handler,
    ),
    modifiers(&CookieAuthModifier),
    tags(
        (name = "courses", description = "Catalog browsing"),
        (name = "sessions", description = "Lesson player"),
        (name = "notifications", description = "Toasts"),
    )
)]
pub struct ApiDoc;
