use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    catalog::CatalogView,
    model::{
        ResourceTyped,
        entity::{Course, CourseId},
    },
    notify::{NotificationSink, Severity},
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::courses::{BookmarkResponse, CategoryResponse, CourseListParams, CourseRouteResponse},
        error::ErrorResponse,
        middlewares,
    },
};

/// How many enrolled courses the "continue learning" strip shows.
const MY_COURSES_LIMIT: usize = 3;

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(courses_list_handler))
        .route("/categories", get(categories_list_handler))
        .route("/mine", get(my_courses_handler))
        .route("/{id}", get(course_get_handler))
        .route("/{id}/route", get(course_route_handler))
        .route("/{id}/bookmark", post(course_bookmark_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

fn with_bookmark(state: &AppState, mut course: Course) -> Course {
    let bookmarked = state.bookmarks().is_bookmarked(&course);
    course.set_bookmarked(bookmarked);
    course
}

async fn find_course(state: &AppState, id: CourseId) -> WebResult<Course> {
    state
        .mm()
        .repo()
        .find_by_id(id)
        .await
        .map(|course| with_bookmark(state, course))
        .ok_or_else(|| WebError::resource_not_found(Course::get_resource_type()))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(CourseListParams),
    description = "Filtered and sorted catalog. Reports `loading` until the catalog is ready",
    responses(
        (status = 200, description = "Catalog view", body = CatalogView),
    ),
    tag = "courses"
)]
#[tracing::instrument(skip(state))]
async fn courses_list_handler(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> WebResult<impl IntoResponse> {
    let courses: Vec<Course> = state
        .mm()
        .repo()
        .all()
        .await
        .into_iter()
        .map(|c| with_bookmark(&state, c))
        .collect();

    let view = state.loader().view(&courses, &params.to_query());
    Ok((StatusCode::OK, Json(view)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/categories",
    description = "Category slugs with display names, `all` first",
    responses(
        (status = 200, description = "Categories", body = Vec<CategoryResponse>),
    ),
    tag = "courses"
)]
async fn categories_list_handler(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let categories: Vec<CategoryResponse> = state
        .mm()
        .repo()
        .categories()
        .await
        .into_iter()
        .map(CategoryResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(categories)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/mine",
    description = "Enrolled courses in catalog order, at most three",
    responses(
        (status = 200, description = "Enrolled courses", body = Vec<Course>),
        (status = 401, description = "You had to be authorized to do this", body = ErrorResponse),
    ),
    tag = "courses",
    security(
        ("cookie" = [])
    )
)]
async fn my_courses_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;
    let courses: Vec<Course> = state
        .mm()
        .repo()
        .enrolled(MY_COURSES_LIMIT)
        .await
        .into_iter()
        .map(|c| with_bookmark(&state, c))
        .collect();

    Ok((StatusCode::OK, Json(courses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = u32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course with curriculum and reviews", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse),
    ),
    tag = "courses"
)]
async fn course_get_handler(
    Path(id): Path<CourseId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let course = find_course(&state, id).await?;
    Ok((StatusCode::OK, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/route",
    params(("id" = u32, Path, description = "Course id")),
    description = "Learn view for enrolled courses, detail view otherwise",
    responses(
        (status = 200, description = "Navigation target", body = CourseRouteResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
    ),
    tag = "courses"
)]
async fn course_route_handler(
    Path(id): Path<CourseId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let course = find_course(&state, id).await?;
    Ok((StatusCode::OK, Json(CourseRouteResponse::from(&course))))
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/bookmark",
    params(("id" = u32, Path, description = "Course id")),
    description = "Toggles the bookmark flag of a course",
    responses(
        (status = 200, description = "New bookmark state", body = BookmarkResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
    ),
    tag = "courses"
)]
#[tracing::instrument(skip(state))]
async fn course_bookmark_handler(
    Path(id): Path<CourseId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let course = state
        .mm()
        .repo()
        .find_by_id(id)
        .await
        .ok_or_else(|| WebError::resource_not_found(Course::get_resource_type()))?;

    let bookmarked = state.bookmarks().toggle(&course);
    if bookmarked {
        state.toasts().notify("Course bookmarked!", Severity::Success);
    } else {
        state.toasts().notify("Bookmark removed.", Severity::Info);
    }

    Ok((
        StatusCode::OK,
        Json(BookmarkResponse {
            course_id: id,
            bookmarked,
        }),
    ))
}
