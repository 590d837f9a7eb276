use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    model::{ResourceTyped, entity::Course},
    notify::{NotificationSink, Severity},
    session::{LessonSession, SessionId, SessionResult, transport::TransportAction},
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::sessions::{
            AnswerRequest, NoteRequest, SelectLessonRequest, SessionCreateRequest, SessionResponse,
        },
        error::ErrorResponse,
        middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", post(session_create_handler))
        .route(
            "/{sid}",
            get(session_get_handler).delete(session_close_handler),
        )
        .route("/{sid}/lesson", post(lesson_select_handler))
        .route("/{sid}/lesson/next", post(lesson_next_handler))
        .route("/{sid}/lesson/previous", post(lesson_previous_handler))
        .route("/{sid}/lesson/complete", post(lesson_complete_handler))
        .route("/{sid}/transport", post(transport_handler))
        .route("/{sid}/notes", post(note_add_handler))
        .route(
            "/{sid}/notes/{nid}",
            put(note_edit_handler).delete(note_delete_handler),
        )
        .route("/{sid}/notes/{nid}/jump", post(note_jump_handler))
        .route("/{sid}/quiz/answers", put(quiz_answer_handler))
        .route("/{sid}/quiz/submit", post(quiz_submit_handler))
        .route("/{sid}/quiz/retake", post(quiz_retake_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

/// Applies `f` to the caller's session and answers with the resulting snapshot.
fn mutate<F>(
    ctx: &RequestContext,
    state: &AppState,
    sid: SessionId,
    f: F,
) -> WebResult<(StatusCode, Json<SessionResponse>)>
where
    F: FnOnce(&mut LessonSession) -> SessionResult<()>,
{
    let owner = ctx.user()?.user_id();
    let snapshot = state.sessions().with_session(owner, sid, |session| {
        f(session)?;
        Ok(SessionResponse::new(sid, session))
    })?;

    Ok((StatusCode::OK, Json(snapshot)))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = SessionCreateRequest,
    description = "Opens a lesson session positioned on the first lesson of the course",
    responses(
        (status = 201, description = "Session opened", body = SessionResponse),
        (status = 401, description = "You had to be authorized to do this", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip(ctx, state))]
async fn session_create_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(payload): Json<SessionCreateRequest>,
) -> WebResult<impl IntoResponse> {
    let owner = ctx.user()?.user_id();
    let repo = state.mm().repo();
    let course = repo
        .find_by_id(payload.course_id)
        .await
        .ok_or_else(|| WebError::resource_not_found(Course::get_resource_type()))?;

    let mut quizzes = HashMap::new();
    for lesson in course.lessons_in_order().filter(|l| l.is_quiz()) {
        let questions = repo.quiz_for(course.id(), lesson.id()).await;
        quizzes.insert(lesson.id(), questions);
    }

    let session = LessonSession::open(course, quizzes);
    let response = SessionResponse::new(Uuid::nil(), &session);
    let sid = state.sessions().create(owner, session);

    Ok((StatusCode::CREATED, Json(SessionResponse { id: sid, ..response })))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sid}",
    params(("sid" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 401, description = "You had to be authorized to do this", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn session_get_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |_| Ok(()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{sid}",
    params(("sid" = Uuid, Path, description = "Session id")),
    description = "Closes the session, discarding its notes and quiz state",
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Session not found", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn session_close_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let owner = ctx.user()?.user_id();
    state.sessions().close(owner, sid)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/lesson",
    params(("sid" = Uuid, Path, description = "Session id")),
    request_body = SelectLessonRequest,
    description = "Selects a lesson. Any running quiz attempt is discarded",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 404, description = "Session or lesson not found", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn lesson_select_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
    Json(payload): Json<SelectLessonRequest>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| {
        s.select_lesson(payload.lesson_id).map(|_| ())
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/lesson/next",
    params(("sid" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 409, description = "Already on the last lesson", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn lesson_next_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| s.next_lesson().map(|_| ()))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/lesson/previous",
    params(("sid" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 409, description = "Already on the first lesson", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn lesson_previous_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| s.previous_lesson().map(|_| ()))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/lesson/complete",
    params(("sid" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 409, description = "No lesson selected", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn lesson_complete_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| s.mark_complete().map(|_| ()))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/transport",
    params(("sid" = Uuid, Path, description = "Session id")),
    request_body = TransportAction,
    description = "Play, pause, seek, volume and playback rate of the active video",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 409, description = "No video lesson active, or invalid value", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn transport_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
    Json(action): Json<TransportAction>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| s.transport(action).map(|_| ()))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/notes",
    params(("sid" = Uuid, Path, description = "Session id")),
    request_body = NoteRequest,
    description = "Adds a note at the current playback position",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 409, description = "Blank note or no video lesson active", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn note_add_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> WebResult<impl IntoResponse> {
    let response = mutate(&ctx, &state, sid, |s| s.add_note(payload.content).map(|_| ()))?;
    state.toasts().notify("Note added.", Severity::Info);
    Ok(response)
}

#[utoipa::path(
    put,
    path = "/api/v1/sessions/{sid}/notes/{nid}",
    params(
        ("sid" = Uuid, Path, description = "Session id"),
        ("nid" = i64, Path, description = "Note id"),
    ),
    request_body = NoteRequest,
    description = "Replaces the note content; its timestamp is kept",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn note_edit_handler(
    ctx: RequestContext,
    Path((sid, nid)): Path<(SessionId, i64)>,
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| {
        s.edit_note(nid, payload.content).map(|_| ())
    })
}

#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{sid}/notes/{nid}",
    params(
        ("sid" = Uuid, Path, description = "Session id"),
        ("nid" = i64, Path, description = "Note id"),
    ),
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn note_delete_handler(
    ctx: RequestContext,
    Path((sid, nid)): Path<(SessionId, i64)>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| s.delete_note(nid).map(|_| ()))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/notes/{nid}/jump",
    params(
        ("sid" = Uuid, Path, description = "Session id"),
        ("nid" = i64, Path, description = "Note id"),
    ),
    description = "Seeks to the note's position without changing play state",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 409, description = "No video lesson active", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn note_jump_handler(
    ctx: RequestContext,
    Path((sid, nid)): Path<(SessionId, i64)>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| s.jump_to_note(nid).map(|_| ()))
}

#[utoipa::path(
    put,
    path = "/api/v1/sessions/{sid}/quiz/answers",
    params(("sid" = Uuid, Path, description = "Session id")),
    request_body = AnswerRequest,
    description = "Records or overwrites the answer to one question",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 409, description = "No quiz active, quiz submitted or option out of range", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn quiz_answer_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| {
        s.answer(payload.question_id, payload.option)
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/quiz/submit",
    params(("sid" = Uuid, Path, description = "Session id")),
    description = "Scores the quiz once every question is answered",
    responses(
        (status = 200, description = "Session snapshot with the outcome", body = SessionResponse),
        (status = 409, description = "Quiz incomplete or already submitted", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip(ctx, state))]
async fn quiz_submit_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let mut outcome = None;
    let response = mutate(&ctx, &state, sid, |s| {
        outcome = Some(s.submit_quiz()?);
        Ok(())
    })?;

    if let Some(outcome) = outcome {
        let severity = if outcome.passed() {
            Severity::Success
        } else {
            Severity::Info
        };
        state.toasts().notify(outcome.message(), severity);
    }
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sid}/quiz/retake",
    params(("sid" = Uuid, Path, description = "Session id")),
    description = "Clears answers and the submitted outcome",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse),
        (status = 409, description = "No quiz active", body = ErrorResponse),
    ),
    tag = "sessions",
    security(
        ("cookie" = [])
    )
)]
async fn quiz_retake_handler(
    ctx: RequestContext,
    Path(sid): Path<SessionId>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    mutate(&ctx, &state, sid, |s| s.retake_quiz())
}
