use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    controllers::groups::{EditOutcome, WriteOutcome},
    error::AppError,
    middleware::request::{AjaxRequest, FormPayload},
    models::{
        auth::Session,
        datatable::{DatatableRequest, DatatableResponse},
    },
    AppState,
};

impl IntoResponse for WriteOutcome {
    fn into_response(self) -> Response {
        match self {
            WriteOutcome::Success { message } => (
                StatusCode::OK,
                Json(json!({ "status": "ok", "message": message })),
            )
                .into_response(),
            WriteOutcome::Failure {
                summary,
                message,
                code,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": summary,
                    "data": { "message": message, "code": code },
                })),
            )
                .into_response(),
        }
    }
}

/// GET /group — listing page
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let view = state.controller.index(&session).await?;
    let html = state.views.render(&view)?;
    Ok(Html(html))
}

/// GET /group/datatable — server-side data-table feed
pub async fn datatable(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DatatableRequest>,
) -> Result<Json<DatatableResponse>, AppError> {
    let feed = state.controller.datatable(&session, params).await?;
    Ok(Json(feed))
}

/// POST /group
pub async fn store(
    State(state): State<AppState>,
    FormPayload(payload): FormPayload,
) -> WriteOutcome {
    state.controller.store(&payload).await
}

/// GET /group/{id}/edit — form data, asynchronous requests only
pub async fn edit(
    State(state): State<AppState>,
    AjaxRequest(ajax): AjaxRequest,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match state.controller.edit(id, ajax).await? {
        EditOutcome::Group(group) => Ok(Json(group).into_response()),
        EditOutcome::UnsupportedRequestMode => Ok(StatusCode::NOT_ACCEPTABLE.into_response()),
    }
}

/// PUT /group/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    FormPayload(payload): FormPayload,
) -> WriteOutcome {
    state.controller.update(id, &payload).await
}

/// DELETE /group/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> WriteOutcome {
    state.controller.delete(id).await
}

/// POST /group/{id} — HTML forms tunnel PUT and DELETE through `_method`.
pub async fn override_method(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    FormPayload(payload): FormPayload,
) -> Response {
    let method = payload
        .get("_method")
        .and_then(Value::as_str)
        .map(str::to_ascii_uppercase);
    match method.as_deref() {
        Some("PUT") | Some("PATCH") => state.controller.update(id, &payload).await.into_response(),
        Some("DELETE") => state.controller.delete(id).await.into_response(),
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
