use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use core_types::{Concern, ConcernPayload};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ConcernFilter {
    #[serde(rename = "studentName")]
    pub student_name: Option<String>,
}

/// # GET /api/concerns
/// Lists every concern, or only one student's when `studentName` is given.
/// A blank `studentName` is treated as absent.
pub async fn list_concerns(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ConcernFilter>,
) -> Result<Json<Vec<Concern>>, AppError> {
    let concerns = match filter.student_name.as_deref() {
        Some(name) if !name.trim().is_empty() => state.service.list_by_student_name(name).await?,
        _ => state.service.list_all().await?,
    };
    Ok(Json(concerns))
}

/// # GET /api/concerns/:id
pub async fn get_concern(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Concern>, AppError> {
    let concern = state.service.get(id).await?;
    Ok(Json(concern))
}

/// # POST /api/concerns
pub async fn create_concern(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConcernPayload>,
) -> Result<(StatusCode, Json<Concern>), AppError> {
    let created = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # PUT /api/concerns/:id
/// Replaces every field except the id.
pub async fn update_concern(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConcernPayload>,
) -> Result<Json<Concern>, AppError> {
    let updated = state.service.update(id, payload).await?;
    Ok(Json(updated))
}

/// # DELETE /api/concerns/:id
pub async fn delete_concern(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
