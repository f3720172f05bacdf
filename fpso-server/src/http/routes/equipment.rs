//! Equipment endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

use super::MessageResponse;
use crate::db::repos::{Equipment, UnitOfWork};
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::CreateEquipmentRequest;

/// Equipment response, all six columns
#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub location: String,
    pub status: String,
    #[serde(rename = "vesselCode")]
    pub vessel_code: Option<String>,
}

impl From<Equipment> for EquipmentResponse {
    fn from(e: Equipment) -> Self {
        Self {
            id: e.id,
            name: e.name,
            code: e.code,
            location: e.location,
            status: e.status,
            vessel_code: e.vessel_code,
        }
    }
}

fn respond(rows: Vec<Equipment>) -> Json<Vec<EquipmentResponse>> {
    Json(rows.into_iter().map(EquipmentResponse::from).collect())
}

/// POST /api/equips/post
async fn create_equipment(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateEquipmentRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let new = req.validate()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    uow.equipment().create(&new).await?;
    uow.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "Equipment {} inserted.",
            new.code
        ))),
    ))
}

/// GET /api/equips/get
async fn list_equipment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EquipmentResponse>>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let rows = uow.equipment().list().await?;
    uow.commit().await?;
    Ok(respond(rows))
}

/// GET /api/equips/get/{status} - unknown statuses give an empty list
async fn list_equipment_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<EquipmentResponse>>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let rows = uow.equipment().list_by_status(&status).await?;
    uow.commit().await?;
    Ok(respond(rows))
}

/// PUT /api/equips/update/status/{code}
async fn deactivate_equipment(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<EquipmentResponse>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let equipment = uow.equipment().deactivate(&code).await?;
    uow.commit().await?;
    Ok(Json(EquipmentResponse::from(equipment)))
}

/// PUT /api/equips/update/status_all - body is a JSON array of codes
async fn deactivate_equipment_batch(
    State(state): State<Arc<AppState>>,
    ValidJson(codes): ValidJson<Vec<String>>,
) -> Result<Json<Vec<EquipmentResponse>>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let rows = uow.equipment().deactivate_many(&codes).await?;
    uow.commit().await?;
    Ok(respond(rows))
}

/// Equipment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/equips/post", post(create_equipment))
        .route("/equips/get", get(list_equipment))
        .route("/equips/get/{status}", get(list_equipment_by_status))
        .route("/equips/update/status/{code}", put(deactivate_equipment))
        .route("/equips/update/status_all", put(deactivate_equipment_batch))
}
