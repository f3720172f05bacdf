//! Vessel endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;

use super::equipment::EquipmentResponse;
use super::MessageResponse;
use crate::db::repos::{UnitOfWork, Vessel};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, VesselId};
use crate::http::server::AppState;
use crate::models::VesselCodeRequest;

/// Vessel response, fields `{id, code}` only
#[derive(Debug, Serialize)]
pub struct VesselResponse {
    pub id: i64,
    pub code: String,
}

impl From<Vessel> for VesselResponse {
    fn from(v: Vessel) -> Self {
        Self {
            id: v.id,
            code: v.code,
        }
    }
}

/// POST /api/vessels/post
async fn create_vessel(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<VesselCodeRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let code = req.validate()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    uow.vessels().create(&code).await?;
    uow.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "Vessel {} inserted.",
            code.as_str()
        ))),
    ))
}

/// GET /api/vessels/get
async fn list_vessels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VesselResponse>>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let vessels = uow.vessels().list().await?;
    uow.commit().await?;

    Ok(Json(vessels.into_iter().map(VesselResponse::from).collect()))
}

/// GET /api/vessels/get/{id}
async fn get_vessel(
    State(state): State<Arc<AppState>>,
    VesselId(id): VesselId,
) -> Result<Json<VesselResponse>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let vessel = uow.vessels().get(id).await?;
    uow.commit().await?;

    Ok(Json(VesselResponse::from(vessel)))
}

/// GET /api/vessels/get/{id}/equips - equipment mounted on the vessel
async fn list_vessel_equipment(
    State(state): State<Arc<AppState>>,
    VesselId(id): VesselId,
) -> Result<Json<Vec<EquipmentResponse>>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    // 404 for an unknown vessel rather than an empty list
    uow.vessels().get(id).await?;
    let mounted = uow.equipment().list_by_vessel(id).await?;
    uow.commit().await?;

    Ok(Json(mounted.into_iter().map(EquipmentResponse::from).collect()))
}

/// PUT /api/vessels/update/code/{id}
async fn update_vessel_code(
    State(state): State<Arc<AppState>>,
    VesselId(id): VesselId,
    ValidJson(req): ValidJson<VesselCodeRequest>,
) -> Result<Json<VesselResponse>, ApiError> {
    let code = req.validate()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let vessel = uow.vessels().update_code(id, &code).await?;
    uow.commit().await?;

    Ok(Json(VesselResponse::from(vessel)))
}

/// DELETE /api/vessels/delete/{id}
///
/// Equipment mounted on the vessel is detached (`vesselCode` set to null)
/// in the same transaction.
async fn delete_vessel(
    State(state): State<Arc<AppState>>,
    VesselId(id): VesselId,
) -> Result<Json<VesselResponse>, ApiError> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    // Write first: a deferred transaction that reads before writing fails
    // with SQLITE_BUSY_SNAPSHOT if another writer commits in between.
    let vessel = uow.vessels().delete(id).await?;
    let detached = uow.equipment().detach_from_vessel(&vessel.code).await?;
    uow.commit().await?;

    if detached > 0 {
        tracing::info!(id, code = %vessel.code, detached, "equipment detached from deleted vessel");
    }

    Ok(Json(VesselResponse::from(vessel)))
}

/// Vessel routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vessels/post", post(create_vessel))
        .route("/vessels/get", get(list_vessels))
        .route("/vessels/get/{id}", get(get_vessel))
        .route("/vessels/get/{id}/equips", get(list_vessel_equipment))
        .route("/vessels/update/code/{id}", put(update_vessel_code))
        .route("/vessels/delete/{id}", delete(delete_vessel))
}
