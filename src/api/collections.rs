//! Handlers del servidor mock
//!
//! Este módulo maneja las operaciones CRUD genéricas sobre colecciones,
//! incluida `/vehicles`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    repositories::Record,
    state::AppState,
    utils::errors::{bad_request_error, AppResult},
};

fn into_record(body: Value) -> AppResult<Record> {
    match body {
        Value::Object(record) => Ok(record),
        _ => Err(bad_request_error("request body must be a JSON object")),
    }
}

/// Estado del servidor mock
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
        "collections": state.repository.collection_names().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Obtener todos los registros de una colección
pub async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> AppResult<Json<Vec<Record>>> {
    let records = state.repository.list(&collection).await?;
    Ok(Json(records))
}

/// Obtener un registro por ID
pub async fn get_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> AppResult<Json<Record>> {
    let record = state.repository.get(&collection, &id).await?;
    Ok(Json(record))
}

/// Crear un nuevo registro
pub async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Record>)> {
    let record = state.repository.insert(&collection, into_record(body)?).await?;
    let id = record.get("id").cloned().unwrap_or_default();
    info!("➕ {} creado con id {}", collection, id);
    Ok((StatusCode::CREATED, Json(record)))
}

/// Reemplazar un registro existente
pub async fn replace_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> AppResult<Json<Record>> {
    let record = state.repository.replace(&collection, &id, into_record(body)?).await?;
    info!("✏️ {}/{} reemplazado", collection, id);
    Ok(Json(record))
}

/// Actualizar parcialmente un registro existente
pub async fn patch_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> AppResult<Json<Record>> {
    let record = state.repository.merge(&collection, &id, into_record(body)?).await?;
    info!("✏️ {}/{} actualizado", collection, id);
    Ok(Json(record))
}

/// Eliminar un registro
pub async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    state.repository.remove(&collection, &id).await?;
    info!("🗑️ {}/{} eliminado", collection, id);
    Ok(Json(json!({})))
}
