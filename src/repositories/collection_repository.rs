//! Store en memoria del servidor mock
//!
//! Colecciones con nombre de objetos JSON, identificados por su campo `id`.
//! Sin escritura a disco: el archivo de semilla solo se lee al arrancar.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppError, AppResult};

pub type Record = Map<String, Value>;

/// ¿El `id` del registro coincide con el segmento de la URL?
fn id_matches(record: &Record, raw_id: &str) -> bool {
    match record.get("id") {
        Some(Value::Number(n)) => n.to_string() == raw_id,
        Some(Value::String(s)) => s == raw_id,
        _ => false,
    }
}

fn id_to_path_segment(id: &Value) -> Option<String> {
    match id {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[derive(Clone, Default)]
pub struct CollectionRepository {
    collections: Arc<RwLock<BTreeMap<String, Vec<Record>>>>,
}

impl CollectionRepository {
    /// Store con las colecciones indicadas, todas vacías
    pub fn with_collections(names: &[&str]) -> Self {
        let collections = names
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        Self {
            collections: Arc::new(RwLock::new(collections)),
        }
    }

    /// Construir el store a partir de un documento `{"coleccion": [...]}`
    pub fn from_document(document: Value) -> AppResult<Self> {
        let Value::Object(root) = document else {
            return Err(bad_request_error("seed document must be a JSON object"));
        };

        let mut collections = BTreeMap::new();
        for (name, items) in root {
            let Value::Array(items) = items else {
                return Err(AppError::BadRequest(format!("collection '{}' must be an array", name)));
            };
            let records = items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => Ok(record),
                    _ => Err(AppError::BadRequest(format!(
                        "collection '{}' contains a non-object item",
                        name
                    ))),
                })
                .collect::<AppResult<Vec<_>>>()?;
            collections.insert(name, records);
        }

        Ok(Self {
            collections: Arc::new(RwLock::new(collections)),
        })
    }

    /// Leer un archivo de semilla con la forma de `db.json`
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let document: Value = serde_json::from_str(&raw)?;
        let repository = Self::from_document(document)?;
        info!("📂 Semilla cargada desde {}", path.display());
        Ok(repository)
    }

    pub async fn collection_names(&self) -> Vec<String> {
        self.collections.read().await.keys().cloned().collect()
    }

    pub async fn list(&self, collection: &str) -> AppResult<Vec<Record>> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .cloned()
            .ok_or_else(|| unknown_collection(collection))
    }

    pub async fn get(&self, collection: &str, id: &str) -> AppResult<Record> {
        let collections = self.collections.read().await;
        let records = collections
            .get(collection)
            .ok_or_else(|| unknown_collection(collection))?;
        records
            .iter()
            .find(|record| id_matches(record, id))
            .cloned()
            .ok_or_else(|| not_found_error(collection, id))
    }

    /// Insertar un registro. Sin `id` se asigna el siguiente id numérico.
    pub async fn insert(&self, collection: &str, mut record: Record) -> AppResult<Record> {
        let mut collections = self.collections.write().await;
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| unknown_collection(collection))?;

        let supplied_id = record.get("id").filter(|id| !id.is_null()).cloned();
        match supplied_id {
            Some(id) => {
                let segment = id_to_path_segment(&id)
                    .ok_or_else(|| bad_request_error("id must be a number or a string"))?;
                if records.iter().any(|existing| id_matches(existing, &segment)) {
                    return Err(conflict_error(collection, "id", &segment));
                }
            }
            None => {
                let next_id = match records
                    .iter()
                    .filter_map(|existing| existing.get("id").and_then(Value::as_u64))
                    .max()
                {
                    Some(max) => max.checked_add(1).ok_or_else(|| {
                        AppError::Conflict(format!("collection '{}' has no numeric id left after {}", collection, max))
                    })?,
                    None => 1,
                };
                record.insert("id".to_string(), Value::from(next_id));
            }
        }

        records.push(record.clone());
        Ok(record)
    }

    /// Reemplazar el registro completo conservando el `id` original
    pub async fn replace(&self, collection: &str, id: &str, mut record: Record) -> AppResult<Record> {
        let mut collections = self.collections.write().await;
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| unknown_collection(collection))?;
        let existing = records
            .iter_mut()
            .find(|existing| id_matches(existing, id))
            .ok_or_else(|| not_found_error(collection, id))?;

        if let Some(original_id) = existing.get("id").cloned() {
            record.insert("id".to_string(), original_id);
        }
        *existing = record.clone();
        Ok(record)
    }

    /// Mezcla superficial del cuerpo sobre el registro existente
    pub async fn merge(&self, collection: &str, id: &str, patch: Record) -> AppResult<Record> {
        let mut collections = self.collections.write().await;
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| unknown_collection(collection))?;
        let existing = records
            .iter_mut()
            .find(|existing| id_matches(existing, id))
            .ok_or_else(|| not_found_error(collection, id))?;

        for (key, value) in patch {
            if key != "id" {
                existing.insert(key, value);
            }
        }
        Ok(existing.clone())
    }

    pub async fn remove(&self, collection: &str, id: &str) -> AppResult<Record> {
        let mut collections = self.collections.write().await;
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| unknown_collection(collection))?;
        let position = records
            .iter()
            .position(|existing| id_matches(existing, id))
            .ok_or_else(|| not_found_error(collection, id))?;
        Ok(records.remove(position))
    }
}

fn unknown_collection(collection: &str) -> AppError {
    AppError::NotFound(format!("collection '{}' does not exist", collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_incrementing_ids() {
        let repository = CollectionRepository::with_collections(&["vehicles"]);

        let first = repository.insert("vehicles", record(json!({"vehicleId": "A"}))).await.unwrap();
        let second = repository.insert("vehicles", record(json!({"vehicleId": "B"}))).await.unwrap();
        assert_eq!(first["id"], json!(1));
        assert_eq!(second["id"], json!(2));
        assert_eq!(repository.list("vehicles").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_explicit_id_conflict() {
        let repository = CollectionRepository::with_collections(&["vehicles"]);
        repository.insert("vehicles", record(json!({"id": "x1"}))).await.unwrap();

        let error = repository.insert("vehicles", record(json!({"id": "x1"}))).await.unwrap_err();
        assert!(matches!(error, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insert_after_max_id_is_conflict() {
        let repository = CollectionRepository::from_document(json!({
            "vehicles": [{"id": u64::MAX, "vehicleId": "EV-MAX"}]
        }))
        .unwrap();

        let error = repository.insert("vehicles", record(json!({"vehicleId": "B"}))).await.unwrap_err();
        assert!(matches!(error, AppError::Conflict(_)));
        assert_eq!(repository.list("vehicles").await.unwrap().len(), 1);

        // Con id explícito sigue siendo posible insertar
        let explicit = repository.insert("vehicles", record(json!({"id": "b-1"}))).await.unwrap();
        assert_eq!(explicit["id"], json!("b-1"));
    }

    #[tokio::test]
    async fn test_replace_keeps_path_id() {
        let repository = CollectionRepository::from_document(json!({
            "vehicles": [{"id": 7, "vehicleId": "EV-07", "batteryPercentage": 50}]
        }))
        .unwrap();

        let updated = repository
            .replace("vehicles", "7", record(json!({"id": 99, "vehicleId": "EV-07", "batteryPercentage": 10})))
            .await
            .unwrap();
        assert_eq!(updated["id"], json!(7));
        assert_eq!(updated["batteryPercentage"], json!(10));
        assert_eq!(repository.get("vehicles", "7").await.unwrap()["batteryPercentage"], json!(10));
    }

    #[tokio::test]
    async fn test_merge_and_remove() {
        let repository = CollectionRepository::from_document(json!({
            "vehicles": [{"id": 1, "vehicleId": "EV-01", "status": "Idle"}]
        }))
        .unwrap();

        let merged = repository
            .merge("vehicles", "1", record(json!({"status": "Charging"})))
            .await
            .unwrap();
        assert_eq!(merged["vehicleId"], json!("EV-01"));
        assert_eq!(merged["status"], json!("Charging"));

        repository.remove("vehicles", "1").await.unwrap();
        assert!(matches!(repository.get("vehicles", "1").await, Err(AppError::NotFound(_))));
        assert!(matches!(repository.remove("vehicles", "1").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_collection_and_bad_seed() {
        let repository = CollectionRepository::with_collections(&["vehicles"]);
        assert!(matches!(repository.list("drivers").await, Err(AppError::NotFound(_))));
        assert!(CollectionRepository::from_document(json!({"vehicles": {}})).is_err());
        assert!(CollectionRepository::from_document(json!([1, 2])).is_err());
    }
}
