//! Cliente HTTP para el recurso remoto `/vehicles`
//!
//! Este módulo contiene el trait `VehicleApi` (la frontera que usa el
//! dashboard) y su implementación con `reqwest` contra un store REST mock.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::EnvironmentConfig;
use crate::dto::vehicle_dto::VehiclePayload;
use crate::models::vehicle::{RecordId, Vehicle};
use crate::utils::errors::{AppError, AppResult};

/// Las cuatro operaciones REST que consume el dashboard
#[async_trait]
pub trait VehicleApi: Send + Sync {
    /// `GET /vehicles`. Los registros que no se pueden leer se omiten.
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    /// `POST /vehicles`
    async fn create_vehicle(&self, payload: &VehiclePayload) -> AppResult<Vehicle>;

    /// `PUT /vehicles/{id}`
    async fn update_vehicle(&self, id: &RecordId, payload: &VehiclePayload) -> AppResult<Vehicle>;

    /// `DELETE /vehicles/{id}`
    async fn delete_vehicle(&self, id: &RecordId) -> AppResult<()>;
}

/// Cliente HTTP para la colección de vehículos
#[derive(Debug, Clone)]
pub struct VehicleApiClient {
    pub client: Client,
    pub base_url: String,
}

impl VehicleApiClient {
    /// Crear nuevo cliente HTTP con la URL base y el timeout configurados
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/vehicles", self.base_url)
    }

    /// URL del registro con el id codificado como un único segmento
    fn item_url(&self, id: &RecordId) -> AppResult<Url> {
        let invalid_base = || AppError::Config(format!("Invalid API base URL: {}", self.base_url));

        let mut url = Url::parse(&self.collection_url()).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    /// Rechazos del servidor y errores de red terminan en `AppError`
    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::RemoteRejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let bytes = Self::check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl VehicleApi for VehicleApiClient {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let url = self.collection_url();
        debug!("📤 GET {}", url);
        let response = self.client.get(&url).send().await?;
        let records: Vec<Value> = Self::read_json(response).await?;

        let vehicles = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Vehicle>(record) {
                Ok(vehicle) => Some(vehicle),
                Err(e) => {
                    warn!("⚠️ Registro de vehículo ignorado: {}", e);
                    None
                }
            })
            .collect();
        Ok(vehicles)
    }

    async fn create_vehicle(&self, payload: &VehiclePayload) -> AppResult<Vehicle> {
        let url = self.collection_url();
        debug!("📤 POST {}", url);
        let response = self.client.post(&url).json(payload).send().await?;
        Self::read_json(response).await
    }

    async fn update_vehicle(&self, id: &RecordId, payload: &VehiclePayload) -> AppResult<Vehicle> {
        let url = self.item_url(id)?;
        debug!("📤 PUT {}", url);
        let response = self.client.put(url).json(payload).send().await?;
        Self::read_json(response).await
    }

    async fn delete_vehicle(&self, id: &RecordId) -> AppResult<()> {
        let url = self.item_url(id)?;
        debug!("📤 DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
