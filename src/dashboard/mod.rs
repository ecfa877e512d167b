//! Dashboard de flota
//!
//! Componente único: mantiene la lista de vehículos y el formulario,
//! sincroniza con el recurso remoto mediante `VehicleApi` y emite el aviso de
//! batería baja después de cada cambio de la lista.
//!
//! Los fallos remotos se registran en el canal de diagnóstico y no se
//! propagan: creación y borrado simplemente no aplican su cambio, y una
//! actualización fallida deja el formulario en `FormMode::UpdateFailed`.

pub mod battery;
pub mod render;
pub mod state;

use tracing::{error, info, warn};

use crate::client::VehicleApi;
use crate::models::vehicle::{RecordId, Vehicle};
use crate::utils::errors::{AppError, AppResult};

use self::battery::{low_battery_warning, LowBatteryWarning, Notifier};
use self::render::{vehicle_cards, VehicleCard};
use self::state::{reduce_vehicles, DraftField, FormState, VehicleListAction};

/// Resultado de un envío del formulario
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Registro creado con el id asignado por el servidor
    Created(RecordId),
    /// Registro actualizado
    Updated(RecordId),
    /// El borrador no pasó la validación; no hubo llamada remota
    Invalid(AppError),
    /// La llamada remota falló y quedó registrada
    Failed,
}

pub struct Dashboard<A, N> {
    api: A,
    notifier: N,
    vehicles: Vec<Vehicle>,
    form: FormState,
    low_battery_threshold: f64,
    mounted: bool,
}

impl<A, N> Dashboard<A, N>
where
    A: VehicleApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N, low_battery_threshold: f64) -> Self {
        Self {
            api,
            notifier,
            vehicles: Vec::new(),
            form: FormState::default(),
            low_battery_threshold,
            mounted: false,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn low_battery_threshold(&self) -> f64 {
        self.low_battery_threshold
    }

    pub fn cards(&self) -> Vec<VehicleCard> {
        vehicle_cards(&self.vehicles, self.low_battery_threshold)
    }

    /// Aviso derivado de la lista actual
    pub fn low_battery_warning(&self) -> Option<LowBatteryWarning> {
        low_battery_warning(&self.vehicles, self.low_battery_threshold)
    }

    /// Carga única de la colección. Devuelve `false` si ya estaba montado.
    pub async fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;

        match self.api.list_vehicles().await {
            Ok(vehicles) => {
                info!("🚗 {} vehículos cargados", vehicles.len());
                self.dispatch(VehicleListAction::Replaced(vehicles));
            }
            Err(e) => error!("❌ Error fetching vehicles: {}", e),
        }
        true
    }

    pub fn set_field(&mut self, field: DraftField, value: &str) -> AppResult<()> {
        self.form.set_field(field, value)
    }

    /// Crear o actualizar según el modo del formulario
    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.form.draft.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("⚠️ Formulario inválido: {}", e);
                return SubmitOutcome::Invalid(e);
            }
        };

        match self.form.current_edit_id().cloned() {
            Some(id) => match self.api.update_vehicle(&id, &payload).await {
                Ok(vehicle) => {
                    info!("✅ Vehículo {} actualizado", id);
                    self.form.reset();
                    self.dispatch(VehicleListAction::ReplacedById {
                        id: id.clone(),
                        vehicle,
                    });
                    SubmitOutcome::Updated(id)
                }
                Err(e) => {
                    error!("❌ Error updating vehicle {}: {}", id, e);
                    self.form.mark_update_failed(e.to_string());
                    SubmitOutcome::Failed
                }
            },
            None => match self.api.create_vehicle(&payload).await {
                Ok(vehicle) => {
                    let id = vehicle.id.clone();
                    info!("✅ Vehículo {} creado con id {}", vehicle.vehicle_id, id);
                    self.form.reset();
                    self.dispatch(VehicleListAction::Appended(vehicle));
                    SubmitOutcome::Created(id)
                }
                Err(e) => {
                    error!("❌ Error adding vehicle: {}", e);
                    SubmitOutcome::Failed
                }
            },
        }
    }

    /// Copiar el registro `id` al formulario. No hace nada si no existe.
    pub fn begin_edit(&mut self, id: &RecordId) -> bool {
        match self.vehicles.iter().find(|vehicle| &vehicle.id == id) {
            Some(vehicle) => {
                self.form.begin_edit(vehicle);
                true
            }
            None => false,
        }
    }

    /// Abandonar la edición (también tras una actualización fallida)
    pub fn cancel_edit(&mut self) -> bool {
        if !self.form.is_edit_mode() {
            return false;
        }
        self.form.reset();
        true
    }

    pub async fn delete(&mut self, id: &RecordId) -> bool {
        match self.api.delete_vehicle(id).await {
            Ok(()) => {
                info!("🗑️ Vehículo {} eliminado", id);
                self.dispatch(VehicleListAction::RemovedById(id.clone()));
                true
            }
            Err(e) => {
                error!("❌ Error deleting vehicle {}: {}", id, e);
                false
            }
        }
    }

    fn dispatch(&mut self, action: VehicleListAction) {
        let current = std::mem::take(&mut self.vehicles);
        self.vehicles = reduce_vehicles(current, action);
        self.watch_low_battery();
    }

    fn watch_low_battery(&mut self) {
        if let Some(warning) = self.low_battery_warning() {
            warn!("🔋 {}", warning);
            self.notifier.notify(&warning);
        }
    }
}
