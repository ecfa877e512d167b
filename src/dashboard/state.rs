//! Estado local del dashboard
//!
//! La lista de vehículos solo cambia a través de `reduce_vehicles`, con una
//! transición por cada resultado REST aplicado. El formulario es una máquina
//! de estados pequeña: creación, edición y edición con actualización fallida.

use crate::dto::vehicle_dto::VehicleDraft;
use crate::models::vehicle::{RecordId, Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};

/// Transiciones de la lista de vehículos
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleListAction {
    /// Resultado de la carga inicial
    Replaced(Vec<Vehicle>),
    /// Registro creado devuelto por el servidor
    Appended(Vehicle),
    /// Registro actualizado devuelto por el servidor
    ReplacedById { id: RecordId, vehicle: Vehicle },
    /// Registro eliminado en el servidor
    RemovedById(RecordId),
}

/// Reducer puro de la lista
pub fn reduce_vehicles(mut vehicles: Vec<Vehicle>, action: VehicleListAction) -> Vec<Vehicle> {
    match action {
        VehicleListAction::Replaced(list) => list,
        VehicleListAction::Appended(vehicle) => {
            vehicles.push(vehicle);
            vehicles
        }
        VehicleListAction::ReplacedById { id, vehicle } => vehicles
            .into_iter()
            .map(|existing| if existing.id == id { vehicle.clone() } else { existing })
            .collect(),
        VehicleListAction::RemovedById(id) => {
            vehicles.retain(|existing| existing.id != id);
            vehicles
        }
    }
}

/// Modo del formulario
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormMode {
    /// El borrador es un vehículo nuevo
    #[default]
    Create,
    /// El borrador modifica el registro `id`
    Editing { id: RecordId },
    /// La última actualización de `id` falló; el borrador se conserva.
    /// Se sale reintentando el envío o cancelando la edición.
    UpdateFailed { id: RecordId, reason: String },
}

/// Campos editables del formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    VehicleId,
    BatteryPercentage,
    TotalDistance,
    LastChargeTime,
    Status,
    ScheduledChargeTime,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::VehicleId => "Vehicle ID",
            DraftField::BatteryPercentage => "Battery %",
            DraftField::TotalDistance => "Total Distance (km)",
            DraftField::LastChargeTime => "Last Charge Time",
            DraftField::Status => "Status",
            DraftField::ScheduledChargeTime => "Scheduled Charge Time",
        }
    }
}

/// Borrador más modo de edición
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: VehicleDraft,
    pub mode: FormMode,
}

impl FormState {
    pub fn is_edit_mode(&self) -> bool {
        !matches!(self.mode, FormMode::Create)
    }

    /// Id recordado mientras se edita
    pub fn current_edit_id(&self) -> Option<&RecordId> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Editing { id } | FormMode::UpdateFailed { id, .. } => Some(id),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit_mode() {
            "Update Vehicle"
        } else {
            "Add Vehicle"
        }
    }

    /// Escribir un campo del borrador. `vehicleId` está bloqueado en edición.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> AppResult<()> {
        let draft = &mut self.draft;
        match field {
            DraftField::VehicleId => {
                if self.mode != FormMode::Create {
                    return Err(AppError::ReadOnlyField("vehicleId".to_string()));
                }
                draft.vehicle_id = value.to_string();
            }
            DraftField::BatteryPercentage => draft.battery_percentage = value.to_string(),
            DraftField::TotalDistance => draft.total_distance = value.to_string(),
            DraftField::LastChargeTime => draft.last_charge_time = value.to_string(),
            DraftField::Status => draft.status = value.parse::<VehicleStatus>()?,
            DraftField::ScheduledChargeTime => {
                draft.scheduled_charge_time =
                    Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
        }
        Ok(())
    }

    /// Copiar un registro al borrador y entrar en modo edición
    pub fn begin_edit(&mut self, vehicle: &Vehicle) {
        self.draft = VehicleDraft::from(vehicle);
        self.mode = FormMode::Editing {
            id: vehicle.id.clone(),
        };
    }

    /// La actualización falló: se mantiene el borrador y el id
    pub fn mark_update_failed(&mut self, reason: String) {
        if let Some(id) = self.current_edit_id().cloned() {
            self.mode = FormMode::UpdateFailed { id, reason };
        }
    }

    /// Volver al borrador vacío en modo creación
    pub fn reset(&mut self) {
        *self = FormState::default();
    }
}
