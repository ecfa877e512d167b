use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{format_number, Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    parse_number, validate_charge_time, validate_not_empty, validate_number,
};

// Borrador del formulario: los inputs tal como los escribe el usuario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    #[validate(custom = "validate_not_empty")]
    pub vehicle_id: String,
    #[validate(custom = "validate_number")]
    pub battery_percentage: String,
    #[validate(custom = "validate_number")]
    pub total_distance: String,
    #[validate(custom = "validate_charge_time")]
    pub last_charge_time: String,
    pub status: VehicleStatus,
    pub scheduled_charge_time: Option<String>,
}

impl Default for VehicleDraft {
    fn default() -> Self {
        Self {
            vehicle_id: String::new(),
            battery_percentage: String::new(),
            total_distance: String::new(),
            last_charge_time: String::new(),
            status: VehicleStatus::Idle,
            scheduled_charge_time: None,
        }
    }
}

impl From<&Vehicle> for VehicleDraft {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.vehicle_id.clone(),
            battery_percentage: format_number(vehicle.battery_percentage),
            total_distance: format_number(vehicle.total_distance),
            last_charge_time: vehicle.last_charge_time.clone(),
            status: vehicle.status.clone(),
            scheduled_charge_time: vehicle.scheduled_charge_time.clone(),
        }
    }
}

impl VehicleDraft {
    /// Validar el borrador y convertirlo en el cuerpo de POST/PUT
    pub fn to_payload(&self) -> AppResult<VehiclePayload> {
        self.validate()?;

        let battery_percentage = parse_number(&self.battery_percentage)
            .ok_or_else(|| AppError::Internal("batteryPercentage passed validation but is not numeric".to_string()))?;
        let total_distance = parse_number(&self.total_distance)
            .ok_or_else(|| AppError::Internal("totalDistance passed validation but is not numeric".to_string()))?;

        Ok(VehiclePayload {
            vehicle_id: self.vehicle_id.trim().to_string(),
            battery_percentage,
            total_distance,
            last_charge_time: self.last_charge_time.trim().to_string(),
            status: self.status.clone(),
            scheduled_charge_time: self
                .scheduled_charge_time
                .clone()
                .filter(|value| !value.trim().is_empty()),
        })
    }
}

// Cuerpo enviado al recurso remoto (sin id)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    pub vehicle_id: String,
    pub battery_percentage: f64,
    pub total_distance: f64,
    pub last_charge_time: String,
    pub status: VehicleStatus,
    pub scheduled_charge_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::RecordId;
    use serde_json::json;

    fn filled_draft() -> VehicleDraft {
        VehicleDraft {
            vehicle_id: "EV-01".to_string(),
            battery_percentage: "80".to_string(),
            total_distance: "1200.5".to_string(),
            last_charge_time: "2024-05-01T08:30".to_string(),
            status: VehicleStatus::Charging,
            scheduled_charge_time: None,
        }
    }

    #[test]
    fn test_default_draft_matches_empty_form() {
        let value = serde_json::to_value(VehicleDraft::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "vehicleId": "",
                "batteryPercentage": "",
                "totalDistance": "",
                "lastChargeTime": "",
                "status": "Idle",
                "scheduledChargeTime": null
            })
        );
    }

    #[test]
    fn test_payload_from_valid_draft() {
        let payload = filled_draft().to_payload().unwrap();
        assert_eq!(payload.battery_percentage, 80.0);
        assert_eq!(payload.total_distance, 1200.5);

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["vehicleId"], "EV-01");
        assert_eq!(value["status"], "Charging");
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        let error = VehicleDraft::default().to_payload().unwrap_err();
        match error {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("vehicle_id"));
                assert!(fields.contains_key("battery_percentage"));
                assert!(fields.contains_key("total_distance"));
                assert!(fields.contains_key("last_charge_time"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_range_check_on_battery() {
        let mut draft = filled_draft();
        draft.battery_percentage = "140".to_string();
        assert!(draft.to_payload().is_ok());

        draft.battery_percentage = "full".to_string();
        assert!(draft.to_payload().is_err());
    }

    #[test]
    fn test_draft_from_vehicle() {
        let vehicle = Vehicle {
            id: RecordId::Number(5),
            vehicle_id: "EV-05".to_string(),
            battery_percentage: Some(10.0),
            total_distance: Some(320.0),
            last_charge_time: "2024-05-02T10:00".to_string(),
            status: VehicleStatus::InTransit,
            scheduled_charge_time: None,
        };

        let draft = VehicleDraft::from(&vehicle);
        assert_eq!(draft.vehicle_id, "EV-05");
        assert_eq!(draft.battery_percentage, "10");
        assert_eq!(draft.total_distance, "320");
        assert_eq!(draft.status, VehicleStatus::InTransit);
    }
}
