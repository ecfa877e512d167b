//! Tarjetas de vehículos para la vista de terminal

use crate::models::vehicle::{format_number, Vehicle};

/// Contenido de una tarjeta, sin colores
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleCard {
    pub title: String,
    pub lines: Vec<String>,
    pub low_battery: bool,
}

impl VehicleCard {
    pub fn from_vehicle(vehicle: &Vehicle, threshold: f64) -> Self {
        Self {
            title: format!("{} (id: {})", vehicle.vehicle_id, vehicle.id),
            lines: vec![
                format!("Battery: {}%", format_number(vehicle.battery_percentage)),
                format!("Total Distance: {} km", format_number(vehicle.total_distance)),
                format!("Status: {}", vehicle.status),
                format!("Last Charge: {}", vehicle.last_charge_time),
            ],
            low_battery: vehicle.is_low_battery(threshold),
        }
    }
}

/// Una tarjeta por vehículo, en el orden de la lista
pub fn vehicle_cards(vehicles: &[Vehicle], threshold: f64) -> Vec<VehicleCard> {
    vehicles
        .iter()
        .map(|vehicle| VehicleCard::from_vehicle(vehicle, threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{RecordId, VehicleStatus};

    #[test]
    fn test_card_content() {
        let vehicle = Vehicle {
            id: RecordId::Number(4),
            vehicle_id: "EV-04".to_string(),
            battery_percentage: Some(9.0),
            total_distance: Some(812.5),
            last_charge_time: "2024-05-01T08:30".to_string(),
            status: VehicleStatus::InTransit,
            scheduled_charge_time: None,
        };

        let cards = vehicle_cards(&[vehicle], 15.0);
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.title, "EV-04 (id: 4)");
        assert_eq!(
            card.lines,
            vec![
                "Battery: 9%",
                "Total Distance: 812.5 km",
                "Status: In Transit",
                "Last Charge: 2024-05-01T08:30",
            ]
        );
        assert!(card.low_battery);
    }
}
