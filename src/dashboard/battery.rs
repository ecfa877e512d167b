//! Aviso de batería baja
//!
//! Cálculo derivado de la lista de vehículos. El dashboard lo invoca después
//! de cada transición de la lista y entrega el aviso a un `Notifier`.

use std::fmt;

use crate::models::vehicle::Vehicle;

/// Aviso bloqueante con el número de vehículos afectados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowBatteryWarning {
    pub count: usize,
}

impl fmt::Display for LowBatteryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning: {} vehicle(s) have low battery!", self.count)
    }
}

/// Número de vehículos con batería estrictamente menor que el umbral
pub fn low_battery_count(vehicles: &[Vehicle], threshold: f64) -> usize {
    vehicles.iter().filter(|v| v.is_low_battery(threshold)).count()
}

/// `Some` solo si al menos un vehículo está por debajo del umbral
pub fn low_battery_warning(vehicles: &[Vehicle], threshold: f64) -> Option<LowBatteryWarning> {
    match low_battery_count(vehicles, threshold) {
        0 => None,
        count => Some(LowBatteryWarning { count }),
    }
}

/// Canal de notificación al usuario
pub trait Notifier {
    /// Debe bloquear hasta que el usuario reconozca el aviso
    fn notify(&mut self, warning: &LowBatteryWarning);
}

/// Notificador que guarda los avisos recibidos
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub warnings: Vec<LowBatteryWarning>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, warning: &LowBatteryWarning) {
        self.warnings.push(*warning);
    }
}
