//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículo tal como lo devuelve el
//! recurso remoto `/vehicles`, su estado y el identificador asignado por el
//! servidor.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Identificador asignado por el servidor.
///
/// Los stores mock difieren: unos asignan números y otros strings. Se
/// comparan por valor exacto, `42` y `"42"` son identificadores distintos.
/// Un id numérico que no es entero positivo (`-3`, `1.5`) se guarda como texto
/// para poder direccionarlo igual en la URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(n
                .as_u64()
                .map(RecordId::Number)
                .unwrap_or_else(|| RecordId::Text(n.to_string()))),
            Value::String(s) => Ok(RecordId::Text(s)),
            other => Err(D::Error::custom(format!("invalid record id: {}", other))),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl RecordId {
    /// Interpretar lo que escribe el usuario: números como `Number`,
    /// cualquier otra cosa como `Text`
    pub fn parse_input(input: &str) -> Self {
        let input = input.trim();
        input
            .parse::<u64>()
            .map(RecordId::Number)
            .unwrap_or_else(|_| RecordId::Text(input.to_string()))
    }
}

/// Estado del vehículo
///
/// El formulario solo ofrece los tres estados conocidos. Lo que el servidor
/// devuelva fuera de ellos se conserva tal cual en `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VehicleStatus {
    #[default]
    Idle,
    InTransit,
    Charging,
    Other(String),
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Idle,
        VehicleStatus::InTransit,
        VehicleStatus::Charging,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            VehicleStatus::Idle => "Idle",
            VehicleStatus::InTransit => "In Transit",
            VehicleStatus::Charging => "Charging",
            VehicleStatus::Other(raw) => raw,
        }
    }

    /// Estado leído del servidor: exacto para los conocidos, `Other` si no
    fn from_wire(raw: String) -> Self {
        VehicleStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .unwrap_or(VehicleStatus::Other(raw))
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        VehicleStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == normalized)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Unknown status '{}', expected Idle, In Transit or Charging",
                    s.trim()
                ))
            })
    }
}

impl Serialize for VehicleStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VehicleStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(VehicleStatus::from_wire(lenient_text(deserializer)?))
    }
}

/// Vehicle principal - registro de la colección remota `/vehicles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vehicle_id: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub battery_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_charge_time: String,
    #[serde(default = "VehicleStatus::unset")]
    pub status: VehicleStatus,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub scheduled_charge_time: Option<String>,
}

impl VehicleStatus {
    /// Estado de un registro que no trae el campo
    fn unset() -> Self {
        VehicleStatus::Other(String::new())
    }
}

impl Vehicle {
    /// Batería por debajo del umbral. Una batería desconocida (ausente, null o
    /// texto no numérico) nunca cuenta como baja.
    pub fn is_low_battery(&self, threshold: f64) -> bool {
        matches!(self.battery_percentage, Some(battery) if battery < threshold)
    }
}

/// Texto tolerante: strings tal cual, números y booleanos como su texto,
/// null o ausente como vacío.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_text(deserializer)?.unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Acepta números JSON o strings numéricos (los formularios envían strings).
/// Null, ausente o texto no numérico se leen como `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => crate::utils::validation::parse_number(&s),
        _ => None,
    })
}

/// Formatear un número como lo escribiría el usuario (`12` en vez de `12.0`)
pub fn format_number(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}
