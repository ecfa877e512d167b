//! Utilidades de validación
//!
//! Funciones helper para validar los campos del formulario de vehículos.
//! Reproducen las restricciones de los inputs del formulario: campos
//! requeridos, inputs numéricos y fechas `datetime-local`.

use chrono::{DateTime, NaiveDateTime, Utc};
use validator::ValidationError;

/// Formatos aceptados para un input `datetime-local`
const DATETIME_LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Convertir el texto de un input numérico a f64
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Validar un input numérico requerido
pub fn validate_number(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    if parse_number(value).is_none() {
        let mut error = ValidationError::new("number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Convertir string a datetime (formato `datetime-local` o RFC3339)
pub fn parse_charge_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .map(|dt| dt.with_timezone(&Utc).naive_utc())
                .ok()
        })
}

/// Validar una fecha de carga requerida
pub fn validate_charge_time(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    if parse_charge_time(value).is_none() {
        let mut error = ValidationError::new("datetime");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DDTHH:MM".to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(validate_not_empty("EV-01").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_number_inputs() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert!(validate_number("").is_err());
        assert!(validate_number("-3").is_ok());
    }

    #[test]
    fn test_charge_time_formats() {
        assert!(parse_charge_time("2024-05-01T08:30").is_some());
        assert!(parse_charge_time("2024-05-01T08:30:15").is_some());
        assert!(parse_charge_time("2024-05-01T08:30:00Z").is_some());
        assert!(parse_charge_time("yesterday").is_none());
        let error = validate_charge_time("01/05/2024").unwrap_err();
        assert_eq!(error.code, "datetime");
    }
}
