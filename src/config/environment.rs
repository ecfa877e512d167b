//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno tanto del dashboard como
//! del servidor mock. Todas las variables tienen un valor por defecto; un
//! valor mal formado es un error de configuración.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::errors::{AppError, AppResult};

/// Dirección del servidor mock usada por defecto
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Umbral de batería baja por defecto (porcentaje)
pub const DEFAULT_LOW_BATTERY_THRESHOLD: f64 = 15.0;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub low_battery_threshold: f64,
    pub host: String,
    pub port: u16,
    pub db_path: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            low_battery_threshold: DEFAULT_LOW_BATTERY_THRESHOLD,
            host: "127.0.0.1".to_string(),
            port: 4000,
            db_path: None,
            cors_origins: Vec::new(),
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = get("FLEET_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let low_battery_threshold: f64 =
            parse_var("LOW_BATTERY_THRESHOLD", get("LOW_BATTERY_THRESHOLD"), defaults.low_battery_threshold)?;
        if !low_battery_threshold.is_finite() {
            return Err(AppError::Config(
                "LOW_BATTERY_THRESHOLD must be a finite number".to_string(),
            ));
        }

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            api_base_url,
            request_timeout_secs: parse_var(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout_secs,
            )?,
            low_battery_threshold,
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", get("PORT"), defaults.port)?,
            db_path: get("MOCK_DB_PATH").map(PathBuf::from),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: parse_var("LOG_LEVEL", get("LOG_LEVEL"), defaults.log_level)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección de escucha del servidor mock
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de las peticiones del cliente REST
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: Option<String>, default: T) -> AppResult<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", key, value))),
    }
}
