//! Shared application state
//!
//! Este módulo define el estado compartido del servidor mock que se pasa a
//! través del router de Axum.

use crate::config::environment::EnvironmentConfig;
use crate::repositories::CollectionRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub repository: CollectionRepository,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repository: CollectionRepository) -> Self {
        Self { config, repository }
    }

    /// Estado con el documento por defecto `{"vehicles": []}`
    pub fn with_default_collections(config: EnvironmentConfig) -> Self {
        Self::new(config, CollectionRepository::with_collections(&["vehicles"]))
    }
}
