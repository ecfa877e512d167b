//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente al
//! formato JSON del recurso remoto.

pub mod vehicle;

pub use vehicle::{RecordId, Vehicle, VehicleStatus};
