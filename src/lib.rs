//! Fleet Dashboard
//!
//! Dashboard CRUD de vehículos de flota (batería, distancia, carga y estado)
//! sobre un recurso REST `/vehicles`, con aviso de batería baja, y el
//! servidor mock de colecciones que hace de backend.

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use client::{VehicleApi, VehicleApiClient};
pub use dashboard::{Dashboard, SubmitOutcome};
pub use utils::errors::{AppError, AppResult};
