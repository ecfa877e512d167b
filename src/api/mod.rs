//! API endpoints
//!
//! Este módulo contiene los endpoints del servidor mock.

pub mod collections;
