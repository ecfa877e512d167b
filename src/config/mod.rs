//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno del dashboard y del
//! servidor mock.

pub mod environment;

pub use environment::*;
