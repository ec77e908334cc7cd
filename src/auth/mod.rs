//! # Módulo de Autenticación
//!
//! Registro y login de usuarios en memoria:
//!
//! - `service`: el almacén de cuentas y los resultados posibles
//! - `controller`: el mapeo HTTP (métodos, formularios, status codes)
//!
//! Las cuentas no sobreviven al proceso; no hay persistencia en disco.

pub mod controller;
pub mod service;

pub use controller::{parse_form_data, UserController};
pub use service::{AccountStore, AuthOutcome};
