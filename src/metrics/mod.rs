//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Este módulo implementa la recolección y agregación de métricas del servidor:
//! - Contadores de requests y de respuestas por clase de status
//! - Conexiones activas
//! - Bytes escritos y uptime

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
