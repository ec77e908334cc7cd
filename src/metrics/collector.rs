//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta y agrega métricas del servidor en tiempo real: requests
//! totales, respuestas por clase de status, conexiones activas, bytes
//! escritos y uptime. El snapshot se expone como JSON en `/metrics`.

use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Collector de métricas thread-safe
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

/// Datos internos de métricas
#[derive(Default)]
struct MetricsData {
    /// Contador total de requests atendidos
    total_requests: u64,

    /// Respuestas por clase de status
    responses_2xx: u64,
    responses_3xx: u64,
    responses_4xx: u64,
    responses_5xx: u64,

    /// Conexiones abiertas actualmente
    active_connections: u64,

    /// Bytes escritos a los sockets
    bytes_written: u64,
}

/// Snapshot de métricas, serializable a JSON
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub responses_2xx: u64,
    pub responses_3xx: u64,
    pub responses_4xx: u64,
    pub responses_5xx: u64,
    pub active_connections: u64,
    pub bytes_written: u64,
    pub uptime_seconds: u64,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData::default())),
            start_time: Instant::now(),
        }
    }

    /// Registra un request atendido y los bytes de su respuesta
    pub fn record_request(&self, status_code: u16, bytes_written: usize) {
        let mut data = self.inner.lock().unwrap();

        data.total_requests += 1;
        data.bytes_written += bytes_written as u64;

        match status_code {
            200..=299 => data.responses_2xx += 1,
            300..=399 => data.responses_3xx += 1,
            400..=499 => data.responses_4xx += 1,
            500..=599 => data.responses_5xx += 1,
            _ => {}
        }
    }

    /// Incrementa el contador de conexiones activas
    pub fn increment_active_connections(&self) {
        let mut data = self.inner.lock().unwrap();
        data.active_connections += 1;
    }

    /// Decrementa el contador de conexiones activas
    pub fn decrement_active_connections(&self) {
        let mut data = self.inner.lock().unwrap();
        if data.active_connections > 0 {
            data.active_connections -= 1;
        }
    }

    /// Obtiene el número de conexiones activas
    pub fn active_connections(&self) -> u64 {
        let data = self.inner.lock().unwrap();
        data.active_connections
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.inner.lock().unwrap();

        MetricsSnapshot {
            total_requests: data.total_requests,
            responses_2xx: data.responses_2xx,
            responses_3xx: data.responses_3xx,
            responses_4xx: data.responses_4xx,
            responses_5xx: data.responses_5xx,
            active_connections: data.active_connections,
            bytes_written: data.bytes_written,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Obtiene las métricas actuales en formato JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
