//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes y las reparte a un pool de workers
//! 3. Atiende cada conexión con soporte keep-alive
//! 4. Lee y parsea requests HTTP, genera y envía responses

pub mod connection;
pub mod pool;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::ConnectionHandler;
pub use pool::{PoolError, WorkerPool};
pub use tcp::Server;
