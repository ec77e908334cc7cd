//! # web_server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 con conexiones persistentes, archivos estáticos con
//! caching condicional (ETag / Last-Modified) y registro/login de usuarios
//! en memoria.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y construcción/serialización de responses
//! - `server`: Listener TCP, pool de workers y ciclo de vida de conexiones
//! - `router`: Enrutamiento de peticiones a handlers
//! - `static_files`: Archivos estáticos con validadores de cache y guardia
//!   contra path traversal
//! - `auth`: Registro y login de usuarios con credenciales hasheadas
//! - `metrics`: Recolección de métricas y observabilidad
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_server::config::Config;
//! use web_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod auth;
pub mod config;
pub mod http;
pub mod metrics;
pub mod router;
pub mod server;
pub mod static_files;
