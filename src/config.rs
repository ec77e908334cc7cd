//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte completo
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server --port 8080 \
//!   --www-root ./www \
//!   --workers 4 \
//!   --queue-capacity 128 \
//!   --idle-timeout-ms 10000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 WWW_ROOT=/srv/www ./web_server
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor HTTP/1.1 con keep-alive, archivos estáticos y registro de usuarios")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz de archivos estáticos
    #[arg(long = "www-root", default_value = "./www", env = "WWW_ROOT")]
    pub www_root: String,

    // === Workers ===

    /// Número de workers que atienden conexiones
    #[arg(long, default_value = "4", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Capacidad máxima de la cola de conexiones pendientes
    #[arg(long = "queue-capacity", default_value = "128", env = "HTTP_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    // === Timeouts ===

    /// Timeout de lectura en un socket inactivo, en milisegundos
    #[arg(long = "idle-timeout-ms", default_value = "10000", env = "HTTP_IDLE_TIMEOUT_MS")]
    pub idle_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// # Ejemplo
    /// ```rust
    /// use web_server::config::Config;
    ///
    /// let config = Config::new();
    /// println!("Server listening on {}", config.address());
    /// ```
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use web_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        // Validar host
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        // Validar workers
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        // Validar cola
        if self.queue_capacity == 0 {
            return Err("Queue capacity must be >= 1".to_string());
        }

        // Validar timeout
        if self.idle_timeout_ms == 0 {
            return Err("Idle timeout must be > 0".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║              web_server HTTP/1.1 Configuration               ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   WWW root:     {}", self.www_root);
        println!();
        println!("👷 Worker Pool:");
        println!("   ┌──────────┬────────────┬─────────────┐");
        println!("   │ Workers  │ Queue Cap  │ Idle T/O    │");
        println!("   ├──────────┼────────────┼─────────────┤");
        println!("   │ {:^8} │ {:^10} │ {:>7} ms │",
            self.workers, self.queue_capacity, self.idle_timeout_ms);
        println!("   └──────────┴────────────┴─────────────┘");
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            www_root: "./www".to_string(),
            workers: 4,
            queue_capacity: 128,
            idle_timeout_ms: 10_000,
        }
    }
}
