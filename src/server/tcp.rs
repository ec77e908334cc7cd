//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que acepta conexiones y las reparte a un
//! pool acotado de workers. Cada conexión se atiende completa en un worker,
//! con soporte de keep-alive para varios requests secuenciales.
//!
//! Si el pool y su cola están saturados, la conexión se rechaza con un 503
//! de mejor esfuerzo y se cierra.

use crate::config::Config;
use crate::http::{Response, StatusCode};
use crate::metrics::MetricsCollector;
use crate::router::Router;
use crate::server::connection::ConnectionHandler;
use crate::server::pool::WorkerPool;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

/// Servidor HTTP/1.1 concurrente con métricas
pub struct Server {
    config: Config,
    router: Arc<Router>,
    metrics: Arc<MetricsCollector>,
    pool: WorkerPool,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let metrics = MetricsCollector::new();
        let router = Router::new(config.www_root.clone(), metrics.clone());
        let pool = WorkerPool::new(config.workers, config.queue_capacity);

        Self {
            config,
            router: Arc::new(router),
            metrics: Arc::new(metrics),
            pool,
            listener: None,
        }
    }

    /// Hace bind del listener y retorna la dirección local
    ///
    /// Es idempotente: si el listener ya existe solo retorna su dirección.
    /// Con puerto 0 el sistema asigna uno libre, útil en tests.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        if let Some(listener) = &self.listener {
            return listener.local_addr();
        }

        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        let local = listener.local_addr()?;
        println!("[+] Servidor escuchando en {}", local);

        self.listener = Some(listener);
        Ok(local)
    }

    /// Acepta conexiones indefinidamente y las despacha al pool
    pub fn run(&mut self) -> io::Result<()> {
        println!("[*] Iniciando servidor en {}", self.config.address());
        self.bind()?;
        println!(
            "[*] Pool de workers: {} threads, cola de {} conexiones\n",
            self.config.workers, self.config.queue_capacity
        );

        let listener = match &self.listener {
            Some(listener) => listener,
            None => return Err(io::Error::new(io::ErrorKind::NotConnected, "server not bound")),
        };

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => eprintln!("   ❌ Error al aceptar conexión: {}", e),
            }
        }

        Ok(())
    }

    /// Encola una conexión aceptada en el pool de workers
    fn dispatch(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        println!("   [+] Nueva conexión desde: {}", peer);

        // Clon del socket para poder responder si el pool está lleno
        let reject_handle = stream.try_clone();

        let handler = ConnectionHandler::new(
            Arc::clone(&self.router),
            Arc::clone(&self.metrics),
            Duration::from_millis(self.config.idle_timeout_ms),
        );

        if self.pool.execute(move || handler.handle(stream)).is_err() {
            println!("   ❌ Pool saturado, rechazando conexión de {}", peer);
            self.reject(reject_handle, &peer);
        }
    }

    /// Responde 503 de mejor esfuerzo a una conexión rechazada
    fn reject(&self, stream: io::Result<TcpStream>, peer: &str) {
        let mut stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                println!("   ❌ No se pudo responder el rechazo a {}: {}", peer, e);
                return;
            }
        };

        let response = Response::error(StatusCode::ServiceUnavailable, "Service Unavailable")
            .with_keep_alive(false);
        let bytes = response.to_bytes();

        if stream.write_all(&bytes).and_then(|_| stream.flush()).is_ok() {
            self.metrics.record_request(response.status().as_u16(), bytes.len());
        }
    }
}
