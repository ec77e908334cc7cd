//! # Manejo de Conexiones
//! src/server/connection.rs
//!
//! Implementa el ciclo de vida de una conexión aceptada: leer encabezados
//! línea por línea, leer el body con conteo exacto de bytes, despachar al
//! router, escribir la respuesta y decidir si la conexión sigue viva.
//!
//! ## Ciclo por request
//!
//! ```text
//! leer encabezados → leer body → parsear → rutear → escribir → (loop | close)
//! ```
//!
//! La conexión continúa solo si el request pidió `keep-alive`, la respuesta
//! lo confirmó y el estado no fue un error de servidor. Un timeout sin
//! request en vuelo es un cierre limpio; un timeout a mitad de un request
//! se registra y cierra sin responder.

use crate::http::{Request, Response, StatusCode};
use crate::metrics::MetricsCollector;
use crate::router::Router;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

/// Resultado de leer el bloque de encabezados de un request
enum HeadOutcome {
    /// Encabezados completos, con el valor crudo de Content-Length si vino
    Complete {
        head: String,
        content_length: Option<String>,
    },

    /// El peer cerró la conexión sin enviar nada
    Closed,

    /// Timeout sin bytes leídos: cierre limpio
    TimedOutIdle,

    /// Timeout con encabezados a medio leer
    TimedOutMidRequest,
}

/// Handler que atiende una conexión aceptada de principio a fin
pub struct ConnectionHandler {
    router: Arc<Router>,
    metrics: Arc<MetricsCollector>,
    idle_timeout: Duration,
}

impl ConnectionHandler {
    pub fn new(
        router: Arc<Router>,
        metrics: Arc<MetricsCollector>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            router,
            metrics,
            idle_timeout,
        }
    }

    /// Atiende la conexión hasta que se cierre
    ///
    /// Los errores de I/O se registran pero no se propagan: la conexión
    /// simplemente termina.
    pub fn handle(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        self.metrics.increment_active_connections();

        if let Err(e) = self.serve(stream, &peer) {
            println!("   ❌ Error en conexión {}: {}", peer, e);
        }

        self.metrics.decrement_active_connections();
        println!("   [-] Conexión cerrada: {}", peer);
    }

    /// Loop de requests sobre una misma conexión
    fn serve(&self, stream: TcpStream, peer: &str) -> io::Result<()> {
        stream.set_read_timeout(Some(self.idle_timeout))?;

        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = stream;

        loop {
            let outcome = match self.read_head(&mut reader) {
                Ok(outcome) => outcome,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    // Bytes que no son UTF-8 en los encabezados
                    println!("   ❌ Encabezados ilegibles de {}", peer);
                    self.write_response(
                        &mut writer,
                        &Response::error(StatusCode::BadRequest, "Bad Request")
                            .with_keep_alive(false),
                    )?;
                    break;
                }
                Err(e) => return Err(e),
            };

            let (head, raw_content_length) = match outcome {
                HeadOutcome::Complete {
                    head,
                    content_length,
                } => (head, content_length),
                HeadOutcome::Closed => break,
                HeadOutcome::TimedOutIdle => {
                    println!("   [*] Timeout de inactividad: {}", peer);
                    break;
                }
                HeadOutcome::TimedOutMidRequest => {
                    println!("   ❌ Timeout leyendo encabezados: {}", peer);
                    break;
                }
            };

            // Un Content-Length ilegible deja el stream fuera de sincronía:
            // se responde 400 y se cierra
            let content_length = match raw_content_length.as_deref() {
                None => 0,
                Some(raw) => match raw.parse::<usize>() {
                    Ok(n) => n,
                    Err(_) => {
                        println!("   ❌ Content-Length inválido de {}: {:?}", peer, raw);
                        self.write_response(
                            &mut writer,
                            &Response::error(StatusCode::BadRequest, "Bad Request")
                                .with_keep_alive(false),
                        )?;
                        break;
                    }
                },
            };

            let body = match self.read_body(&mut reader, content_length) {
                Ok(body) => body,
                Err(e) if is_timeout(&e) => {
                    println!("   ❌ Timeout leyendo el body: {}", peer);
                    break;
                }
                Err(e) => return Err(e),
            };

            let (response, keep_alive) = match Request::parse(&head, body) {
                Ok(request) => {
                    println!("   [>] {} {} ({})", request.method(), request.path(), peer);

                    let response = self.router.route(&request);

                    // Ambas partes deben estar de acuerdo para continuar, y un
                    // error de servidor cierra la conexión sin importar eso
                    let keep_alive = request.is_keep_alive()
                        && response.is_keep_alive()
                        && !response.status().is_server_error();

                    (response, keep_alive)
                }
                Err(e) => {
                    println!("   ❌ Request inválido de {}: {}", peer, e);
                    let response = Response::error(StatusCode::BadRequest, "Bad Request")
                        .with_keep_alive(false);
                    (response, false)
                }
            };

            self.write_response(&mut writer, &response)?;

            if !keep_alive {
                break;
            }
        }

        Ok(())
    }

    /// Lee líneas de encabezado hasta la línea vacía
    ///
    /// Mientras lee captura el valor crudo de `Content-Length`, que hace
    /// falta antes de parsear para saber cuántos bytes de body leer. Un EOF
    /// a mitad de encabezados no es error: se usa lo que llegó.
    fn read_head(&self, reader: &mut BufReader<TcpStream>) -> io::Result<HeadOutcome> {
        let mut head = String::new();
        let mut content_length: Option<String> = None;

        loop {
            let mut line = String::new();
            let bytes = match reader.read_line(&mut line) {
                Ok(n) => n,
                Err(e) if is_timeout(&e) => {
                    return Ok(if head.is_empty() {
                        HeadOutcome::TimedOutIdle
                    } else {
                        HeadOutcome::TimedOutMidRequest
                    });
                }
                Err(e) => return Err(e),
            };

            if bytes == 0 {
                if head.is_empty() {
                    return Ok(HeadOutcome::Closed);
                }
                break;
            }

            if line == "\r\n" || line == "\n" {
                break;
            }

            if let Some((name, value)) = line.split_once(':') {
                if name.trim().eq_ignore_ascii_case("content-length") {
                    content_length = Some(value.trim().to_string());
                }
            }

            head.push_str(&line);
        }

        Ok(HeadOutcome::Complete {
            head,
            content_length,
        })
    }

    /// Lee exactamente `content_length` bytes de body
    ///
    /// Si el peer se desconecta antes de completarlo, se retorna lo recibido.
    fn read_body(
        &self,
        reader: &mut BufReader<TcpStream>,
        content_length: usize,
    ) -> io::Result<Vec<u8>> {
        if content_length == 0 {
            return Ok(Vec::new());
        }

        let mut body = vec![0u8; content_length];
        let mut total = 0;

        while total < content_length {
            let n = reader.read(&mut body[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }

        body.truncate(total);
        Ok(body)
    }

    /// Serializa, escribe y registra una respuesta
    fn write_response(&self, writer: &mut TcpStream, response: &Response) -> io::Result<()> {
        let bytes = response.to_bytes();
        writer.write_all(&bytes)?;
        writer.flush()?;

        self.metrics
            .record_request(response.status().as_u16(), bytes.len());
        println!("   [<] {} ({} bytes)", response.status(), bytes.len());

        Ok(())
    }
}

/// Un read timeout llega como WouldBlock en Unix y TimedOut en Windows
fn is_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
