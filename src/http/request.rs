//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /register HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Connection: keep-alive\r\n
//! Content-Length: 29\r\n
//! \r\n
//! username=alice&password=secret
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: leído aparte con exactamente `Content-Length` bytes
//!
//! El body llega ya leído desde la capa de conexión: los headers se leen
//! línea por línea pero el body exige un conteo exacto de bytes, así que
//! el parser nunca vuelve a tocar el socket.
//!
//! El método y la versión se conservan como strings sin validar; decidir
//! qué métodos acepta cada ruta es trabajo del router.

use indexmap::IndexMap;

/// Representa un request HTTP/1.1 parseado
///
/// Inmutable una vez construido. Los nombres de headers se guardan en
/// minúsculas, con orden de inserción preservado y last-write-wins para
/// duplicados.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como llegó (ej: "GET", "POST")
    method: String,

    /// Path de la petición, sin query-stripping (ej: "/index.html?v=2")
    path: String,

    /// Versión HTTP (ej: "HTTP/1.1")
    version: String,

    /// Headers HTTP con nombres en minúsculas
    headers: IndexMap<String, String>,

    /// Body del request, dimensionado por Content-Length
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// Formato inválido de la request line (menos de 3 tokens)
    InvalidRequestLine,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP desde el bloque de headers más un body pre-leído
    ///
    /// # Argumentos
    ///
    /// * `head` - Request line y headers, separados por `\r\n`
    /// * `body` - Body ya leído por la capa de conexión (vacío si no hay)
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Request vacío o request line malformada
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use web_server::http::Request;
    ///
    /// let head = "GET /index.html HTTP/1.1\r\nHost: localhost:8080\r\n";
    /// let request = Request::parse(head, Vec::new()).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/index.html");
    /// assert_eq!(request.header("host"), Some("localhost:8080"));
    /// ```
    pub fn parse(head: &str, body: Vec<u8>) -> Result<Self, ParseError> {
        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = head.split("\r\n");

        // 1. Parsear la request line (primera línea)
        let start_line = lines.next().unwrap_or("");
        let (method, path, version) = Self::parse_request_line(start_line)?;

        // 2. Parsear headers (resto de líneas hasta encontrar línea vacía)
        let headers = Self::parse_headers(lines);

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1`. Se exigen al menos 3 tokens; los
    /// tokens extra se ignoran.
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        Ok((
            parts[0].to_string(),
            parts[1].to_string(),
            parts[2].to_string(),
        ))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato `Name: Value` y se corta en el primer ':'.
    /// Los nombres van a minúsculas y ambos lados se recortan. Las líneas
    /// sin ':' se ignoran en vez de rechazarse.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> IndexMap<String, String> {
        let mut headers = IndexMap::new();

        for line in lines {
            // La línea vacía marca el fin de los headers
            if line.is_empty() {
                break;
            }

            if let Some(colon_pos) = line.find(':') {
                if colon_pos > 0 {
                    let name = line[..colon_pos].trim().to_lowercase();
                    let value = line[colon_pos + 1..].trim().to_string();
                    headers.insert(name, value);
                }
            }
        }

        headers
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request (con query string incluido, si hay)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers (nombres en minúsculas, orden de inserción)
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico, sin importar mayúsculas/minúsculas
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Request;
    ///
    /// let head = "GET / HTTP/1.1\r\nIf-None-Match: \"123-4\"\r\n";
    /// let request = Request::parse(head, Vec::new()).unwrap();
    ///
    /// assert_eq!(request.header("If-None-Match"), Some("\"123-4\""));
    /// assert_eq!(request.header("if-none-match"), Some("\"123-4\""));
    /// assert_eq!(request.header("missing"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Indica si el cliente pidió mantener la conexión abierta
    ///
    /// Derivado del header `Connection: keep-alive` (case-insensitive),
    /// nunca almacenado aparte.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Request;
    ///
    /// let head = "GET / HTTP/1.1\r\nConnection: Keep-Alive\r\n";
    /// let request = Request::parse(head, Vec::new()).unwrap();
    /// assert!(request.is_keep_alive());
    ///
    /// let head = "GET / HTTP/1.1\r\nConnection: close\r\n";
    /// let request = Request::parse(head, Vec::new()).unwrap();
    /// assert!(!request.is_keep_alive());
    /// ```
    pub fn is_keep_alive(&self) -> bool {
        match self.header("connection") {
            Some(value) => value.eq_ignore_ascii_case("keep-alive"),
            None => false,
        }
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body del request como String
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}
