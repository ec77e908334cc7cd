//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! Content-Length: 13\r\n
//! Date: Tue, 11 Mar 2025 10:00:00 GMT\r\n
//! Server: web_server/0.1.0\r\n
//! \r\n
//! <html>...</html>
//! ```
//!
//! Los headers se serializan en orden de inserción. `Content-Length` se
//! calcula siempre del body final al serializar, nunca del valor que haya
//! puesto el caller. `Date` y `Server` se inyectan solo si no están. Una
//! respuesta 304 sale sin body y sin `Content-Length`/`Content-Type`.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use web_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_content_type("text/plain; charset=utf-8")
//!     .with_body("Hello");
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::StatusCode;
use httpdate::fmt_http_date;
use indexmap::IndexMap;
use std::time::SystemTime;

/// Valor del header `Server` cuando el caller no fijó uno propio
const SERVER_NAME: &str = "web_server/0.1.0";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP en orden de inserción (sobrescribir conserva la posición)
    headers: IndexMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: IndexMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe su valor conservando la
    /// posición original.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("Cache-Control", "no-store");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let mut response = Response::new(StatusCode::Ok);
    /// response.add_header("Cache-Control", "no-store");
    /// ```
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Atajo para fijar el header `Content-Type`
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_content_type("text/html; charset=utf-8");
    /// ```
    pub fn with_content_type(self, mime: &str) -> Self {
        self.with_header("Content-Type", mime)
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// `Content-Length` no se fija aquí: se calcula al serializar.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body("Hello World");
    /// ```
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (imágenes, archivos, etc.)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let binary_data = vec![0x89, 0x50, 0x4E, 0x47]; // PNG header
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body_bytes(binary_data);
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Fija el header `Connection` según la decisión de persistencia
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok).with_keep_alive(true);
    /// assert!(response.is_keep_alive());
    /// ```
    pub fn with_keep_alive(self, keep: bool) -> Self {
        self.with_header("Connection", if keep { "keep-alive" } else { "close" })
    }

    /// Crea una respuesta de redirección
    ///
    /// Solo se aceptan 301 y 302; cualquier otro código cae a 302. Además
    /// del header `Location` se incluye un body HTML para user agents que
    /// no siguen redirecciones solos.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::redirect(301, "/");
    /// assert_eq!(response.status(), StatusCode::MovedPermanently);
    ///
    /// let response = Response::redirect(307, "/otro");
    /// assert_eq!(response.status(), StatusCode::Found);
    /// ```
    pub fn redirect(code: u16, location: &str) -> Self {
        let code = if code == 301 || code == 302 { code } else { 302 };
        let body = format!(
            "<html><body>Redirecting to <a href=\"{}\">{}</a></body></html>",
            location, location
        );
        Self::new(StatusCode::from_u16(code))
            .with_header("Location", location)
            .with_body(&body)
    }

    /// Crea una respuesta 304 Not Modified, sin body
    ///
    /// El serializado tampoco emite `Content-Length` ni `Content-Type`
    /// para este estado, aunque alguien los haya agregado después.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::not_modified()
    ///     .with_header("ETag", "\"1700000000000-42\"");
    /// assert_eq!(response.status(), StatusCode::NotModified);
    /// assert!(response.body().is_empty());
    /// ```
    pub fn not_modified() -> Self {
        Self::new(StatusCode::NotModified)
    }

    /// Crea una respuesta HTML exitosa (200 OK)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Response;
    ///
    /// let response = Response::html("<html><body>hola</body></html>");
    /// ```
    pub fn html(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type("text/html; charset=utf-8")
            .with_body(body)
    }

    /// Crea una respuesta JSON exitosa (200 OK)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Response;
    ///
    /// let response = Response::json(r#"{"status": "ok"}"#);
    /// ```
    pub fn json(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type("application/json")
            .with_body(body)
    }

    /// Crea una respuesta de error con body de texto plano
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::Forbidden, "Forbidden");
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status)
            .with_content_type("text/plain; charset=utf-8")
            .with_body(message)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.1:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers en orden de inserción: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario (omitido si está vacío o el estado es 304)
    ///
    /// Antes de escribir se finalizan los headers: `Content-Length` se
    /// calcula del body (nunca en 304), y `Date`/`Server` se inyectan solo
    /// si el caller no los puso.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok).with_body("Hello");
    /// let bytes = response.to_bytes();
    /// // bytes contiene: "HTTP/1.1 200 OK\r\n...\r\n\r\nHello"
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut headers = self.headers.clone();

        // 1. Finalizar headers
        if self.status == StatusCode::NotModified {
            headers.shift_remove("Content-Length");
            headers.shift_remove("Content-Type");
        } else {
            headers.insert("Content-Length".to_string(), self.body.len().to_string());
        }
        if !headers.contains_key("Date") {
            headers.insert("Date".to_string(), fmt_http_date(SystemTime::now()));
        }
        if !headers.contains_key("Server") {
            headers.insert("Server".to_string(), SERVER_NAME.to_string());
        }

        // 2. Status line
        // Formato: HTTP/1.1 200 OK\r\n
        let mut result = Vec::new();
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 3. Headers en orden de inserción
        for (name, value) in &headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 4. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 5. Body (omitido en 304 o si está vacío)
        if self.status == StatusCode::NotModified || self.body.is_empty() {
            return result;
        }
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Obtiene un header sin importar mayúsculas/minúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Indica si la respuesta dejó la conexión en keep-alive
    pub fn is_keep_alive(&self) -> bool {
        match self.header("connection") {
            Some(value) => value.eq_ignore_ascii_case("keep-alive"),
            None => false,
        }
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(response: &Response) -> String {
        String::from_utf8(response.to_bytes()).unwrap()
    }

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_with_header() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("X-Custom", "value");

        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("x-custom"), Some("value"));
    }

    #[test]
    fn test_with_header_overwrites() {
        let response = Response::new(StatusCode::Ok)
            .with_header("X-Tag", "a")
            .with_header("X-Tag", "b");

        assert_eq!(response.header("X-Tag"), Some("b"));
        assert_eq!(response.headers().len(), 1);
    }

    #[test]
    fn test_with_body() {
        let response = Response::new(StatusCode::Ok)
            .with_body("Hello World");

        assert_eq!(response.body(), b"Hello World");
        // Content-Length recién aparece al serializar
        assert_eq!(response.header("Content-Length"), None);
    }

    #[test]
    fn test_with_body_bytes() {
        let binary_data = vec![0x00, 0x01, 0x02, 0xFF];
        let response = Response::new(StatusCode::Ok)
            .with_body_bytes(binary_data.clone());

        assert_eq!(response.body(), &binary_data[..]);
    }

    // ==================== Serialización ====================

    #[test]
    fn test_to_bytes() {
        let response = Response::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body("Test");

        let text = as_text(&response);

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_content_length_computed_from_body() {
        // El valor puesto por el caller se pisa con el real
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Length", "9999")
            .with_body("four");

        let text = as_text(&response);
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(!text.contains("9999"));
    }

    #[test]
    fn test_date_and_server_injected() {
        let response = Response::new(StatusCode::Ok).with_body("x");
        let text = as_text(&response);

        assert!(text.contains("Date: "));
        assert!(text.contains("Server: web_server/0.1.0\r\n"));
        // Formato RFC 1123 termina en GMT
        let date_line = text
            .lines()
            .find(|l| l.starts_with("Date: "))
            .unwrap();
        assert!(date_line.ends_with("GMT"));
    }

    #[test]
    fn test_date_and_server_only_if_absent() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Date", "Mon, 01 Jan 2024 00:00:00 GMT")
            .with_header("Server", "otro/2.0");

        let text = as_text(&response);
        assert!(text.contains("Date: Mon, 01 Jan 2024 00:00:00 GMT\r\n"));
        assert!(text.contains("Server: otro/2.0\r\n"));
        assert!(!text.contains(SERVER_NAME));
    }

    #[test]
    fn test_headers_serialized_in_insertion_order() {
        let response = Response::new(StatusCode::Ok)
            .with_header("B-Header", "2")
            .with_header("A-Header", "1")
            .with_header("C-Header", "3");

        let text = as_text(&response);
        let pos_b = text.find("B-Header").unwrap();
        let pos_a = text.find("A-Header").unwrap();
        let pos_c = text.find("C-Header").unwrap();
        assert!(pos_b < pos_a);
        assert!(pos_a < pos_c);
    }

    #[test]
    fn test_empty_body_response() {
        let response = Response::new(StatusCode::Ok);
        let text = as_text(&response);

        // Debe terminar con \r\n\r\n (sin body) y declarar longitud cero
        assert!(text.ends_with("\r\n\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
    }

    // ==================== 304 Not Modified ====================

    #[test]
    fn test_not_modified_has_no_body_headers() {
        let response = Response::not_modified()
            .with_header("ETag", "\"123-45\"");

        let text = as_text(&response);
        assert!(text.starts_with("HTTP/1.1 304 Not Modified\r\n"));
        assert!(text.contains("ETag: \"123-45\"\r\n"));
        assert!(!text.contains("Content-Length"));
        assert!(!text.contains("Content-Type"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_not_modified_strips_caller_content_type() {
        let response = Response::not_modified()
            .with_content_type("text/html")
            .with_body("se descarta");

        let text = as_text(&response);
        assert!(!text.contains("Content-Type"));
        assert!(!text.contains("se descarta"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    // ==================== Redirecciones ====================

    #[test]
    fn test_redirect_301() {
        let response = Response::redirect(301, "/");

        assert_eq!(response.status(), StatusCode::MovedPermanently);
        assert_eq!(response.header("Location"), Some("/"));
        let body = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(body.contains("href=\"/\""));
    }

    #[test]
    fn test_redirect_302() {
        let response = Response::redirect(302, "/home");

        assert_eq!(response.status(), StatusCode::Found);
        assert_eq!(response.header("Location"), Some("/home"));
    }

    #[test]
    fn test_redirect_other_code_falls_back_to_302() {
        let response = Response::redirect(307, "/x");
        assert_eq!(response.status(), StatusCode::Found);

        let response = Response::redirect(200, "/x");
        assert_eq!(response.status(), StatusCode::Found);
    }

    // ==================== Atajos ====================

    #[test]
    fn test_html_response() {
        let response = Response::html("<html><body>hola</body></html>");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn test_json_response() {
        let response = Response::json(r#"{"status": "ok"}"#);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.body(), br#"{"status": "ok"}"#);
    }

    #[test]
    fn test_error_response() {
        let response = Response::error(StatusCode::Forbidden, "Forbidden");

        assert_eq!(response.status(), StatusCode::Forbidden);
        assert_eq!(response.header("Content-Type"), Some("text/plain; charset=utf-8"));
        assert_eq!(response.body(), b"Forbidden");
    }

    #[test]
    fn test_unknown_status_line() {
        let response = Response::new(StatusCode::Other(418));
        let text = as_text(&response);
        assert!(text.starts_with("HTTP/1.1 418 Unknown\r\n"));
    }

    // ==================== Keep-Alive ====================

    #[test]
    fn test_with_keep_alive_true() {
        let response = Response::new(StatusCode::Ok).with_keep_alive(true);
        assert_eq!(response.header("Connection"), Some("keep-alive"));
        assert!(response.is_keep_alive());
    }

    #[test]
    fn test_with_keep_alive_false() {
        let response = Response::new(StatusCode::Ok).with_keep_alive(false);
        assert_eq!(response.header("Connection"), Some("close"));
        assert!(!response.is_keep_alive());
    }

    #[test]
    fn test_with_keep_alive_overwrites_in_place() {
        let response = Response::new(StatusCode::Ok)
            .with_keep_alive(true)
            .with_keep_alive(false);

        assert_eq!(response.header("Connection"), Some("close"));
        assert_eq!(response.headers().len(), 1);
    }
}
