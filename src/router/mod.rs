//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea paths HTTP a handlers específicos.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Las rutas integradas (`/`, `/moved`, `/bug`, `/metrics`) y las rutas de
//! autenticación (`/register`, `/login`) se comparan por path exacto. Cualquier
//! otro path se resuelve como archivo estático bajo el directorio raíz
//! configurado. El router es puro despacho: no toca sockets.
//!
//! El header `Connection` de toda respuesta lo decide el router según la
//! preferencia del request, sin importar lo que haya puesto el sub-handler.

use crate::auth::UserController;
use crate::http::{Request, Response, StatusCode};
use crate::metrics::MetricsCollector;
use crate::static_files::{FileError, StaticFileHandler};
use std::path::PathBuf;

/// Router que despacha requests a handlers
pub struct Router {
    /// Handler de archivos estáticos bajo el www root
    static_files: StaticFileHandler,

    /// Controller de registro y login de usuarios
    controller: UserController,

    /// Collector compartido, expuesto en `/metrics`
    metrics: MetricsCollector,
}

impl Router {
    /// Crea un router sirviendo archivos desde `www_root`
    pub fn new(www_root: impl Into<PathBuf>, metrics: MetricsCollector) -> Self {
        Self {
            static_files: StaticFileHandler::new(www_root),
            controller: UserController::new(),
            metrics,
        }
    }

    /// Despacha un request al handler apropiado
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::metrics::MetricsCollector;
    /// use web_server::router::Router;
    /// use web_server::http::Request;
    ///
    /// let router = Router::new("./www", MetricsCollector::new());
    /// let request = Request::parse("GET /moved HTTP/1.1\r\n\r\n", Vec::new()).unwrap();
    /// let response = router.route(&request);
    /// assert_eq!(response.status().as_u16(), 301);
    /// ```
    pub fn route(&self, request: &Request) -> Response {
        let response = match request.path() {
            "/" => self.home_page(),
            "/moved" => Response::redirect(301, "/"),
            "/bug" => self.broken_route(),
            "/metrics" => Response::json(&self.metrics.to_json()),
            "/register" => self.controller.handle_register(request),
            "/login" => self.controller.handle_login(request),
            path => self.serve_static(path, request),
        };

        // El router decide el header Connection de toda respuesta
        response.with_keep_alive(request.is_keep_alive())
    }

    /// Página de inicio con los formularios de registro y login
    fn home_page(&self) -> Response {
        let body = "<html>\
<head><title>web_server</title></head>\
<body>\
<h1>Welcome to web_server</h1>\
<h2>Register</h2>\
<form method='POST' action='/register'>\
Username: <input type='text' name='username'><br>\
Password: <input type='password' name='password'><br>\
<input type='submit' value='Register'>\
</form>\
<h2>Login</h2>\
<form method='POST' action='/login'>\
Username: <input type='text' name='username'><br>\
Password: <input type='password' name='password'><br>\
<input type='submit' value='Login'>\
</form>\
</body>\
</html>";

        Response::html(body)
    }

    /// Ruta que falla a propósito, para ejercitar el camino de error 500
    fn broken_route(&self) -> Response {
        let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        println!("   ❌ Error en /bug: {}", error);
        Response::error(StatusCode::InternalServerError, "Internal Server Error")
    }

    /// Resuelve un path como archivo estático
    ///
    /// El query string se descarta antes de resolver. Un archivo inexistente
    /// produce 404 con un HTML que nombra el path pedido; una falla de I/O
    /// produce 500.
    fn serve_static(&self, path: &str, request: &Request) -> Response {
        let resource = match path.split_once('?') {
            Some((resource, _query)) => resource,
            None => path,
        };

        match self.static_files.handle(resource, request) {
            Ok(response) => response,
            Err(FileError::NotFound) => Self::not_found(resource),
            Err(FileError::Io(e)) => {
                println!("   ❌ Error de I/O sirviendo {}: {}", resource, e);
                Response::error(StatusCode::InternalServerError, "Internal Server Error")
            }
        }
    }

    /// Respuesta 404 nombrando el recurso pedido
    fn not_found(path: &str) -> Response {
        let body = format!(
            "<html><body><h1>404 Not Found</h1>\
<p>The requested resource {} was not found on this server.</p>\
</body></html>",
            path
        );

        Response::new(StatusCode::NotFound)
            .with_content_type("text/html; charset=utf-8")
            .with_body(&body)
    }
}
