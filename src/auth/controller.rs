//! # Controlador de Usuarios
//! src/auth/controller.rs
//!
//! Este módulo traduce entre HTTP y el servicio de cuentas: valida el
//! método, parsea el formulario del body y mapea cada resultado a un
//! status code con su página HTML.
//!
//! ## Mapeo de resultados
//!
//! | Operación | Resultado        | Respuesta              |
//! |-----------|------------------|------------------------|
//! | register  | éxito            | 200 con página HTML    |
//! | register  | cualquier fallo  | 400 con la descripción |
//! | login     | éxito            | 200 con bienvenida     |
//! | login     | cualquier fallo  | 401 con la descripción |
//! | login GET | -                | 302 hacia `/`          |
//! | otro método | -              | 405                    |

use super::service::AccountStore;
use crate::http::{Request, Response, StatusCode};
use std::collections::HashMap;

/// Maneja las rutas `/register` y `/login`
#[derive(Debug, Default)]
pub struct UserController {
    store: AccountStore,
}

impl UserController {
    /// Crea un controlador con un almacén de cuentas vacío
    pub fn new() -> Self {
        Self {
            store: AccountStore::new(),
        }
    }

    /// Maneja `POST /register`
    ///
    /// Body esperado: `username=xxx&password=xxx`. Cualquier método que no
    /// sea POST recibe 405.
    pub fn handle_register(&self, request: &Request) -> Response {
        if !request.method().eq_ignore_ascii_case("POST") {
            return Response::error(
                StatusCode::MethodNotAllowed,
                "Only POST requests are supported",
            );
        }

        let body = request.body_string().unwrap_or_default();
        let params = parse_form_data(&body);
        let username = params.get("username").map(String::as_str).unwrap_or("");
        let password = params.get("password").map(String::as_str).unwrap_or("");

        let outcome = self.store.register(username, password);

        if outcome.is_success() {
            Response::html(
                "<html><body><h1>Registration successful</h1>\
                 <p>Your account has been created. <a href=\"/\">Back to home</a></p>\
                 </body></html>",
            )
        } else {
            let body = format!(
                "<html><body><h1>Registration failed</h1><p>{}</p></body></html>",
                outcome.description()
            );
            Response::new(StatusCode::BadRequest)
                .with_content_type("text/html; charset=utf-8")
                .with_body(&body)
        }
    }

    /// Maneja `/login`
    ///
    /// GET redirige a la página principal, que contiene el formulario.
    /// POST valida las credenciales. Cualquier otro método recibe 405.
    pub fn handle_login(&self, request: &Request) -> Response {
        let method = request.method();

        if method.eq_ignore_ascii_case("GET") {
            return Response::redirect(302, "/");
        }

        if !method.eq_ignore_ascii_case("POST") {
            return Response::error(
                StatusCode::MethodNotAllowed,
                "Only POST requests are supported",
            );
        }

        let body = request.body_string().unwrap_or_default();
        let params = parse_form_data(&body);
        let username = params.get("username").map(String::as_str).unwrap_or("");
        let password = params.get("password").map(String::as_str).unwrap_or("");

        let outcome = self.store.login(username, password);

        if outcome.is_success() {
            let body = format!(
                "<html><body><h1>Welcome, {}!</h1><p>Login successful</p></body></html>",
                username
            );
            Response::html(&body)
        } else {
            let body = format!(
                "<html><body><h1>Login failed</h1><p>{}</p></body></html>",
                outcome.description()
            );
            Response::new(StatusCode::Unauthorized)
                .with_content_type("text/html; charset=utf-8")
                .with_body(&body)
        }
    }
}

/// Parsea un body `application/x-www-form-urlencoded`
///
/// Formato: `key1=value1&key2=value2`. Los pares sin `=` se descartan.
/// Claves y valores se decodifican por separado; el `+` cuenta como
/// espacio y los escapes inválidos se dejan tal cual.
///
/// # Ejemplo
/// ```
/// use web_server::auth::parse_form_data;
///
/// let params = parse_form_data("username=alice&password=secret");
/// assert_eq!(params.get("username").unwrap(), "alice");
/// assert_eq!(params.get("password").unwrap(), "secret");
/// ```
pub fn parse_form_data(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for pair in body.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            params.insert(decode_form_component(key), decode_form_component(value));
        }
    }

    params
}

/// Decodifica un componente de formulario (`+` es espacio, luego %XX)
fn decode_form_component(component: &str) -> String {
    let with_spaces = component.replace('+', " ");
    match urlencoding::decode(&with_spaces) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => with_spaces,
    }
}
