//! # Servicio de Cuentas
//! src/auth/service.rs
//!
//! Este módulo implementa el registro y login de usuarios sobre un mapa
//! en memoria. Las cuentas viven solo mientras el proceso está vivo.
//!
//! Las contraseñas se guardan como digest SHA-256 en hexadecimal, nunca
//! en texto plano. El chequeo de existencia y la inserción de un registro
//! ocurren dentro de una sola sección crítica: dos registros concurrentes
//! del mismo usuario no pueden tener éxito ambos.

use sha2::{Digest, Sha256};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

/// Resultado de una operación de registro o login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// La operación fue exitosa
    Success,

    /// El nombre de usuario venía vacío
    EmptyUsername,

    /// La contraseña venía vacía
    EmptyPassword,

    /// Ya existe una cuenta con ese nombre
    DuplicateUsername,

    /// No existe una cuenta con ese nombre
    UserNotFound,

    /// La contraseña no coincide con la registrada
    WrongPassword,
}

impl AuthOutcome {
    /// Indica si el resultado es exitoso
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    /// Descripción legible del resultado, usada en las páginas HTML
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::auth::AuthOutcome;
    ///
    /// assert_eq!(AuthOutcome::WrongPassword.description(), "Wrong password");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            AuthOutcome::Success => "Success",
            AuthOutcome::EmptyUsername => "Username must not be empty",
            AuthOutcome::EmptyPassword => "Password must not be empty",
            AuthOutcome::DuplicateUsername => "Username already exists",
            AuthOutcome::UserNotFound => "User does not exist",
            AuthOutcome::WrongPassword => "Wrong password",
        }
    }
}

impl std::fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Almacén de cuentas en memoria, compartido entre todas las conexiones
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Usuario -> digest SHA-256 hexadecimal de la contraseña
    accounts: Mutex<HashMap<String, String>>,
}

impl AccountStore {
    /// Crea un almacén vacío
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Registra una cuenta nueva
    ///
    /// La verificación de existencia y la inserción son un solo paso
    /// atómico bajo el lock, así que un nombre duplicado nunca pisa la
    /// credencial ya guardada.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::auth::{AccountStore, AuthOutcome};
    ///
    /// let store = AccountStore::new();
    /// assert_eq!(store.register("alice", "secret"), AuthOutcome::Success);
    /// assert_eq!(store.register("alice", "otra"), AuthOutcome::DuplicateUsername);
    /// ```
    pub fn register(&self, username: &str, password: &str) -> AuthOutcome {
        if username.trim().is_empty() {
            return AuthOutcome::EmptyUsername;
        }
        if password.trim().is_empty() {
            return AuthOutcome::EmptyPassword;
        }

        let mut accounts = self.accounts.lock().unwrap();
        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => AuthOutcome::DuplicateUsername,
            Entry::Vacant(slot) => {
                slot.insert(digest(password));
                AuthOutcome::Success
            }
        }
    }

    /// Verifica las credenciales de un usuario
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::auth::{AccountStore, AuthOutcome};
    ///
    /// let store = AccountStore::new();
    /// store.register("alice", "secret");
    /// assert_eq!(store.login("alice", "secret"), AuthOutcome::Success);
    /// assert_eq!(store.login("alice", "mala"), AuthOutcome::WrongPassword);
    /// assert_eq!(store.login("bob", "x"), AuthOutcome::UserNotFound);
    /// ```
    pub fn login(&self, username: &str, password: &str) -> AuthOutcome {
        if username.trim().is_empty() {
            return AuthOutcome::EmptyUsername;
        }
        if password.trim().is_empty() {
            return AuthOutcome::EmptyPassword;
        }

        let accounts = self.accounts.lock().unwrap();
        match accounts.get(username) {
            None => AuthOutcome::UserNotFound,
            Some(stored) if *stored == digest(password) => AuthOutcome::Success,
            Some(_) => AuthOutcome::WrongPassword,
        }
    }

    /// Cantidad de cuentas registradas
    pub fn len(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    /// Indica si no hay cuentas registradas
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Calcula el digest SHA-256 de una contraseña en hexadecimal
fn digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_success() {
        let store = AccountStore::new();
        assert_eq!(store.register("alice", "secret"), AuthOutcome::Success);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_register_empty_username() {
        let store = AccountStore::new();
        assert_eq!(store.register("", "secret"), AuthOutcome::EmptyUsername);
        assert_eq!(store.register("   ", "secret"), AuthOutcome::EmptyUsername);
        assert!(store.is_empty());
    }

    #[test]
    fn test_register_empty_password() {
        let store = AccountStore::new();
        assert_eq!(store.register("alice", ""), AuthOutcome::EmptyPassword);
        assert_eq!(store.register("alice", "  "), AuthOutcome::EmptyPassword);
        assert!(store.is_empty());
    }

    #[test]
    fn test_register_duplicate_does_not_overwrite() {
        let store = AccountStore::new();
        assert_eq!(store.register("alice", "secret"), AuthOutcome::Success);
        assert_eq!(store.register("alice", "otra"), AuthOutcome::DuplicateUsername);

        // La credencial original sigue siendo válida
        assert_eq!(store.login("alice", "secret"), AuthOutcome::Success);
        assert_eq!(store.login("alice", "otra"), AuthOutcome::WrongPassword);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_login_success() {
        let store = AccountStore::new();
        store.register("alice", "secret");
        assert_eq!(store.login("alice", "secret"), AuthOutcome::Success);
    }

    #[test]
    fn test_login_wrong_password() {
        let store = AccountStore::new();
        store.register("alice", "secret");
        assert_eq!(store.login("alice", "wrong"), AuthOutcome::WrongPassword);
    }

    #[test]
    fn test_login_user_not_found() {
        let store = AccountStore::new();
        assert_eq!(store.login("nadie", "x"), AuthOutcome::UserNotFound);
    }

    #[test]
    fn test_login_empty_fields() {
        let store = AccountStore::new();
        assert_eq!(store.login("", "x"), AuthOutcome::EmptyUsername);
        assert_eq!(store.login("alice", ""), AuthOutcome::EmptyPassword);
    }

    #[test]
    fn test_passwords_not_stored_in_plaintext() {
        let store = AccountStore::new();
        store.register("alice", "secret");

        let accounts = store.accounts.lock().unwrap();
        let stored = accounts.get("alice").unwrap();
        assert_ne!(stored.as_str(), "secret");
        // SHA-256 en hex: 64 caracteres
        assert_eq!(stored.len(), 64);
    }

    #[test]
    fn test_outcome_descriptions() {
        assert_eq!(AuthOutcome::Success.description(), "Success");
        assert_eq!(AuthOutcome::EmptyUsername.description(), "Username must not be empty");
        assert_eq!(AuthOutcome::EmptyPassword.description(), "Password must not be empty");
        assert_eq!(AuthOutcome::DuplicateUsername.description(), "Username already exists");
        assert_eq!(AuthOutcome::UserNotFound.description(), "User does not exist");
        assert_eq!(AuthOutcome::WrongPassword.description(), "Wrong password");
    }

    #[test]
    fn test_concurrent_registration_single_winner() {
        let store = Arc::new(AccountStore::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.register("alice", &format!("clave-{}", i))
            }));
        }

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|outcome| outcome.is_success())
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
