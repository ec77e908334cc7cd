//! # Archivos Estáticos
//! src/static_files/mod.rs
//!
//! Este módulo resuelve paths de requests a archivos bajo un directorio
//! raíz configurado, aplicando las reglas de caching condicional de HTTP.
//!
//! ## Resolución de un path
//!
//! 1. Se decodifica el percent-encoding del path.
//! 2. Se verifica léxicamente que el path no escape de la raíz (los `..`
//!    se cuentan antes de tocar el filesystem, así un path inexistente
//!    que intenta escapar igual recibe 403 y no 404).
//! 3. Archivo inexistente o directorio: not-found.
//! 4. Se canonicaliza el path resuelto y se re-verifica que siga siendo
//!    descendiente de la raíz canónica, para cubrir symlinks.
//!
//! ## Caching condicional
//!
//! El validador es `"<mtime>-<size>"` (mtime en milisegundos). Si el
//! `If-None-Match` del cliente coincide byte a byte, se responde 304. Si
//! no, un `If-Modified-Since` válido con fecha igual o posterior a la
//! modificación del archivo también produce 304; una fecha malformada se
//! ignora. Las fechas HTTP tienen granularidad de segundos, así que el
//! mtime se trunca a segundos enteros para esa comparación.

use crate::http::{Request, Response, StatusCode};
use httpdate::{fmt_http_date, parse_http_date};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Errores al resolver un archivo estático
///
/// El router mapea `NotFound` a 404 e `Io` a 500. El 403 por path
/// traversal no es un error: el handler lo responde directamente.
#[derive(Debug)]
pub enum FileError {
    /// El archivo no existe o es un directorio
    NotFound,

    /// Falla de I/O leyendo el archivo o sus metadatos
    Io(io::Error),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound => write!(f, "File not found"),
            FileError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::NotFound => None,
            FileError::Io(e) => Some(e),
        }
    }
}

/// Sirve archivos desde un directorio raíz con caching condicional
#[derive(Debug, Clone)]
pub struct StaticFileHandler {
    root: PathBuf,
}

impl StaticFileHandler {
    /// Crea un handler que sirve archivos bajo `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resuelve `path` (ya sin query string) y aplica caching condicional
    ///
    /// # Retorna
    ///
    /// * `Ok(Response)` - 200 con el archivo, 304 si la copia del cliente
    ///   sigue vigente, o 403 si el path escapa de la raíz
    /// * `Err(FileError::NotFound)` - archivo inexistente o directorio
    /// * `Err(FileError::Io)` - falla de I/O leyendo el archivo
    pub fn handle(&self, path: &str, request: &Request) -> Result<Response, FileError> {
        // 1. Decodificar percent-encoding; bytes inválidos cuentan como
        //    recurso inexistente
        let decoded = match urlencoding::decode(path) {
            Ok(cow) => cow.into_owned(),
            Err(_) => return Err(FileError::NotFound),
        };

        // 2. Chequeo léxico de traversal, antes de tocar el filesystem
        if Self::escapes_root(&decoded) {
            return Ok(Response::error(StatusCode::Forbidden, "Forbidden"));
        }

        let candidate = self.root.join(decoded.trim_start_matches('/'));

        let metadata = match fs::metadata(&candidate) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(FileError::NotFound),
            Err(e) => return Err(FileError::Io(e)),
        };
        if metadata.is_dir() {
            return Err(FileError::NotFound);
        }

        // 3. Re-chequeo sobre el path canónico: cubre symlinks que apunten
        //    fuera de la raíz
        let canonical_root = fs::canonicalize(&self.root).map_err(FileError::Io)?;
        let canonical = match fs::canonicalize(&candidate) {
            Ok(p) => p,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(FileError::NotFound),
            Err(e) => return Err(FileError::Io(e)),
        };
        if !canonical.starts_with(&canonical_root) {
            return Ok(Response::error(StatusCode::Forbidden, "Forbidden"));
        }

        // 4. Validador: mtime en milisegundos + tamaño
        let modified = metadata.modified().map_err(FileError::Io)?;
        let mtime_ms = modified
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let etag = format!("\"{}-{}\"", mtime_ms, metadata.len());
        let last_modified = fmt_http_date(modified);

        // 5. If-None-Match: comparación exacta, gana sobre If-Modified-Since
        if let Some(if_none_match) = request.header("if-none-match") {
            if if_none_match == etag {
                return Ok(Response::not_modified()
                    .with_header("ETag", &etag)
                    .with_header("Last-Modified", &last_modified));
            }
        }

        // 6. If-Modified-Since: fecha igual o posterior al mtime -> 304.
        //    Valores malformados se tratan como ausentes.
        if let Some(if_modified_since) = request.header("if-modified-since") {
            if let Ok(since) = parse_http_date(if_modified_since) {
                if since >= truncate_to_seconds(modified) {
                    return Ok(Response::not_modified()
                        .with_header("ETag", &etag)
                        .with_header("Last-Modified", &last_modified));
                }
            }
        }

        // 7. Contenido completo con Content-Type deducido por extensión
        let data = fs::read(&canonical).map_err(FileError::Io)?;
        let content_type = mime_guess::from_path(&candidate).first_or_octet_stream();

        Ok(Response::new(StatusCode::Ok)
            .with_content_type(content_type.essence_str())
            .with_header("ETag", &etag)
            .with_header("Last-Modified", &last_modified)
            .with_body_bytes(data))
    }

    /// Verifica léxicamente si un path decodificado sale de la raíz
    ///
    /// Recorre los componentes llevando la profundidad: cada `..` resta y
    /// cada componente normal suma. Si la profundidad se vuelve negativa
    /// en algún punto, el path escapó.
    fn escapes_root(decoded: &str) -> bool {
        let mut depth: i32 = 0;
        for component in Path::new(decoded).components() {
            match component {
                Component::ParentDir => {
                    depth -= 1;
                    if depth < 0 {
                        return true;
                    }
                }
                Component::Normal(_) => depth += 1,
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        false
    }
}

/// Trunca un instante a segundos enteros, la granularidad de las fechas HTTP
fn truncate_to_seconds(time: SystemTime) -> SystemTime {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    UNIX_EPOCH + Duration::from_secs(secs)
}
