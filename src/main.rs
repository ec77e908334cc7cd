//! # web_server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1. Parsea la configuración desde
//! CLI/env, la valida y arranca el servidor.

use web_server::config::Config;
use web_server::server::Server;

fn main() {
    println!("=================================");
    println!("  web_server HTTP/1.1");
    println!("=================================\n");

    // Configuración desde argumentos CLI y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("❌ Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    let mut server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
