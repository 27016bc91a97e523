//! # Ack Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada: parsea la configuración, inicializa el logging y
//! atiende conexiones hasta alcanzar el límite configurado.

use ack_server::config::Config;
use ack_server::logging;
use ack_server::server::Server;

fn main() {
    // Crear configuración (CLI + variables de entorno)
    let config = Config::new();

    logging::init(&config.log_level);
    config.log_summary();

    // Crear el servidor
    let mut server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "fatal error");
        std::process::exit(1);
    }
}
