//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (`listener`)
//! 2. Acepta conexiones entrantes, una a la vez (`tcp`)
//! 3. Lee y parsea un request por conexión (`connection`)
//! 4. Responde el acuse fijo y cierra la conexión

pub mod connection;
pub mod listener;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{Connection, ConnectionHandler, Outcome, RequestObserver, TracingObserver};
pub use listener::Listener;
pub use tcp::Server;
