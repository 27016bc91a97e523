//! # Ack Server
//! src/lib.rs
//!
//! Servidor TCP que lee un único request por conexión, extrae el request
//! line y los headers, los registra y responde un acuse fijo.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Tokenizer de request line y headers, y payload de respuesta
//! - `server`: Socket de escucha, loop de aceptación y ciclo de una conexión
//! - `config`: Argumentos CLI y variables de entorno
//! - `error`: Errores de arranque, de conexión y de parsing
//! - `logging`: Inicialización de `tracing`
//! - `metrics`: Contadores por ejecución
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use ack_server::config::Config;
//! use ack_server::server::Server;
//!
//! let config = Config {
//!     once: true,
//!     ..Config::default()
//! };
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod metrics;
pub mod server;

pub use error::{ConnectionError, ParseError, ServerError};
