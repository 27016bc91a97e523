//! # Errores del Servidor
//! src/error.rs
//!
//! Taxonomía de errores, separada por alcance:
//!
//! - [`ServerError`]: fallos del proceso (arranque y aceptación)
//! - [`ConnectionError`]: fallos de I/O limitados a una sola conexión
//! - [`ParseError`]: fallos estructurales del request line
//! - [`ConfigError`]: valores de configuración inválidos

use std::io;
use thiserror::Error;

/// Errores de parsing de un request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// El request line tiene menos de tres tokens, o alguno de ellos vacío
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),
}

/// Errores de I/O de una conexión individual
///
/// Nunca terminan el proceso: el loop de aceptación los registra y sigue.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Error reading from socket: {0}")]
    Receive(#[source] io::Error),

    #[error("Error writing to socket: {0}")]
    Write(#[source] io::Error),
}

/// Errores a nivel de servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo resolver `host:port` a ninguna dirección
    #[error("Address resolution failed for {address}: {source}")]
    Resolution {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Fallo al crear, configurar, hacer bind o listen del socket
    #[error("Socket setup failed ({step}): {source}")]
    SocketSetup {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    /// Fallo al aceptar una conexión (recuperable)
    #[error("Error on accept: {0}")]
    Accept(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Valores de configuración fuera de rango
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Buffer size must be between 1 and {max} bytes, got {got}")]
    BufferSize { got: usize, max: usize },

    #[error("Max connections must be >= 1")]
    ZeroConnections,

    #[error("Host must not be empty")]
    EmptyHost,
}
