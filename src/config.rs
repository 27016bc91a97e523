//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./ack_server --port 3000 --buffer-size 255 --once
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! ACK_PORT=3000 ACK_HOST=0.0.0.0 ACK_LOG_LEVEL=debug ./ack_server
//! ```

use crate::error::ConfigError;
use clap::Parser;

/// Tamaño máximo de buffer que se acepta en `--buffer-size`
pub const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "ack_server")]
#[command(about = "Lee un request, registra request line y headers, y responde un acuse fijo")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "3000", env = "ACK_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha (0.0.0.0 = todas las interfaces)
    #[arg(long, default_value = "0.0.0.0", env = "ACK_HOST")]
    pub host: String,

    /// Conexiones pendientes permitidas en la cola de listen
    #[arg(long, default_value = "0", env = "ACK_BACKLOG")]
    pub backlog: i32,

    // === Conexión ===

    /// Máximo de bytes leídos en el único receive de cada conexión
    #[arg(long = "buffer-size", default_value = "255", env = "ACK_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Detenerse después de atender este número de conexiones
    #[arg(long = "max-connections", env = "ACK_MAX_CONNECTIONS")]
    pub max_connections: Option<u64>,

    /// Atender una sola conexión y salir (equivale a --max-connections 1)
    #[arg(long, env = "ACK_ONCE")]
    pub once: bool,

    // === Parsing ===

    /// No eliminar el '\r' final de cada línea antes de tokenizar
    #[arg(long = "keep-carriage-return", env = "ACK_KEEP_CR")]
    pub keep_carriage_return: bool,

    // === Logging ===

    /// Nivel de log por defecto (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "ACK_LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use ack_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:3000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Límite efectivo de conexiones; `None` = atender indefinidamente
    pub fn connection_limit(&self) -> Option<u64> {
        if self.once {
            Some(1)
        } else {
            self.max_connections
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        if self.buffer_size == 0 || self.buffer_size > MAX_BUFFER_SIZE {
            return Err(ConfigError::BufferSize {
                got: self.buffer_size,
                max: MAX_BUFFER_SIZE,
            });
        }

        if self.max_connections == Some(0) {
            return Err(ConfigError::ZeroConnections);
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        tracing::info!(
            address = %self.address(),
            backlog = self.backlog,
            buffer_size = self.buffer_size,
            connection_limit = ?self.connection_limit(),
            strip_cr = !self.keep_carriage_return,
            "configuration loaded"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            backlog: 0,
            buffer_size: 255,
            max_connections: None,
            once: false,
            keep_carriage_return: false,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.backlog, 0);
        assert_eq!(config.buffer_size, 255);
        assert_eq!(config.connection_limit(), None);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 8080;
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_parse_cli_flags() {
        let config = Config::try_parse_from([
            "ack_server",
            "--port",
            "4000",
            "--buffer-size",
            "1024",
            "--max-connections",
            "3",
            "--keep-carriage-return",
        ])
        .unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.buffer_size, 1024);
        assert_eq!(config.connection_limit(), Some(3));
        assert!(config.keep_carriage_return);
    }

    #[test]
    fn test_once_overrides_max_connections() {
        let config =
            Config::try_parse_from(["ack_server", "--once", "--max-connections", "5"]).unwrap();
        assert_eq!(config.connection_limit(), Some(1));
    }

    #[test]
    fn test_invalid_port_rejected_by_cli() {
        assert!(Config::try_parse_from(["ack_server", "--port", "70000"]).is_err());
    }

    // ==================== Validation ====================

    #[test]
    fn test_validate_zero_buffer() {
        let mut config = Config::default();
        config.buffer_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BufferSize { got: 0, .. })
        ));
    }

    #[test]
    fn test_validate_huge_buffer() {
        let mut config = Config::default();
        config.buffer_size = MAX_BUFFER_SIZE + 1;
        assert!(config.validate().is_err());

        config.buffer_size = MAX_BUFFER_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_connections() {
        let mut config = Config::default();
        config.max_connections = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroConnections));
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyHost));
    }
}
