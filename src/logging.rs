//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing` con un filtro por entorno. `RUST_LOG` tiene
//! prioridad sobre el nivel configurado por CLI.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global
///
/// Llamadas repetidas (ej: desde varios tests) no fallan: solo la primera
/// instala el subscriber.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ack_server={default_level}")));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
