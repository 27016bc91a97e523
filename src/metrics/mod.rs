//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Contadores por ejecución del servidor:
//! - Conexiones aceptadas y errores de accept
//! - Requests atendidos y request lines malformados
//! - Errores de receive/write por conexión

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
