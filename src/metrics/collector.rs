//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Contadores de resultado por conexión. El servidor es de un solo thread,
//! así que el collector no necesita sincronización.

use crate::error::ConnectionError;
use crate::server::connection::Outcome;
use std::time::{Duration, Instant};

/// Collector de métricas de una ejecución del servidor
#[derive(Debug)]
pub struct MetricsCollector {
    accepted: u64,
    served: u64,
    malformed: u64,
    peer_closed: u64,
    accept_errors: u64,
    receive_errors: u64,
    write_errors: u64,

    /// Suma de tiempos de manejo (en microsegundos)
    total_handling_us: u64,

    start_time: Instant,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            accepted: 0,
            served: 0,
            malformed: 0,
            peer_closed: 0,
            accept_errors: 0,
            receive_errors: 0,
            write_errors: 0,
            total_handling_us: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_accepted(&mut self) {
        self.accepted += 1;
    }

    pub fn record_accept_error(&mut self) {
        self.accept_errors += 1;
    }

    /// Registra el resultado de una conexión ya cerrada
    pub fn record_connection(
        &mut self,
        result: &Result<Outcome, ConnectionError>,
        latency: Duration,
    ) {
        match result {
            Ok(Outcome::Served(_)) => self.served += 1,
            Ok(Outcome::Malformed(_)) => self.malformed += 1,
            Ok(Outcome::PeerClosed) => self.peer_closed += 1,
            Err(ConnectionError::Receive(_)) => self.receive_errors += 1,
            Err(ConnectionError::Write(_)) => self.write_errors += 1,
        }

        let latency_us = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.total_handling_us = self.total_handling_us.saturating_add(latency_us);
    }

    /// Conexiones ya procesadas (con o sin error)
    pub fn handled(&self) -> u64 {
        self.served + self.malformed + self.peer_closed + self.receive_errors + self.write_errors
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let handled = self.handled();
        let avg = if handled == 0 {
            0
        } else {
            self.total_handling_us / handled
        };

        MetricsSnapshot {
            accepted: self.accepted,
            served: self.served,
            malformed: self.malformed,
            peer_closed: self.peer_closed,
            accept_errors: self.accept_errors,
            receive_errors: self.receive_errors,
            write_errors: self.write_errors,
            avg_handling_us: avg,
            uptime_secs: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot de métricas (para uso externo)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub accepted: u64,
    pub served: u64,
    pub malformed: u64,
    pub peer_closed: u64,
    pub accept_errors: u64,
    pub receive_errors: u64,
    pub write_errors: u64,
    pub avg_handling_us: u64,
    pub uptime_secs: u64,
}

impl MetricsSnapshot {
    /// Registra el snapshot como un único evento estructurado
    pub fn log(&self) {
        tracing::info!(
            accepted = self.accepted,
            served = self.served,
            malformed = self.malformed,
            peer_closed = self.peer_closed,
            accept_errors = self.accept_errors,
            receive_errors = self.receive_errors,
            write_errors = self.write_errors,
            avg_handling_us = self.avg_handling_us,
            "server stopped"
        );
    }
}
