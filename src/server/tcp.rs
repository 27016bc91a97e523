//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Loop de aceptación de un solo thread: acepta una conexión, la atiende
//! hasta cerrarla y vuelve a aceptar. Los errores de accept y de conexión
//! se registran y no detienen el loop; tras un error de accept se espera
//! con backoff exponencial para no girar en caliente (ej: EMFILE).

use crate::config::Config;
use crate::error::ServerError;
use crate::http::RequestParser;
use crate::metrics::{MetricsCollector, MetricsSnapshot};
use crate::server::connection::{ConnectionHandler, Outcome, RequestObserver};
use crate::server::listener::Listener;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Espera inicial tras un error de accept
const ACCEPT_BACKOFF_BASE: Duration = Duration::from_millis(10);

/// Espera máxima tras errores de accept consecutivos
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Servidor de acuse de recibo
pub struct Server {
    config: Config,
    handler: ConnectionHandler,
    metrics: MetricsCollector,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let parser = RequestParser::new().keep_carriage_return(config.keep_carriage_return);
        let handler = ConnectionHandler::new(parser, config.buffer_size);

        Self {
            config,
            handler,
            metrics: MetricsCollector::new(),
        }
    }

    /// Reemplaza el destino de observabilidad de los requests
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.handler = self.handler.with_observer(observer);
        self
    }

    /// Valida la configuración, hace bind y atiende conexiones
    ///
    /// Solo retorna error por fallos de arranque (configuración, resolución
    /// o setup del socket).
    pub fn run(&mut self) -> Result<MetricsSnapshot, ServerError> {
        self.config.validate()?;

        let listener = Listener::bind(&self.config)?;
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(address = %addr, "listening");
        }

        Ok(self.serve(&listener))
    }

    /// Atiende conexiones sobre un listener ya abierto
    ///
    /// Retorna al alcanzar el límite de conexiones; sin límite no retorna.
    pub fn serve(&mut self, listener: &Listener) -> MetricsSnapshot {
        let limit = self.config.connection_limit();
        let mut accept_failures: u32 = 0;

        while limit.map_or(true, |max| self.metrics.handled() < max) {
            let (stream, peer) = match listener.accept() {
                Ok(accepted) => {
                    accept_failures = 0;
                    accepted
                }
                Err(e) => {
                    accept_failures = accept_failures.saturating_add(1);
                    let wait = accept_backoff(accept_failures);
                    tracing::warn!(
                        error = %e,
                        consecutive = accept_failures,
                        backoff_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        "accept failed, retrying after backoff"
                    );
                    self.metrics.record_accept_error();
                    thread::sleep(wait);
                    continue;
                }
            };

            self.metrics.record_accepted();
            tracing::debug!(peer = %peer, "connection accepted");

            let start = Instant::now();
            let result = self.handler.handle(stream);
            let latency = start.elapsed();

            match &result {
                Ok(Outcome::Served(_)) | Ok(Outcome::Malformed(_)) => {
                    tracing::debug!(peer = %peer, elapsed_us = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX), "acknowledged");
                }
                Ok(Outcome::PeerClosed) => {}
                Err(e) => {
                    tracing::warn!(peer = %peer, error = %e, "connection failed");
                }
            }

            self.metrics.record_connection(&result, latency);
        }

        let snapshot = self.metrics.snapshot();
        snapshot.log();
        snapshot
    }
}

/// Espera tras `failures` errores de accept consecutivos: se duplica en
/// cada fallo, acotada por `ACCEPT_BACKOFF_MAX`
fn accept_backoff(failures: u32) -> Duration {
    let exponent = failures.saturating_sub(1).min(16);
    ACCEPT_BACKOFF_BASE
        .saturating_mul(1 << exponent)
        .min(ACCEPT_BACKOFF_MAX)
}
