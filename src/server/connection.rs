//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Ciclo de vida de una conexión:
//!
//! ```text
//! receive → parse → observe → write ack → close
//! ```
//!
//! Un solo request por conexión. No hay reintentos: un fallo de receive o
//! write termina el ciclo, y la conexión se cierra exactamente una vez en
//! todos los caminos.

use crate::error::{ConnectionError, ParseError};
use crate::http::{response, Request, RequestParser};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;

/// Stream de bytes conectado con cierre explícito
pub trait Connection: Read + Write {
    /// Libera la conexión
    fn close(&mut self) -> io::Result<()>;

    /// Dirección del peer, para logs
    fn peer(&self) -> String {
        "unknown".to_string()
    }
}

impl Connection for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // El peer pudo haber cerrado antes que nosotros
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }

    fn peer(&self) -> String {
        self.peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

/// Destino de observabilidad para los requests parseados
pub trait RequestObserver: Send + Sync {
    fn observe(&self, request: &Request);
}

/// Observer por defecto: request line y headers como eventos de `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn observe(&self, request: &Request) {
        tracing::info!(
            method = request.method(),
            target = request.target(),
            version = request.version(),
            headers = request.headers().len(),
            "{} {} {}",
            request.method(),
            request.target(),
            request.version()
        );

        for (name, value) in request.sorted_headers() {
            tracing::info!(name, value, "{}: {}", name, value);
        }
    }
}

/// Resultado de una conexión atendida sin errores de I/O
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Request parseado y acuse enviado
    Served(Request),

    /// Request line inválido; el acuse se envió igualmente
    Malformed(ParseError),

    /// El peer cerró sin enviar datos; no se escribió nada
    PeerClosed,
}

/// Maneja exactamente un ciclo request/response por conexión
#[derive(Clone)]
pub struct ConnectionHandler {
    parser: RequestParser,
    buffer_size: usize,
    observer: Arc<dyn RequestObserver>,
}

impl ConnectionHandler {
    pub fn new(parser: RequestParser, buffer_size: usize) -> Self {
        Self {
            parser,
            buffer_size,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Reemplaza el destino de observabilidad
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Atiende la conexión y la cierra
    ///
    /// El cierre ocurre siempre, después del intento de write, incluso si
    /// el receive o el write fallaron.
    pub fn handle<C: Connection>(&self, mut conn: C) -> Result<Outcome, ConnectionError> {
        let peer = conn.peer();
        let result = self.exchange(&mut conn, &peer);

        if let Err(e) = conn.close() {
            tracing::warn!(peer = %peer, error = %e, "error closing connection");
        }

        result
    }

    fn exchange<C: Connection>(&self, conn: &mut C, peer: &str) -> Result<Outcome, ConnectionError> {
        // Buffer en ceros; solo se entregan al parser los bytes recibidos
        let mut buffer = vec![0u8; self.buffer_size];
        let bytes_read = conn.read(&mut buffer).map_err(ConnectionError::Receive)?;

        if bytes_read == 0 {
            tracing::debug!(peer, "peer closed before sending data");
            return Ok(Outcome::PeerClosed);
        }

        tracing::debug!(peer, bytes = bytes_read, "received request");

        let outcome = match self.parser.parse(&buffer[..bytes_read]) {
            Ok(request) => {
                self.observer.observe(&request);
                Outcome::Served(request)
            }
            Err(e) => {
                tracing::warn!(peer, error = %e, "parse error, sending acknowledgement anyway");
                Outcome::Malformed(e)
            }
        };

        conn.write_all(response::acknowledgement())
            .and_then(|_| conn.flush())
            .map_err(ConnectionError::Write)?;

        Ok(outcome)
    }
}

impl Default for ConnectionHandler {
    fn default() -> Self {
        Self::new(RequestParser::default(), 255)
    }
}
