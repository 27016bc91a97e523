//! # Socket de Escucha
//! src/server/listener.rs
//!
//! Resuelve `host:port`, crea el socket con `SO_REUSEADDR`, hace bind y
//! listen con el backlog configurado. Usamos `socket2` porque
//! `std::net::TcpListener::bind` no permite elegir backlog ni opciones.

use crate::config::Config;
use crate::error::ServerError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

/// Socket TCP en estado listening
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Crea el socket de escucha a partir de la configuración
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let addr = resolve(&config.address())?;
        Self::bind_addr(addr, config.backlog)
    }

    /// Crea el socket de escucha en una dirección ya resuelta
    pub fn bind_addr(addr: SocketAddr, backlog: i32) -> Result<Self, ServerError> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(|source| ServerError::SocketSetup { step: "socket", source })?;

        // Permite reutilizar el puerto inmediatamente tras reiniciar
        socket
            .set_reuse_address(true)
            .map_err(|source| ServerError::SocketSetup { step: "setsockopt", source })?;

        socket
            .bind(&addr.into())
            .map_err(|source| ServerError::SocketSetup { step: "bind", source })?;

        socket
            .listen(backlog)
            .map_err(|source| ServerError::SocketSetup { step: "listen", source })?;

        Ok(Self {
            inner: socket.into(),
        })
    }

    /// Bloquea hasta que un cliente se conecta
    pub fn accept(&self) -> Result<(TcpStream, SocketAddr), ServerError> {
        self.inner.accept().map_err(ServerError::Accept)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}

/// Resuelve una dirección `host:port` y toma la primera candidata
fn resolve(address: &str) -> Result<SocketAddr, ServerError> {
    let mut candidates = address
        .to_socket_addrs()
        .map_err(|source| ServerError::Resolution {
            address: address.to_string(),
            source,
        })?;

    candidates.next().ok_or_else(|| ServerError::Resolution {
        address: address.to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
    })
}
