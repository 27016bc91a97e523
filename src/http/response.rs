//! # Respuesta Fija
//! src/http/response.rs
//!
//! El servidor responde siempre con el mismo payload, sin status line,
//! sin headers y sin framing. El request no influye en la respuesta.

/// Acuse de recibo enviado a cada cliente (18 bytes ASCII)
pub const ACKNOWLEDGEMENT: &[u8; 18] = b"I got your message";

/// Retorna el payload de respuesta como slice
pub fn acknowledgement() -> &'static [u8] {
    ACKNOWLEDGEMENT
}
