//! # Módulo HTTP
//!
//! Subconjunto mínimo de HTTP/1.x que entiende el servidor:
//!
//! - Parsing del request line (método, target, versión)
//! - Parsing de headers `Name: Value` hasta la primera línea vacía
//! - Acuse de recibo fijo como respuesta
//!
//! No se interpreta body, chunked encoding ni keep-alive.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /hello HTTP/1.1\r\n
//! Host: example.com\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! I got your message
//! ```

pub mod request;   // Tokenizer de request line y headers
pub mod response;  // Payload fijo de respuesta

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Request, RequestParser};
pub use response::ACKNOWLEDGEMENT;
