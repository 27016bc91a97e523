//! # Parsing de Requests
//! src/http/request.rs
//!
//! Tokenizer del request line y de los headers.
//!
//! ## Formato aceptado
//!
//! ```text
//! GET /hello HTTP/1.1\n
//! Host: example.com\n
//! \n
//! ```
//!
//! ## Delimitadores
//!
//! 1. **Líneas**: `\n`. Un `\r` final se elimina salvo que se pida lo contrario.
//! 2. **Request Line**: un espacio simple entre `METHOD TARGET VERSION`; el resto se ignora
//! 3. **Headers**: primer `": "` de la línea separa nombre y valor
//! 4. **Fin de headers**: primera línea de longitud <= 1. Lo que sigue no se interpreta.

use crate::error::ParseError;
use std::collections::HashMap;

/// Request parseado
///
/// Solo se construye a través de [`RequestParser::parse`]; no existe un
/// request parcialmente poblado fuera del parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Verbo (ej: "GET"), sin validar contra un conjunto conocido
    method: String,

    /// Target de la petición (ej: "/hello")
    target: String,

    /// Tercer token del request line (ej: "HTTP/1.1")
    version: String,

    /// Headers (ej: {"Host": "example.com"}), primera ocurrencia gana
    headers: HashMap<String, String>,
}

/// Parser configurable de requests
#[derive(Debug, Clone, Copy)]
pub struct RequestParser {
    strip_carriage_return: bool,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self {
            strip_carriage_return: true,
        }
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conserva el `\r` final de cada línea como parte del último token
    pub fn keep_carriage_return(mut self, keep: bool) -> Self {
        self.strip_carriage_return = !keep;
        self
    }

    /// Parsea un request desde los bytes recibidos
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request line válido; headers malformados se descartan
    /// * `Err(ParseError::MalformedRequestLine)` - Menos de 3 tokens, o alguno vacío
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use ack_server::http::RequestParser;
    ///
    /// let raw = b"GET /hello HTTP/1.1\r\nHost: example.com\r\n\r\n";
    /// let request = RequestParser::new().parse(raw).unwrap();
    ///
    /// assert_eq!(request.target(), "/hello");
    /// assert_eq!(request.header("Host"), Some("example.com"));
    /// ```
    pub fn parse(&self, buffer: &[u8]) -> Result<Request, ParseError> {
        let text = String::from_utf8_lossy(buffer);
        let mut lines = text.split('\n');

        // split siempre produce al menos un elemento
        let request_line = lines.next().unwrap_or_default();
        let (method, target, version) = self.parse_request_line(request_line)?;

        let headers = self.parse_headers(lines);

        Ok(Request {
            method,
            target,
            version,
            headers,
        })
    }

    /// Formato: `METHOD TARGET VERSION`, separados por un único espacio.
    /// Tokens posteriores al tercero se ignoran.
    fn parse_request_line(&self, line: &str) -> Result<(String, String, String), ParseError> {
        let line = self.trim_line(line);
        let parts: Vec<&str> = line.split(' ').collect();

        match parts.as_slice() {
            [method, target, version, ..]
                if !method.is_empty() && !target.is_empty() && !version.is_empty() =>
            {
                Ok((method.to_string(), target.to_string(), version.to_string()))
            }
            _ => Err(ParseError::MalformedRequestLine(line.to_string())),
        }
    }

    fn parse_headers<'a>(&self, lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        for raw in lines {
            // Línea vacía (o solo "\r") marca el fin de los headers
            if raw.len() <= 1 {
                break;
            }

            let line = self.trim_line(raw);
            match line.split_once(": ") {
                Some((name, value)) => {
                    headers
                        .entry(name.to_string())
                        .or_insert_with(|| value.to_string());
                }
                None => {
                    tracing::debug!(line, "dropping header line without separator");
                }
            }
        }

        headers
    }

    fn trim_line<'a>(&self, line: &'a str) -> &'a str {
        if self.strip_carriage_return {
            line.strip_suffix('\r').unwrap_or(line)
        } else {
            line
        }
    }
}

impl Request {
    /// Parsea con la política por defecto (elimina `\r` finales)
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        RequestParser::default().parse(buffer)
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (nombre exacto, sin normalizar mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Headers ordenados por nombre, para salida determinista
    pub fn sorted_headers(&self) -> Vec<(&str, &str)> {
        let mut headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        headers.sort_unstable();
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_request() {
        let raw = b"GET /index.html HTTP/1.0\nName1: Val1\nName2: Val2\n\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/index.html");
        assert_eq!(request.version(), "HTTP/1.0");
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.header("Name1"), Some("Val1"));
        assert_eq!(request.header("Name2"), Some("Val2"));
    }

    #[test]
    fn test_parse_without_trailing_blank_line() {
        let raw = b"POST /submit HTTP/1.1\nHost: example.com";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), "POST");
        assert_eq!(request.header("Host"), Some("example.com"));
    }

    #[test]
    fn test_version_is_free_form() {
        let request = Request::parse(b"FETCH thing GOPHER/9\n\n").unwrap();
        assert_eq!(request.method(), "FETCH");
        assert_eq!(request.target(), "thing");
        assert_eq!(request.version(), "GOPHER/9");
    }

    #[test]
    fn test_two_tokens_is_malformed() {
        let result = Request::parse(b"GET /\n");
        assert_eq!(
            result,
            Err(ParseError::MalformedRequestLine("GET /".to_string()))
        );
    }

    #[test]
    fn test_empty_request_is_malformed() {
        assert!(matches!(
            Request::parse(b""),
            Err(ParseError::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let request = Request::parse(b"GET / HTTP/1.1 extra tokens\nHost: a\n\n").unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/");
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.header("Host"), Some("a"));
    }

    #[test]
    fn test_empty_tokens_are_malformed() {
        assert!(Request::parse(b"GET  / HTTP/1.1\n\n").is_err());
        assert!(Request::parse(b"GET / \n\n").is_err());
        assert!(Request::parse(b" GET / HTTP/1.1\n\n").is_err());
    }

    #[test]
    fn test_header_without_separator_is_dropped() {
        let raw = b"GET / HTTP/1.1\ngarbage\nAccept: */*\nNoSpace:value\n\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("Accept"), Some("*/*"));
        assert_eq!(request.header("garbage"), None);
        assert_eq!(request.header("NoSpace"), None);
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let raw = b"GET / HTTP/1.1\nX: 1\nX: 2\n\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("X"), Some("1"));
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let raw = b"GET / HTTP/1.1\nHost: a\nhost: b\n\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("a"));
        assert_eq!(request.header("host"), Some("b"));
    }

    #[test]
    fn test_value_split_on_first_separator_only() {
        let raw = b"GET / HTTP/1.1\nX-Time: 12: 30\n\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("X-Time"), Some("12: 30"));
    }

    #[test]
    fn test_blank_line_ends_headers() {
        let raw = b"POST / HTTP/1.1\nA: 1\n\nB: 2\nC: 3\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("A"), Some("1"));
        assert_eq!(request.header("B"), None);
        assert_eq!(request.header("C"), None);
    }

    #[test]
    fn test_single_char_line_ends_headers() {
        let raw = b"GET / HTTP/1.1\nA: 1\nx\nB: 2\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("A"), Some("1"));
        assert_eq!(request.header("B"), None);
    }

    #[test]
    fn test_crlf_is_stripped_by_default() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:3000\r\n\r\nBody: no\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.header("Host"), Some("localhost:3000"));
        assert_eq!(request.header("Body"), None);
    }

    #[test]
    fn test_keep_carriage_return() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\nBody: no\r\n";
        let request = RequestParser::new()
            .keep_carriage_return(true)
            .parse(raw)
            .unwrap();

        assert_eq!(request.version(), "HTTP/1.1\r");
        assert_eq!(request.header("Host"), Some("localhost\r"));
        assert_eq!(request.header("Body"), None);
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let raw = b"GET /\xff HTTP/1.1\n\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.target(), "/\u{FFFD}");
    }

    #[test]
    fn test_sorted_headers() {
        let raw = b"GET / HTTP/1.1\nZeta: z\nAlpha: a\n\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(
            request.sorted_headers(),
            vec![("Alpha", "a"), ("Zeta", "z")]
        );
    }
}
