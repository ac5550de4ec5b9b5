use std::collections::HashMap;

/// Represents a parsed HTTP response head.
///
/// Contains the status line fields and headers exactly as the server sent
/// them, minus surrounding whitespace. The body is never stored; callers
/// that need the stream positioned past one skip it on the connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    /// HTTP version from the status line (e.g. "HTTP/1.1")
    pub version: String,
    /// Status code as the server spelled it (e.g. "200")
    pub status: String,
    /// Reason phrase (e.g. "OK")
    pub reason: String,
    /// Response headers as key-value pairs; a repeated name keeps the last value
    pub headers: HashMap<String, String>,
}

impl Response {
    /// Looks up a header value by name.
    ///
    /// Names are compared byte-for-byte, so `connection` and `Connection`
    /// are different keys.
    ///
    /// # Example
    ///
    /// ```
    /// # use prowl::http::response::Response;
    /// let mut response = Response::default();
    /// response.headers.insert("Server".to_string(), "nginx".to_string());
    /// assert_eq!(response.header("Server"), Some("nginx"));
    /// assert_eq!(response.header("server"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Returns the declared body length, if a `Content-Length` header is
    /// present and parses as a number.
    pub fn content_length(&self) -> Option<u64> {
        self.header("Content-Length")
            .and_then(|value| value.parse().ok())
    }

    /// Whether the server asked for this connection to be closed after the
    /// current exchange (`Connection` header equal to `close`).
    pub fn wants_close(&self) -> bool {
        self.header("Connection") == Some("close")
    }
}
