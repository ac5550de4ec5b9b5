use std::collections::HashMap;
use std::io::ErrorKind;
use std::mem;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::response::Response;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The transport failed while reading the response head.
    #[error("read failed: {0}")]
    Io(#[source] std::io::Error),
    /// The stream ended before the blank line terminating the head.
    #[error("connection closed before end of response head")]
    UnexpectedEof,
    /// The bytes do not follow the status-line and header grammar.
    #[error("malformed HTTP response")]
    Malformed,
}

/// Parser states, in the order a well-formed head visits them. The parser
/// bounces between `HeaderName` and `HeaderValue` until the blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Version,
    Status,
    Reason,
    HeaderName,
    HeaderValue,
    Done,
}

/// Incremental HTTP/1.1 response head parser.
///
/// Bytes go in one at a time through [`feed`](ResponseParser::feed); once it
/// reports completion the accumulated [`Response`] comes out of
/// [`into_response`](ResponseParser::into_response). The state machine does
/// no I/O of its own, so the line and trimming rules can be tested without a
/// socket; [`read_response`] drives it from a stream.
#[derive(Debug)]
pub struct ResponseParser {
    state: State,
    /// Bytes of the field currently being accumulated, delimiters included.
    line: Vec<u8>,
    /// Previous byte fed, for CRLF detection. A bare `\n` is field data.
    prev: u8,
    /// Header name awaiting its value.
    name: String,
    version: String,
    status: String,
    reason: String,
    headers: HashMap<String, String>,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: State::Version,
            line: Vec::new(),
            prev: 0,
            name: String::new(),
            version: String::new(),
            status: String::new(),
            reason: String::new(),
            headers: HashMap::new(),
        }
    }

    /// Feeds one byte to the state machine.
    ///
    /// Returns `Ok(true)` when the byte completed the head, `Ok(false)` when
    /// more bytes are needed. Must not be called again after it returns
    /// `Ok(true)`.
    ///
    /// A space ends the version and status fields, a colon ends a header
    /// name, and CRLF ends the reason, a header value, or (on an otherwise
    /// empty line) the whole head. CRLF anywhere else is malformed.
    pub fn feed(&mut self, byte: u8) -> Result<bool, ParseError> {
        debug_assert!(self.state != State::Done, "feed called after completion");

        self.line.push(byte);
        let prev = mem::replace(&mut self.prev, byte);

        match byte {
            b' ' => match self.state {
                State::Version => {
                    self.version = self.take_field();
                    self.state = State::Status;
                }
                State::Status => {
                    self.status = self.take_field();
                    self.state = State::Reason;
                }
                _ => {}
            },
            b':' if self.state == State::HeaderName => {
                self.name = self.take_field();
                self.state = State::HeaderValue;
            }
            b'\n' if prev == b'\r' => match self.state {
                State::Reason => {
                    self.reason = self.take_field();
                    self.state = State::HeaderName;
                }
                State::HeaderValue => {
                    let value = self.take_field();
                    let name = mem::take(&mut self.name);
                    self.headers.insert(name, value);
                    self.state = State::HeaderName;
                }
                // A line holding nothing but CRLF ends the head.
                State::HeaderName if self.line.len() == 2 => {
                    self.line.clear();
                    self.state = State::Done;
                    return Ok(true);
                }
                _ => return Err(ParseError::Malformed),
            },
            _ => {}
        }

        Ok(false)
    }

    /// Consumes the parser and returns the parsed response. Only valid once
    /// [`feed`](ResponseParser::feed) has returned `Ok(true)`.
    pub fn into_response(self) -> Response {
        debug_assert!(self.state == State::Done, "response head not complete");
        Response {
            version: self.version,
            status: self.status,
            reason: self.reason,
            headers: self.headers,
        }
    }

    /// Takes the accumulated line minus the delimiter byte just pushed,
    /// trimmed of surrounding whitespace.
    fn take_field(&mut self) -> String {
        self.line.pop();
        let field = String::from_utf8_lossy(&self.line).trim().to_string();
        self.line.clear();
        field
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads one response head from `reader`, byte by byte, stopping at the
/// blank line. No body bytes are consumed.
///
/// A clean EOF mid-head surfaces as [`ParseError::UnexpectedEof`]; any other
/// transport failure as [`ParseError::Io`].
pub async fn read_response<R>(reader: &mut R) -> Result<Response, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut parser = ResponseParser::new();
    loop {
        let byte = reader.read_u8().await.map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                ParseError::UnexpectedEof
            } else {
                ParseError::Io(err)
            }
        })?;
        if parser.feed(byte)? {
            return Ok(parser.into_response());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(parser: &mut ResponseParser, bytes: &[u8]) -> Result<bool, ParseError> {
        for &byte in bytes {
            if parser.feed(byte)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    #[test]
    fn parse_simple_head() {
        let mut parser = ResponseParser::new();
        let done = feed_all(&mut parser, b"HTTP/1.1 200 OK\r\nHost: example.com\r\n\r\n").unwrap();
        assert!(done);

        let response = parser.into_response();
        assert_eq!(response.version, "HTTP/1.1");
        assert_eq!(response.status, "200");
        assert_eq!(response.reason, "OK");
        assert_eq!(response.header("Host"), Some("example.com"));
    }

    #[test]
    fn head_incomplete_until_blank_line() {
        let mut parser = ResponseParser::new();
        let done = feed_all(&mut parser, b"HTTP/1.1 200 OK\r\nHost: example.com\r\n").unwrap();
        assert!(!done);
    }

    #[test]
    fn bare_lf_does_not_end_a_line() {
        let mut parser = ResponseParser::new();
        let done = feed_all(&mut parser, b"HTTP/1.1 200 OK\r\nX: a\nb\r\n\r\n").unwrap();
        assert!(done);
        assert_eq!(parser.into_response().header("X"), Some("a\nb"));
    }

    #[test]
    fn crlf_inside_version_is_malformed() {
        let mut parser = ResponseParser::new();
        let result = feed_all(&mut parser, b"HTTP/1.1\r\n");
        assert!(matches!(result, Err(ParseError::Malformed)));
    }
}
