//! HTTP protocol implementation.
//!
//! This module implements the client half of an HTTP/1.1 exchange: fuzzed
//! GET requests go out, response heads come back, with keep-alive reuse
//! between them.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`request`**: HTTP request representation as a flat field list
//! - **`writer`**: Serializes and writes HTTP requests to the server
//! - **`parser`**: Parses HTTP response heads one byte at a time
//! - **`response`**: Parsed HTTP response representation
//!
//! # Response Parser State Machine
//!
//! The parser walks the status line and header block with one state per
//! field:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Version   │ ← Accumulate until ' '
//!        └──────┬──────┘
//!               │ space
//!               ▼
//!        ┌─────────────┐
//!        │   Status    │ ← Accumulate until ' '
//!        └──────┬──────┘
//!               │ space
//!               ▼
//!        ┌─────────────┐
//!        │   Reason    │ ← Accumulate until CRLF
//!        └──────┬──────┘
//!               │ CRLF
//!               ▼
//!        ┌─────────────┐      ':'       ┌──────────────┐
//!        │ HeaderName  │ ─────────────► │ HeaderValue  │
//!        └──────┬──────┘                └──────┬───────┘
//!               │                              │
//!               │ CRLF on empty line     CRLF  │
//!               ▼                              │
//!        ┌─────────────┐                       │
//!        │    Done     │      HeaderName ◄─────┘
//!        └─────────────┘
//! ```
//!
//! Only CRLF terminates a line; a bare `\n` is ordinary field data. The
//! parser stops at the blank line and never reads a response body, so
//! callers that reuse the connection skip bodies with
//! `Connection::discard`.

pub mod request;
pub mod response;
pub mod parser;
pub mod writer;
