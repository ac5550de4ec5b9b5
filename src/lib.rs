//! prowl - Concurrent HTTP Path Fuzzer
//!
//! Core library for wordlist expansion, HTTP wire handling and the
//! worker-pool fuzzing engine.

pub mod cli;
pub mod fuzz;
pub mod http;
pub mod net;
pub mod target;
pub mod wordlist;
