//! Command-line interface.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread::available_parallelism;

use clap::Parser;

/// Concurrent HTTP path fuzzer.
///
/// Substitutes each wordlist entry into the FUZZ placeholder of the target
/// URL and reports the response status for every generated path.
#[derive(Debug, Clone, Parser)]
#[command(name = "prowl", version, about)]
pub struct Cli {
    /// Number of parallel workers (defaults to the logical CPU count)
    #[arg(short = 't', long = "threads", value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Wordlist file, one replacement per line
    #[arg(short = 'w', long = "wordlist", value_name = "FILE")]
    pub wordlist: PathBuf,

    /// Target URL containing the FUZZ placeholder
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: String,

    /// Skip TLS certificate, hostname and validity verification
    #[arg(short = 'i', long = "insecure")]
    pub insecure: bool,
}

/// Default worker count: one per logical CPU, at least one.
pub fn default_threads() -> usize {
    available_parallelism().map_or(1, NonZeroUsize::get)
}
