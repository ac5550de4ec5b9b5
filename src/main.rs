use anyhow::{Context, Result, ensure};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use prowl::cli::{self, Cli};
use prowl::target::{self, Target};
use prowl::wordlist::{self, PLACEHOLDER};
use prowl::fuzz;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Status lines go to stdout; everything else goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let threads = cli.threads.unwrap_or_else(cli::default_threads);
    ensure!(threads >= 1, "thread count must be at least 1");

    let parsed = target::parse_url(&cli.url).context("invalid target URL")?;
    ensure!(
        parsed.path.contains(PLACEHOLDER),
        "URL must include '{}'",
        PLACEHOLDER
    );

    let paths = wordlist::generate(&parsed.path, &cli.wordlist)
        .await
        .with_context(|| format!("failed to build paths from {}", cli.wordlist.display()))?;

    let target = Target::resolve(&parsed, cli.insecure).await?;
    if target.insecure {
        warn!("TLS certificate verification is disabled");
    }
    info!(
        "target {} resolved to {}, {} paths queued",
        target.name,
        target.addr,
        paths.len()
    );

    fuzz::run(target, paths, threads).await
}
