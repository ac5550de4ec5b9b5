//! Target description: URL parsing and one-time name resolution.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use rustls::ClientConfig;
use thiserror::Error;
use tokio::net::lookup_host;
use url::Url;

use crate::net::tls;

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("invalid URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

/// Target scheme. Decides the default port and whether connections get
/// wrapped in TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// A parsed fuzzing URL, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: Scheme,
    /// Bare hostname or IP literal, brackets stripped, for resolution and
    /// TLS server-name checks.
    pub host: String,
    pub port: u16,
    /// Authority as it goes into the Host header: the host, plus `:port`
    /// when the URL spelled a port out.
    pub name: String,
    /// Path template carrying the placeholder, query and fragment included.
    pub path: String,
}

/// Parses the target URL.
///
/// Input without a `://` separator is treated as plain HTTP, so
/// `example.com/FUZZ` works like `http://example.com/FUZZ`. Schemes other
/// than `http` and `https` are rejected.
pub fn parse_url(raw: &str) -> Result<ParsedUrl, UrlError> {
    let url = if raw.contains("://") {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("http://{raw}"))?
    };

    let scheme = match url.scheme() {
        "http" => Scheme::Http,
        "https" => Scheme::Https,
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    };

    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    let port = url.port().unwrap_or_else(|| scheme.default_port());

    // Keep IPv6 brackets in the Host header but not in the bare host.
    let name = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let mut path = url.path().to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        path.push('#');
        path.push_str(fragment);
    }

    Ok(ParsedUrl {
        scheme,
        host: host.trim_matches(['[', ']']).to_string(),
        port,
        name,
        path,
    })
}

/// The resolved target every worker fuzzes.
///
/// Built once before any worker spawns and never mutated afterwards;
/// workers share it behind an `Arc`. Reconnecting workers reuse the same
/// resolved address rather than hitting the resolver again.
#[derive(Debug)]
pub struct Target {
    pub scheme: Scheme,
    /// First address the resolver returned for the host.
    pub addr: SocketAddr,
    /// Host header value.
    pub name: String,
    /// Server name for SNI and certificate checks.
    pub host: String,
    /// Whether TLS verification is disabled.
    pub insecure: bool,
    /// Prepared client config; `Some` exactly when `scheme` is HTTPS.
    tls: Option<Arc<ClientConfig>>,
}

impl Target {
    /// Resolves a parsed URL into a connectable target.
    ///
    /// For HTTPS targets the rustls client config is built here, once, and
    /// shared by every connection.
    pub async fn resolve(url: &ParsedUrl, insecure: bool) -> Result<Self> {
        let addr = lookup_host((url.host.as_str(), url.port))
            .await
            .with_context(|| format!("failed to resolve {}:{}", url.host, url.port))?
            .next()
            .with_context(|| format!("{}:{} resolved to no addresses", url.host, url.port))?;

        let tls = match url.scheme {
            Scheme::Http => None,
            Scheme::Https => Some(tls::client_config(insecure)?),
        };

        Ok(Self {
            scheme: url.scheme,
            addr,
            name: url.name.clone(),
            host: url.host.clone(),
            insecure,
            tls,
        })
    }

    pub(crate) fn tls_config(&self) -> Option<&Arc<ClientConfig>> {
        self.tls.as_ref()
    }
}
