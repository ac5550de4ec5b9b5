use anyhow::{Context, Result};
use tracing::debug;

use crate::http::parser::read_response;
use crate::http::request::get_request;
use crate::http::writer::send_request;
use crate::net::connection::Connection;
use crate::target::Target;

/// Runs one worker over its slice of generated paths.
///
/// The connection opens before the first request and is reused across the
/// slice until the server asks for a close, in which case the worker
/// reconnects before its next path. The first failure at any stage closes
/// the connection and abandons the rest of the slice; nothing is retried.
pub(crate) async fn run(index: usize, target: &Target, paths: &[String]) -> Result<()> {
    let mut conn = Connection::open(target).await.context("opening connection")?;
    debug!("worker {} connected, {} paths", index, paths.len());

    let mut reconnect = false;
    for path in paths {
        if reconnect {
            conn.close().await;
            conn = Connection::open(target)
                .await
                .with_context(|| format!("reconnecting before {path}"))?;
            reconnect = false;
        }

        let fields = get_request(path, &target.name);
        if let Err(err) = send_request(&mut conn, &fields).await {
            conn.close().await;
            return Err(err).with_context(|| format!("sending request for {path}"));
        }

        let response = match read_response(&mut conn).await {
            Ok(response) => response,
            Err(err) => {
                conn.close().await;
                return Err(err).with_context(|| format!("reading response for {path}"));
            }
        };

        println!("Path: {} Status: {}", path, response.status);

        if response.wants_close() {
            reconnect = true;
        }

        // Skip the body so the next head starts at the right byte.
        if let Some(length) = response.content_length().filter(|&length| length > 0) {
            if let Err(err) = conn.discard(length).await {
                conn.close().await;
                return Err(err)
                    .with_context(|| format!("discarding {length} body bytes for {path}"));
            }
        }
    }

    conn.close().await;
    debug!("worker {} finished", index);
    Ok(())
}
