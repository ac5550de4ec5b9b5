use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::BytesMut;
use rustls::pki_types::ServerName;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tracing::debug;

use crate::target::Target;

/// Upper bound on a single body-discard read.
const DISCARD_CHUNK: u64 = 4096;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        source: io::Error,
    },
    #[error("invalid TLS server name '{0}'")]
    ServerName(String),
    #[error("TLS handshake with {host} failed: {source}")]
    Handshake {
        host: String,
        source: io::Error,
    },
}

/// One client connection to the target: a TCP stream, TLS-wrapped when the
/// target was given as HTTPS.
///
/// Reads and writes pass straight through to the underlying stream, so the
/// request writer and response parser work on either variant unchanged.
pub enum Connection {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Connection {
    /// Opens a connection to the target's resolved address, performing the
    /// TLS handshake when the target requires it.
    ///
    /// A handshake failure drops the already-connected socket; nothing is
    /// leaked on any error path.
    pub async fn open(target: &Target) -> Result<Self, ConnectError> {
        let stream = TcpStream::connect(target.addr)
            .await
            .map_err(|source| ConnectError::Connect {
                addr: target.addr,
                source,
            })?;

        match target.tls_config() {
            None => Ok(Connection::Plain(stream)),
            Some(config) => {
                let server_name = ServerName::try_from(target.host.as_str())
                    .map_err(|_| ConnectError::ServerName(target.host.clone()))?
                    .to_owned();
                let connector = TlsConnector::from(config.clone());
                let tls = connector
                    .connect(server_name, stream)
                    .await
                    .map_err(|source| ConnectError::Handshake {
                        host: target.host.clone(),
                        source,
                    })?;
                Ok(Connection::Tls(Box::new(tls)))
            }
        }
    }

    /// Reads the next byte from the stream.
    pub async fn read_byte(&mut self) -> io::Result<u8> {
        self.read_u8().await
    }

    /// Reads and drops exactly `n` bytes.
    ///
    /// Used to skip a response body so the stream is left positioned at the
    /// next response head. The stream ending early is an error: a partial
    /// skip would desynchronize every later exchange on this connection.
    pub async fn discard(&mut self, n: u64) -> io::Result<()> {
        let mut buf = BytesMut::new();
        let mut remaining = n;
        while remaining > 0 {
            let chunk = remaining.min(DISCARD_CHUNK) as usize;
            buf.resize(chunk, 0);
            self.read_exact(&mut buf[..chunk]).await?;
            remaining -= chunk as u64;
        }
        Ok(())
    }

    /// Closes the connection, sending the TLS close notify where one is due
    /// and shutting the socket down. Consuming `self` makes a double close
    /// unrepresentable.
    pub async fn close(mut self) {
        if let Err(err) = self.shutdown().await {
            debug!("connection shutdown failed: {}", err);
        }
    }
}

impl AsyncRead for Connection {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Plain(stream) => Pin::new(stream).poll_read(cx, buf),
            Connection::Tls(stream) => Pin::new(stream).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for Connection {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Connection::Plain(stream) => Pin::new(stream).poll_write(cx, buf),
            Connection::Tls(stream) => Pin::new(stream).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Plain(stream) => Pin::new(stream).poll_flush(cx),
            Connection::Tls(stream) => Pin::new(stream).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Connection::Plain(stream) => Pin::new(stream).poll_shutdown(cx),
            Connection::Tls(stream) => Pin::new(stream).poll_shutdown(cx),
        }
    }
}
