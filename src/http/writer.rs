use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, Error)]
pub enum SendError {
    /// The field list is not `method, path, version` plus name/value pairs.
    #[error("request field list has invalid length {0}")]
    InvalidFieldCount(usize),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

fn serialize_request(fields: &[String]) -> Vec<u8> {
    let mut buf = Vec::new();

    // Request line
    buf.extend_from_slice(fields[0].as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(fields[1].as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(fields[2].as_bytes());
    buf.extend_from_slice(b"\r\n");

    // Headers
    for pair in fields[3..].chunks_exact(2) {
        buf.extend_from_slice(pair[0].as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(pair[1].as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Serializes a request field list and writes it to `writer`.
///
/// The wire layout is the request line, one `Name: value` line per header
/// pair, and a terminating blank line, all CRLF-separated. The request is
/// composed in full before any byte goes out, so an invalid field list
/// sends nothing.
pub async fn send_request<W>(writer: &mut W, fields: &[String]) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
{
    if fields.len() < 3 || (fields.len() - 3) % 2 != 0 {
        return Err(SendError::InvalidFieldCount(fields.len()));
    }

    let buf = serialize_request(fields);
    writer.write_all(&buf).await?;
    writer.flush().await?;

    Ok(())
}
