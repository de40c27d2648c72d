//! Buffered full reads from sockets and other byte sources.
//!
//! Status endpoints of monitored services answer a request and close the
//! connection; these helpers keep reading fixed-size chunks until a read
//! returns no more bytes. Read failures are returned exactly as the source
//! produced them.

use crate::config::UtilConfig;
use std::io::{self, Read};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

/// Chunk size used by [`read_all`] and friends.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Read everything from `source` in chunks of `chunk_size` bytes.
///
/// # Errors
///
/// Propagates the first error returned by `source`. A zero `chunk_size`
/// fails with [`io::ErrorKind::InvalidInput`] before anything is read.
pub fn read_all_chunked<R: Read + ?Sized>(source: &mut R, chunk_size: usize) -> io::Result<Vec<u8>> {
    if chunk_size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "chunk_size must be greater than 0",
        ));
    }

    let mut response = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    loop {
        let n = source.read(&mut chunk)?;
        trace!("Read chunk of {} bytes ({} total)", n, response.len() + n);
        if n == 0 {
            break;
        }
        response.extend_from_slice(&chunk[..n]);
    }
    Ok(response)
}

/// Read everything from `source` as raw bytes.
pub fn read_all_bytes<R: Read + ?Sized>(source: &mut R) -> io::Result<Vec<u8>> {
    read_all_chunked(source, DEFAULT_CHUNK_SIZE)
}

/// Read everything from `source` as UTF-8 text.
///
/// # Errors
///
/// Propagates read errors; returns [`io::ErrorKind::InvalidData`] when the
/// content is not valid UTF-8.
pub fn read_all<R: Read + ?Sized>(source: &mut R) -> io::Result<String> {
    into_text(read_all_bytes(source)?)
}

/// Read everything from `source` using the chunk size from `config`.
pub fn read_all_with<R: Read + ?Sized>(source: &mut R, config: &UtilConfig) -> io::Result<String> {
    into_text(read_all_chunked(source, config.read_chunk_size)?)
}

/// Async counterpart of [`read_all_bytes`].
pub async fn read_all_bytes_async<R: AsyncRead + Unpin>(source: &mut R) -> io::Result<Vec<u8>> {
    let mut response = Vec::new();
    let mut chunk = vec![0u8; DEFAULT_CHUNK_SIZE];
    loop {
        let n = source.read(&mut chunk).await?;
        trace!("Read chunk of {} bytes ({} total)", n, response.len() + n);
        if n == 0 {
            break;
        }
        response.extend_from_slice(&chunk[..n]);
    }
    Ok(response)
}

/// Async counterpart of [`read_all`].
pub async fn read_all_async<R: AsyncRead + Unpin>(source: &mut R) -> io::Result<String> {
    into_text(read_all_bytes_async(source).await?)
}

fn into_text(bytes: Vec<u8>) -> io::Result<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
