//! Gzip compression of published binaries.
//!
//! A gzip stream is only decodable once its trailer has been written, so
//! [`compress`] owns the encoder for its whole lifetime and reads the buffer
//! back only through [`GzEncoder::finish`]. On an early return the encoder is
//! dropped with the buffer it owns; partial output never escapes.

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{self, Read, Write};

/// Compress `bytes` into a complete gzip stream.
///
/// # Errors
///
/// Returns an [`io::Error`] if the encoder fails to write or finalise.
///
/// # Examples
///
/// ```
/// use selfupdate_publisher::artefact::archive::{compress, decompress};
///
/// let packed = compress(b"hello").expect("compress");
/// assert_eq!(decompress(&packed).expect("decompress"), b"hello");
/// ```
pub fn compress(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Decompress a gzip stream produced by [`compress`].
///
/// # Errors
///
/// Returns an [`io::Error`] if `bytes` is not a complete gzip stream.
pub fn decompress(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
