use flate2::read::GzDecoder;
use slimefinder_common::{Result, SlimeError};
use std::io::{self, Read};

pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Upper bound on inflated output. `level.dat` files are a few kilobytes.
pub const MAX_INFLATED_LEN: u64 = 64 * 1024 * 1024;

pub fn has_gzip_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Inflates a gzip member after checking its magic bytes.
pub fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    if !has_gzip_magic(bytes) {
        let mut found = [0u8; 2];
        for (slot, byte) in found.iter_mut().zip(bytes) {
            *slot = *byte;
        }
        return Err(SlimeError::MalformedGzipHeader { found });
    }

    let mut inflated = Vec::new();
    GzDecoder::new(bytes)
        .take(MAX_INFLATED_LEN + 1)
        .read_to_end(&mut inflated)
        .map_err(SlimeError::InflateFailed)?;

    if inflated.len() as u64 > MAX_INFLATED_LEN {
        return Err(SlimeError::InflateFailed(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Inflated data exceeds {} bytes", MAX_INFLATED_LEN),
        )));
    }
    Ok(inflated)
}
