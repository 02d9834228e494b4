use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlimeError {
    #[error("Bound must be positive, got {0}")]
    InvalidBound(i32),

    #[error("Not a gzip stream: expected magic 1f 8b, found {:02x} {:02x}", found[0], found[1])]
    MalformedGzipHeader { found: [u8; 2] },

    #[error("Failed to inflate gzip stream: {0}")]
    InflateFailed(#[source] io::Error),

    #[error("Truncated buffer: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    TruncatedBuffer {
        needed: usize,
        remaining: usize,
        offset: usize,
    },

    #[error("Unknown tag type: {0}")]
    UnknownTagType(u8),

    #[error("List declares element type {declared} but holds type {found}")]
    ListElementTypeMismatch { declared: u8, found: u8 },

    #[error("Negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("Tag nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("Root tag must be a compound, found type {0}")]
    RootNotCompound(u8),

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Seed not found, tried: {}", tried.join(", "))]
    SeedNotFound { tried: Vec<&'static str> },

    #[error("File rejected: {0}")]
    AdmissibilityRejected(String),

    #[error("Chunk window exceeds the 32-bit chunk coordinate space")]
    CoordinateOverflow,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
