use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Result<T> = std::result::Result<T, crate::error::SlimeError>;

/// A 16x16 column of the world, addressed in chunk units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoordinate {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoordinate {
    pub fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk containing the given world block coordinates.
    pub fn containing_block(x: i32, z: i32) -> Self {
        Self {
            cx: crate::coords::block_to_chunk(x),
            cz: crate::coords::block_to_chunk(z),
        }
    }

    /// World coordinates of the chunk's north-west corner block.
    pub fn min_block(&self) -> (i64, i64) {
        (i64::from(self.cx) * 16, i64::from(self.cz) * 16)
    }
}

impl fmt::Display for ChunkCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.cx, self.cz)
    }
}

/// Which edition's marking rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    /// Seed-dependent, 48-bit LCG based.
    Java,
    /// Seed-independent, MT19937 based.
    Bedrock,
}

impl fmt::Display for PlatformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformVariant::Java => write!(f, "java"),
            PlatformVariant::Bedrock => write!(f, "bedrock"),
        }
    }
}

impl FromStr for PlatformVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(PlatformVariant::Java),
            "bedrock" => Ok(PlatformVariant::Bedrock),
            other => Err(format!("Unknown edition: {}", other)),
        }
    }
}
