//! Block, chunk, region and dimension coordinate conversions.

/// Overworld blocks per nether block along x and z.
pub const NETHER_SCALE: f64 = 8.0;

#[inline]
pub fn block_to_chunk(block: i32) -> i32 {
    block >> 4
}

#[inline]
pub fn chunk_to_region(chunk: i32) -> i32 {
    chunk >> 5
}

/// A position in one of the two linked dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DimensionPos {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Overworld position to the matching nether position. Height is unchanged.
    pub fn overworld_to_nether(&self) -> Self {
        Self {
            x: self.x / NETHER_SCALE,
            y: self.y,
            z: self.z / NETHER_SCALE,
        }
    }

    pub fn nether_to_overworld(&self) -> Self {
        Self {
            x: self.x * NETHER_SCALE,
            y: self.y,
            z: self.z * NETHER_SCALE,
        }
    }
}
