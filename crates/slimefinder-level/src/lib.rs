//! Reads world metadata out of a Minecraft `level.dat` save file.

pub mod admission;
pub mod extract;
pub mod metadata;

pub use admission::{check_admissibility, MAX_LEVEL_FILE_LEN, MIN_LEVEL_FILE_LEN};
pub use extract::{extract_metadata, extract_seed, SEED_PATHS};
pub use metadata::LevelMetadata;

use slimefinder_common::Result;
use slimefinder_nbt::NbtFile;

/// Inflates, decodes and reads a gzip-compressed `level.dat`.
///
/// Fails without a partial result if any step fails.
pub fn decode_level_file(bytes: &[u8]) -> Result<LevelMetadata> {
    let file = NbtFile::from_gzip(bytes)?;
    extract_metadata(&file.root)
}
