pub mod config;
pub mod render;
pub mod service;

pub use service::{GridService, GridSnapshot, Publication};
pub use slimefinder_chunks::{classify, ClassificationGrid, GridCell, GridEvaluator, GridQuery};
pub use slimefinder_common::{ChunkCoordinate, PlatformVariant, Result, Seed, SlimeError};
pub use slimefinder_level::{check_admissibility, decode_level_file, LevelMetadata};

/// Classifies every chunk within `radius` chunks of the chunk holding block
/// `(center_x, center_z)`, with the seed given as user text.
pub fn classify_grid(
    seed_text: &str,
    variant: PlatformVariant,
    center_x: i32,
    center_z: i32,
    radius: u32,
) -> Result<ClassificationGrid> {
    GridEvaluator::evaluate(&GridQuery {
        seed: Seed::normalize(seed_text),
        variant,
        center_x,
        center_z,
        radius,
    })
}
