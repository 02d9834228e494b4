pub mod coords;
pub mod error;
pub mod seed;
pub mod types;

pub use error::SlimeError;
pub use seed::Seed;
pub use types::{ChunkCoordinate, PlatformVariant, Result};
