use clap::Parser;
use slimefinder_chunks::GridQuery;
use slimefinder_common::{PlatformVariant, Seed};
use slimefinder_logger::{LogSeverity, LOG_ENV};
use std::path::PathBuf;

pub const DEFAULT_SEED: &str = "3334823393436897159";
pub const DEFAULT_RADIUS: u32 = 25;

#[derive(Parser, Debug, Clone)]
#[command(name = "slimefinder", version, about = "Find slime chunks around a world position")]
pub struct Args {
    /// World seed: a decimal number, or any text (hashed the way the game does)
    #[arg(default_value = DEFAULT_SEED, allow_negative_numbers = true)]
    pub seed: String,

    /// Which edition's slime chunk rules to use (java or bedrock)
    #[arg(short, long, default_value_t = PlatformVariant::Java)]
    pub edition: PlatformVariant,

    /// Center block X
    #[arg(short = 'x', default_value_t = 0, allow_negative_numbers = true)]
    pub x: i32,

    /// Center block Z
    #[arg(short = 'z', default_value_t = 0, allow_negative_numbers = true)]
    pub z: i32,

    /// Chunks to search in each direction from the center chunk
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    pub radius: u32,

    /// level.dat to take the seed and spawn point from
    #[arg(short, long)]
    pub level: Option<PathBuf>,

    /// Print JSON instead of a map
    #[arg(long)]
    pub json: bool,

    /// Minimum log severity (debug, info, warning, error, fatal)
    #[arg(long = "log", env = LOG_ENV, default_value_t = LogSeverity::Info)]
    pub log: LogSeverity,
}

impl Args {
    pub fn query(&self) -> GridQuery {
        GridQuery {
            seed: Seed::normalize(&self.seed),
            variant: self.edition,
            center_x: self.x,
            center_z: self.z,
            radius: self.radius,
        }
    }
}
