use clap::Parser;
use serde::Serialize;
use slimefinder::config::Args;
use slimefinder::render::render_ascii;
use slimefinder::{
    check_admissibility, decode_level_file, ChunkCoordinate, GridQuery, GridService, LevelMetadata,
    Publication, Result,
};
use slimefinder_logger::{init, log, LogSeverity, LogSeverity::*};
use std::process::ExitCode;

#[derive(Serialize)]
struct Report<'a> {
    query: &'a GridQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'a LevelMetadata>,
    center: ChunkCoordinate,
    marked_count: usize,
    marked: Vec<ChunkCoordinate>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    // Info lines would interleave with the JSON document on stdout.
    init(if args.json { args.log.max(LogSeverity::Warning) } else { args.log });

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log(err.to_string(), Error);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut query = args.query();
    let mut level = None;

    if let Some(path) = &args.level {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_len = tokio::fs::metadata(path).await?.len();
        check_admissibility(&file_name, file_len)?;

        let metadata = decode_level_file(&tokio::fs::read(path).await?)?;
        log(
            format!(
                "Loaded {} (seed {})",
                metadata.level_name.as_deref().unwrap_or(&file_name),
                metadata.seed
            ),
            Info,
        );
        query.seed = metadata.seed;
        if let Some((x, z)) = metadata.spawn() {
            query.center_x = x;
            query.center_z = z;
        }
        level = Some(metadata);
    }

    log(
        format!(
            "Searching {} edition, seed {}, radius {} around ({}, {})",
            query.variant, query.seed, query.radius, query.center_x, query.center_z
        ),
        Info,
    );

    let service = GridService::new();
    let snapshot = match service.submit(query).await? {
        Publication::Published(snapshot) => snapshot,
        Publication::Superseded(generation) => {
            log(format!("Grid generation {} was superseded", generation), Warning);
            return Ok(());
        }
    };
    let grid = &snapshot.grid;

    if args.json {
        let report = Report {
            query: &snapshot.query,
            level: level.as_ref(),
            center: grid.center(),
            marked_count: grid.marked_count(),
            marked: grid.marked().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?);
    } else {
        print!("{}", render_ascii(grid));
        log(
            format!("Found {} slime chunks in {} chunks", grid.marked_count(), grid.len()),
            Info,
        );
    }

    Ok(())
}
