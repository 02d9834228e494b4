use crate::metadata::LevelMetadata;
use slimefinder_common::{Result, Seed, SlimeError};
use slimefinder_nbt::{combine_halves, Compound, Tag};

/// Places a seed can live under `Data`, newest layout first.
pub const SEED_PATHS: [&str; 3] = ["WorldGenSettings.seed", "RandomSeed", "generatorOptions"];

/// Reads the seed and the optional world fields from a decoded root compound.
pub fn extract_metadata(root: &Compound) -> Result<LevelMetadata> {
    let data = root
        .get("Data")
        .and_then(Tag::as_compound)
        .ok_or(SlimeError::MissingRequiredField("Data"))?;

    let mut metadata = LevelMetadata::new(extract_seed(data)?);
    metadata.level_name = data.get("LevelName").and_then(Tag::as_string).map(str::to_owned);
    metadata.game_type = int_field(data, "GameType");
    metadata.difficulty = int_field(data, "Difficulty");
    metadata.spawn_x = int_field(data, "SpawnX");
    metadata.spawn_y = int_field(data, "SpawnY");
    metadata.spawn_z = int_field(data, "SpawnZ");
    metadata.version_name = ["Version.Name", "Version.name"]
        .into_iter()
        .find_map(|path| data.get_path(path).and_then(Tag::as_string))
        .map(str::to_owned);

    Ok(metadata)
}

/// Tries each of [`SEED_PATHS`] under `data` in order; the first seed-bearing
/// field wins, even when its value is zero.
pub fn extract_seed(data: &Compound) -> Result<Seed> {
    for path in SEED_PATHS {
        if let Some(seed) = data.get_path(path).and_then(seed_from_tag) {
            return Ok(seed);
        }
    }

    Err(SlimeError::SeedNotFound {
        tried: SEED_PATHS.to_vec(),
    })
}

fn seed_from_tag(tag: &Tag) -> Option<Seed> {
    if let Some(value) = tag.as_integer() {
        return Some(Seed(value));
    }

    match tag {
        Tag::IntArray(words) => seed_from_words(words.iter().map(|&w| i64::from(w))),
        Tag::LongArray(longs) => seed_from_words(longs.iter().copied()),
        Tag::List(_, items) => {
            let words: Option<Vec<i64>> = items.iter().map(Tag::as_integer).collect();
            seed_from_words(words?.into_iter())
        }
        Tag::String(text) => Some(Seed::normalize(text)),
        _ => None,
    }
}

/// A two-word sequence is a `[high, low]` split long; otherwise the first
/// element is taken as the seed.
fn seed_from_words<I: ExactSizeIterator<Item = i64>>(mut words: I) -> Option<Seed> {
    if words.len() == 2 {
        let high = words.next()?;
        let low = words.next()?;
        return Some(Seed(combine_halves(high as i32, low as i32)));
    }
    words.next().map(Seed)
}

fn int_field(data: &Compound, name: &str) -> Option<i32> {
    match data.get(name)? {
        Tag::Byte(n) => Some(i32::from(*n)),
        Tag::Short(n) => Some(i32::from(*n)),
        Tag::Int(n) => Some(*n),
        _ => None,
    }
}
