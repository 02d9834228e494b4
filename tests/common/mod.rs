use flate2::write::GzEncoder;
use flate2::Compression;
use slimefinder_nbt::{tag_id, Compound, NbtFile, Tag};
use std::io::Write;

pub const ANCHOR_SEED: i64 = 3334823393436897159;

pub fn compound<const N: usize>(entries: [(&str, Tag); N]) -> Compound {
    entries.into_iter().collect()
}

pub fn gzip(payload: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();
    encoder.finish().unwrap()
}

/// Wraps `data` as the `Data` child of an unnamed root and gzips it.
pub fn level_dat(data: Compound) -> Vec<u8> {
    let file = NbtFile::new(String::new(), compound([("Data", Tag::Compound(data))]));
    let mut bytes = Vec::new();
    file.write_gzip(&mut bytes).unwrap();
    bytes
}

/// Data compound shaped like a 1.16+ save.
pub fn modern_data(seed: i64) -> Compound {
    let dimensions = compound([(
        "minecraft:overworld",
        Tag::Compound(compound([("type", Tag::String("minecraft:overworld".to_string()))])),
    )]);
    let world_gen = compound([
        ("bonus_chest", Tag::Byte(0)),
        ("seed", Tag::Long(seed)),
        ("generate_features", Tag::Byte(1)),
        ("dimensions", Tag::Compound(dimensions)),
    ]);
    let version = compound([
        ("Id", Tag::Int(3465)),
        ("Name", Tag::String("1.20.1".to_string())),
        ("Snapshot", Tag::Byte(0)),
    ]);
    compound([
        ("DataVersion", Tag::Int(3465)),
        ("LevelName", Tag::String("Swamp Farm".to_string())),
        ("GameType", Tag::Int(0)),
        ("Difficulty", Tag::Byte(2)),
        ("SpawnX", Tag::Int(100)),
        ("SpawnY", Tag::Int(63)),
        ("SpawnZ", Tag::Int(-40)),
        ("WorldGenSettings", Tag::Compound(world_gen)),
        ("Version", Tag::Compound(version)),
        (
            "ServerBrands",
            Tag::List(tag_id::STRING, vec![Tag::String("vanilla".to_string())]),
        ),
    ])
}

/// Data compound shaped like a pre-1.13 save.
pub fn legacy_data(seed: i64) -> Compound {
    compound([
        ("LevelName", Tag::String("Old World".to_string())),
        ("RandomSeed", Tag::Long(seed)),
        ("generatorName", Tag::String("default".to_string())),
        ("generatorOptions", Tag::String(String::new())),
        ("SpawnX", Tag::Int(-8)),
        ("SpawnZ", Tag::Int(8)),
    ])
}
