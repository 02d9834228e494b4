use slimefinder_common::{ChunkCoordinate, PlatformVariant, Result, Seed};
use slimefinder_rng::{JavaRandom, Mt19937};

/// Salt XORed into every Java chunk seed.
const JAVA_SALT: i64 = 0x3AD8025F;
/// One chunk in ten is marked on both editions.
const MARK_ODDS: i32 = 10;

/// Decides whether a single chunk is marked.
///
/// Implementations hold no generator state; every call builds a fresh
/// generator for its chunk, so one classifier can be shared across threads.
pub trait ChunkClassifier: Send + Sync {
    fn variant(&self) -> PlatformVariant;

    fn is_marked(&self, chunk: ChunkCoordinate) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaClassifier {
    seed: Seed,
}

impl JavaClassifier {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }
}

impl ChunkClassifier for JavaClassifier {
    fn variant(&self) -> PlatformVariant {
        PlatformVariant::Java
    }

    fn is_marked(&self, chunk: ChunkCoordinate) -> Result<bool> {
        let mut random = JavaRandom::new(java_chunk_seed(self.seed, chunk));
        Ok(random.next_bounded_int(MARK_ODDS)? == 0)
    }
}

/// The Bedrock layout is the same in every world, so no seed is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BedrockClassifier;

impl ChunkClassifier for BedrockClassifier {
    fn variant(&self) -> PlatformVariant {
        PlatformVariant::Bedrock
    }

    fn is_marked(&self, chunk: ChunkCoordinate) -> Result<bool> {
        let mut mt = Mt19937::new(bedrock_chunk_hash(chunk));
        Ok(mt.next_u32() % MARK_ODDS as u32 == 0)
    }
}

/// Per-chunk seed for the Java rule. All products are taken at 64 bits.
pub fn java_chunk_seed(seed: Seed, chunk: ChunkCoordinate) -> i64 {
    let x = i64::from(chunk.cx);
    let z = i64::from(chunk.cz);

    let mixed = seed
        .value()
        .wrapping_add(x.wrapping_mul(x).wrapping_mul(0x4C1906))
        .wrapping_add(x.wrapping_mul(0x5AC0DB))
        .wrapping_add(z.wrapping_mul(z).wrapping_mul(0x4307A7))
        .wrapping_add(z.wrapping_mul(0x5F24F));
    mixed ^ JAVA_SALT
}

pub fn bedrock_chunk_hash(chunk: ChunkCoordinate) -> u32 {
    (chunk.cx as u32).wrapping_mul(0x1F1F_1F1F) ^ chunk.cz as u32
}

/// Classifier for `variant`. The seed is ignored for Bedrock.
pub fn for_variant(variant: PlatformVariant, seed: Seed) -> Box<dyn ChunkClassifier> {
    match variant {
        PlatformVariant::Java => Box::new(JavaClassifier::new(seed)),
        PlatformVariant::Bedrock => Box::new(BedrockClassifier),
    }
}

pub fn classify(seed: Seed, variant: PlatformVariant, chunk: ChunkCoordinate) -> Result<bool> {
    match variant {
        PlatformVariant::Java => JavaClassifier::new(seed).is_marked(chunk),
        PlatformVariant::Bedrock => BedrockClassifier.is_marked(chunk),
    }
}
