pub mod classifier;
pub mod grid;

pub use classifier::{classify, for_variant, BedrockClassifier, ChunkClassifier, JavaClassifier};
pub use grid::{ClassificationGrid, GridCell, GridEvaluator, GridQuery};
