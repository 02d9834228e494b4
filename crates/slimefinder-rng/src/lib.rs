//! Bit-exact ports of the two generators the game editions draw chunk
//! randomness from. Both are plain value types: build one per use.

pub mod java;
pub mod mt19937;

pub use java::JavaRandom;
pub use mt19937::Mt19937;
