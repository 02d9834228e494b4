use slimefinder_common::{Result, SlimeError};

const MULTIPLIER: u64 = 0x5DEECE66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential generator matching `java.util.Random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaRandom {
    state: u64,
}

impl JavaRandom {
    pub fn new(seed: i64) -> Self {
        Self {
            state: scramble(seed),
        }
    }

    /// Advances the state and returns its top `bits` bits.
    ///
    /// For `bits == 32` the result is reinterpreted as signed, like Java's `next(32)`.
    pub fn next_bits(&mut self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as u32 as i32
    }

    pub fn next_int(&mut self) -> i32 {
        self.next_bits(32)
    }

    /// Uniform draw from `[0, bound)`, Java's `nextInt(int bound)`.
    pub fn next_bounded_int(&mut self, bound: i32) -> Result<i32> {
        if bound <= 0 {
            return Err(SlimeError::InvalidBound(bound));
        }

        if bound & bound.wrapping_neg() == bound {
            let bits = i64::from(self.next_bits(31));
            return Ok(((i64::from(bound) * bits) >> 31) as i32);
        }

        loop {
            let bits = self.next_bits(31);
            let val = bits % bound;
            // Reject the partial bucket at the top of the 31-bit range.
            if i64::from(bits) - i64::from(val) + i64::from(bound - 1) <= i64::from(i32::MAX) {
                return Ok(val);
            }
        }
    }
}

fn scramble(seed: i64) -> u64 {
    (seed as u64 ^ MULTIPLIER) & MASK
}
