use serde::{Deserialize, Serialize};
use std::fmt;

/// A world seed. Arithmetic on it is always two's-complement 64-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub i64);

impl Seed {
    /// Turns user-entered seed text into a seed, the way the game does.
    ///
    /// Decimal text (optionally negative) is parsed with wraparound past 64 bits.
    /// Anything else goes through the 32-bit `String.hashCode` fold over UTF-16
    /// code units, sign-extended to 64 bits. Never fails.
    pub fn normalize(text: &str) -> Seed {
        match parse_wrapping_decimal(text) {
            Some(value) => Seed(value),
            None => Seed(i64::from(string_hash(text))),
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_wrapping_decimal(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.wrapping_mul(10).wrapping_add(i64::from(b - b'0'))
    });
    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

/// `hash = hash * 31 + c` over UTF-16 code units, truncated to 32 bits.
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
