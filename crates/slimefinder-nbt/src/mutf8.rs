//! Java's "modified UTF-8", the string encoding NBT uses.
//!
//! NUL is written as `C0 80` and characters outside the BMP as a pair of
//! three-byte surrogates. Plain UTF-8 is accepted on input as well.

const REPLACEMENT: u16 = 0xFFFD;

pub fn decode(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_owned();
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        let continuation = |n: usize| bytes.get(i + n).filter(|&&b| b & 0xC0 == 0x80).map(|&b| u32::from(b & 0x3F));

        if lead < 0x80 {
            units.push(u16::from(lead));
            i += 1;
        } else if lead & 0xE0 == 0xC0 {
            match continuation(1) {
                Some(b1) => {
                    units.push(((u32::from(lead & 0x1F) << 6) | b1) as u16);
                    i += 2;
                }
                None => {
                    units.push(REPLACEMENT);
                    i += 1;
                }
            }
        } else if lead & 0xF0 == 0xE0 {
            match (continuation(1), continuation(2)) {
                (Some(b1), Some(b2)) => {
                    units.push(((u32::from(lead & 0x0F) << 12) | (b1 << 6) | b2) as u16);
                    i += 3;
                }
                _ => {
                    units.push(REPLACEMENT);
                    i += 1;
                }
            }
        } else if lead & 0xF8 == 0xF0 {
            match (continuation(1), continuation(2), continuation(3)) {
                (Some(b1), Some(b2), Some(b3)) => {
                    let code = (u32::from(lead & 0x07) << 18) | (b1 << 12) | (b2 << 6) | b3;
                    match char::from_u32(code) {
                        Some(c) => {
                            let mut pair = [0u16; 2];
                            units.extend_from_slice(c.encode_utf16(&mut pair));
                        }
                        None => units.push(REPLACEMENT),
                    }
                    i += 4;
                }
                _ => {
                    units.push(REPLACEMENT);
                    i += 1;
                }
            }
        } else {
            units.push(REPLACEMENT);
            i += 1;
        }
    }

    // Pairs surrogates; lone ones become U+FFFD.
    String::from_utf16_lossy(&units)
}

pub fn encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007F => bytes.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                bytes.push(0xC0 | (unit >> 6) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                bytes.push(0xE0 | (unit >> 12) as u8);
                bytes.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    bytes
}
