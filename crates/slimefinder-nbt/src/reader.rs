use crate::mutf8;
use byteorder::{BigEndian, ByteOrder};
use slimefinder_common::{Result, SlimeError};

/// Joins two 32-bit words into one 64-bit value, high word first.
///
/// NBT longs are stored this way, and some tools hand a long out as a
/// two-element `[high, low]` pair; both go through here.
#[inline]
pub fn combine_halves(high: i32, low: i32) -> i64 {
    (i64::from(high) << 32) | i64::from(low as u32)
}

/// Big-endian cursor over a fully decompressed NBT buffer.
///
/// Every read is bounds-checked up front: it either consumes exactly the bytes
/// it needs or fails with `TruncatedBuffer` and leaves the cursor untouched.
#[derive(Debug, Clone)]
pub struct NbtReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> NbtReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        if needed > self.remaining() {
            return Err(SlimeError::TruncatedBuffer {
                needed,
                remaining: self.remaining(),
                offset: self.cursor,
            });
        }
        let bytes = &self.buffer[self.cursor..self.cursor + needed];
        self.cursor += needed;
        Ok(bytes)
    }

    fn take_elements(&mut self, length: usize, width: usize) -> Result<&'a [u8]> {
        self.take(length.checked_mul(width).unwrap_or(usize::MAX))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let words = self.take(8)?;
        Ok(combine_halves(
            BigEndian::read_i32(&words[..4]),
            BigEndian::read_i32(&words[4..]),
        ))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// `u16` byte length, then that many bytes of modified UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.cursor;
        let length = self.read_u16()? as usize;
        match self.take(length) {
            Ok(bytes) => Ok(mutf8::decode(bytes)),
            Err(err) => {
                self.cursor = start;
                Err(err)
            }
        }
    }

    /// Signed `i32` element count as used by arrays and lists.
    pub fn read_length(&mut self) -> Result<usize> {
        let length = self.read_i32()?;
        usize::try_from(length).map_err(|_| SlimeError::NegativeLength(length))
    }

    pub fn read_i8_array(&mut self, length: usize) -> Result<Vec<i8>> {
        let bytes = self.take(length)?;
        Ok(bytes.iter().map(|&b| b as i8).collect())
    }

    pub fn read_i32_array(&mut self, length: usize) -> Result<Vec<i32>> {
        let bytes = self.take_elements(length, 4)?;
        Ok(bytes.chunks_exact(4).map(BigEndian::read_i32).collect())
    }

    pub fn read_i64_array(&mut self, length: usize) -> Result<Vec<i64>> {
        let bytes = self.take_elements(length, 8)?;
        Ok(bytes
            .chunks_exact(8)
            .map(|word| combine_halves(BigEndian::read_i32(&word[..4]), BigEndian::read_i32(&word[4..])))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_combine_halves() {
        assert_eq!(combine_halves(0, 1), 1);
        assert_eq!(combine_halves(0, -1), 0xFFFF_FFFF);
        assert_eq!(combine_halves(-1, -1), -1);
        assert_eq!(combine_halves(1, 0), 1 << 32);
        assert_eq!(
            combine_halves(776449077, 712511367),
            3334823393436897159
        );
        assert_eq!(combine_halves(i32::MIN, 0), i64::MIN);
        assert_eq!(combine_halves(-2, i32::MIN), -0x1_8000_0000);
    }

    #[test]
    fn test_big_endian_reads() {
        let bytes = [
            0xFF, // i8
            0x12, 0x34, // i16
            0x80, 0x00, 0x00, 0x01, // i32
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, // i64
            0x3F, 0x80, 0x00, 0x00, // f32
            0x40, 0x09, 0x21, 0xFB, 0x54, 0x44, 0x2D, 0x18, // f64
        ];
        let mut reader = NbtReader::new(&bytes);
        assert_eq!(reader.read_i8().unwrap(), -1);
        assert_eq!(reader.read_i16().unwrap(), 0x1234);
        assert_eq!(reader.read_i32().unwrap(), i32::MIN + 1);
        assert_eq!(reader.read_i64().unwrap(), (1 << 32) + 2);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert_eq!(reader.read_f64().unwrap(), std::f64::consts::PI);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_truncated_read_leaves_cursor() {
        let bytes = [0x00, 0x01, 0x02];
        let mut reader = NbtReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 0);
        assert_matches!(
            reader.read_i32(),
            Err(SlimeError::TruncatedBuffer {
                needed: 4,
                remaining: 2,
                offset: 1
            })
        );
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read_i16().unwrap(), 0x0102);
    }

    #[test]
    fn test_read_string() {
        let bytes = [0x00, 0x05, b'h', b'e', b'l', b'l', b'o'];
        let mut reader = NbtReader::new(&bytes);
        assert_eq!(reader.read_string().unwrap(), "hello");
    }

    #[test]
    fn test_read_string_truncated() {
        let bytes = [0x00, 0x05, b'h', b'e'];
        let mut reader = NbtReader::new(&bytes);
        assert_matches!(reader.read_string(), Err(SlimeError::TruncatedBuffer { .. }));
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_negative_length() {
        let bytes = (-3i32).to_be_bytes();
        let mut reader = NbtReader::new(&bytes);
        assert_matches!(reader.read_length(), Err(SlimeError::NegativeLength(-3)));
    }

    #[test]
    fn test_array_reads_are_bounds_checked() {
        let bytes = [0, 0, 0, 7, 0, 0, 0];
        let mut reader = NbtReader::new(&bytes);
        assert_eq!(reader.read_i32_array(1).unwrap(), vec![7]);
        assert_matches!(reader.read_i64_array(1), Err(SlimeError::TruncatedBuffer { .. }));
        assert_matches!(
            reader.read_i32_array(usize::MAX / 2),
            Err(SlimeError::TruncatedBuffer { .. })
        );
        assert_eq!(reader.read_i8_array(3).unwrap(), vec![0, 0, 0]);
    }
}
