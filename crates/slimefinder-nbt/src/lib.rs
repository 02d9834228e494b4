pub mod compound;
pub mod gzip;
pub mod mutf8;
pub mod reader;

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::GzEncoder;
use flate2::Compression;
use slimefinder_common::{Result, SlimeError};
use std::io::{self, Read, Write};

pub use compound::Compound;
pub use reader::{combine_halves, NbtReader};

/// Compound/list nesting allowed before decoding gives up.
pub const MAX_DEPTH: usize = 512;

pub mod tag_id {
    pub const END: u8 = 0;
    pub const BYTE: u8 = 1;
    pub const SHORT: u8 = 2;
    pub const INT: u8 = 3;
    pub const LONG: u8 = 4;
    pub const FLOAT: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const BYTE_ARRAY: u8 = 7;
    pub const STRING: u8 = 8;
    pub const LIST: u8 = 9;
    pub const COMPOUND: u8 = 10;
    pub const INT_ARRAY: u8 = 11;
    pub const LONG_ARRAY: u8 = 12;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// Declared element type id, then the elements.
    List(u8, Vec<Tag>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn get_type_id(&self) -> u8 {
        match self {
            Tag::End => tag_id::END,
            Tag::Byte(_) => tag_id::BYTE,
            Tag::Short(_) => tag_id::SHORT,
            Tag::Int(_) => tag_id::INT,
            Tag::Long(_) => tag_id::LONG,
            Tag::Float(_) => tag_id::FLOAT,
            Tag::Double(_) => tag_id::DOUBLE,
            Tag::ByteArray(_) => tag_id::BYTE_ARRAY,
            Tag::String(_) => tag_id::STRING,
            Tag::List(..) => tag_id::LIST,
            Tag::Compound(_) => tag_id::COMPOUND,
            Tag::IntArray(_) => tag_id::INT_ARRAY,
            Tag::LongArray(_) => tag_id::LONG_ARRAY,
        }
    }

    /// Builds a list, checking every element against the declared type.
    pub fn list(element_type: u8, items: Vec<Tag>) -> Result<Tag> {
        check_list(element_type, &items)?;
        Ok(Tag::List(element_type, items))
    }

    /// Reads one named tag. A bare End tag yields an empty name.
    pub fn read(reader: &mut NbtReader<'_>) -> Result<(String, Tag)> {
        Self::read_named(reader, 0)
    }

    fn read_named(reader: &mut NbtReader<'_>, depth: usize) -> Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        if type_id == tag_id::END {
            return Ok((String::new(), Tag::End));
        }
        if type_id > tag_id::LONG_ARRAY {
            return Err(SlimeError::UnknownTagType(type_id));
        }

        let name = reader.read_string()?;
        let tag = Tag::read_payload(reader, type_id, depth)?;
        Ok((name, tag))
    }

    fn read_payload(reader: &mut NbtReader<'_>, type_id: u8, depth: usize) -> Result<Tag> {
        match type_id {
            tag_id::END => Ok(Tag::End),
            tag_id::BYTE => Ok(Tag::Byte(reader.read_i8()?)),
            tag_id::SHORT => Ok(Tag::Short(reader.read_i16()?)),
            tag_id::INT => Ok(Tag::Int(reader.read_i32()?)),
            tag_id::LONG => Ok(Tag::Long(reader.read_i64()?)),
            tag_id::FLOAT => Ok(Tag::Float(reader.read_f32()?)),
            tag_id::DOUBLE => Ok(Tag::Double(reader.read_f64()?)),
            tag_id::BYTE_ARRAY => {
                let length = reader.read_length()?;
                Ok(Tag::ByteArray(reader.read_i8_array(length)?))
            }
            tag_id::STRING => Ok(Tag::String(reader.read_string()?)),
            tag_id::LIST => {
                let depth = nested(depth)?;
                let element_type = reader.read_u8()?;
                let length = reader.read_length()?;
                if element_type > tag_id::LONG_ARRAY || (element_type == tag_id::END && length > 0) {
                    return Err(SlimeError::UnknownTagType(element_type));
                }

                // Every element takes at least one byte, so this bounds the allocation.
                let mut list = Vec::with_capacity(length.min(reader.remaining()));
                for _ in 0..length {
                    list.push(Tag::read_payload(reader, element_type, depth)?);
                }
                Ok(Tag::List(element_type, list))
            }
            tag_id::COMPOUND => {
                let depth = nested(depth)?;
                let mut compound = Compound::new();
                loop {
                    let (name, tag) = Tag::read_named(reader, depth)?;
                    if let Tag::End = tag {
                        break;
                    }
                    compound.insert(name, tag);
                }
                Ok(Tag::Compound(compound))
            }
            tag_id::INT_ARRAY => {
                let length = reader.read_length()?;
                Ok(Tag::IntArray(reader.read_i32_array(length)?))
            }
            tag_id::LONG_ARRAY => {
                let length = reader.read_length()?;
                Ok(Tag::LongArray(reader.read_i64_array(length)?))
            }
            _ => Err(SlimeError::UnknownTagType(type_id)),
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W, name: &str) -> Result<()> {
        writer.write_u8(self.get_type_id())?;

        if !matches!(self, Tag::End) {
            write_string(writer, name)?;
        }

        self.write_payload(writer)
    }

    fn write_payload<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Tag::End => {}
            Tag::Byte(v) => writer.write_i8(*v)?,
            Tag::Short(v) => writer.write_i16::<BigEndian>(*v)?,
            Tag::Int(v) => writer.write_i32::<BigEndian>(*v)?,
            Tag::Long(v) => writer.write_i64::<BigEndian>(*v)?,
            Tag::Float(v) => writer.write_f32::<BigEndian>(*v)?,
            Tag::Double(v) => writer.write_f64::<BigEndian>(*v)?,
            Tag::ByteArray(v) => {
                write_length(writer, v.len())?;
                for &b in v {
                    writer.write_i8(b)?;
                }
            }
            Tag::String(v) => write_string(writer, v)?,
            Tag::List(element_type, v) => {
                check_list(*element_type, v)?;
                writer.write_u8(*element_type)?;
                write_length(writer, v.len())?;
                for tag in v {
                    tag.write_payload(writer)?;
                }
            }
            Tag::Compound(v) => write_entries(writer, v)?,
            Tag::IntArray(v) => {
                write_length(writer, v.len())?;
                for &i in v {
                    writer.write_i32::<BigEndian>(i)?;
                }
            }
            Tag::LongArray(v) => {
                write_length(writer, v.len())?;
                for &l in v {
                    writer.write_i64::<BigEndian>(l)?;
                }
            }
        }
        Ok(())
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List(_, list) => Some(list),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    /// Any integral scalar, sign-extended.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Tag::Byte(n) => Some(i64::from(*n)),
            Tag::Short(n) => Some(i64::from(*n)),
            Tag::Int(n) => Some(i64::from(*n)),
            Tag::Long(n) => Some(*n),
            _ => None,
        }
    }
}

fn nested(depth: usize) -> Result<usize> {
    if depth >= MAX_DEPTH {
        return Err(SlimeError::NestingTooDeep(MAX_DEPTH));
    }
    Ok(depth + 1)
}

/// A list must declare a known element type, and only an empty list may declare End.
fn check_list(element_type: u8, items: &[Tag]) -> Result<()> {
    if element_type > tag_id::LONG_ARRAY || (element_type == tag_id::END && !items.is_empty()) {
        return Err(SlimeError::UnknownTagType(element_type));
    }
    match items.iter().find(|tag| tag.get_type_id() != element_type) {
        Some(tag) => Err(SlimeError::ListElementTypeMismatch {
            declared: element_type,
            found: tag.get_type_id(),
        }),
        None => Ok(()),
    }
}

/// Writes each named child, then the End terminator. An End child would end the
/// compound early on read, so it is refused.
fn write_entries<W: Write>(writer: &mut W, compound: &Compound) -> Result<()> {
    for (name, tag) in compound.iter() {
        if let Tag::End = tag {
            return Err(SlimeError::UnknownTagType(tag_id::END));
        }
        tag.write(writer, name)?;
    }
    writer.write_u8(tag_id::END)?;
    Ok(())
}

fn write_length<W: Write>(writer: &mut W, length: usize) -> Result<()> {
    let length = i32::try_from(length).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "Array longer than i32::MAX")
    })?;
    writer.write_i32::<BigEndian>(length)?;
    Ok(())
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let bytes = mutf8::encode(value);
    let length = u16::try_from(bytes.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "String longer than 65535 bytes")
    })?;
    writer.write_u16::<BigEndian>(length)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// A complete NBT document: one named root compound.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
    pub name: String,
    pub root: Compound,
}

impl NbtFile {
    pub fn new(name: String, root: Compound) -> Self {
        NbtFile { name, root }
    }

    /// Decodes an uncompressed document. Trailing bytes after the root are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = NbtReader::new(bytes);
        let (name, root) = Tag::read(&mut reader)?;
        match root {
            Tag::Compound(root) => Ok(NbtFile { name, root }),
            other => Err(SlimeError::RootNotCompound(other.get_type_id())),
        }
    }

    /// Decodes a gzip-compressed document, the on-disk form of `level.dat`.
    pub fn from_gzip(bytes: &[u8]) -> Result<Self> {
        let inflated = gzip::inflate(bytes)?;
        Self::from_bytes(&inflated)
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn read_gzip<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_gzip(&bytes)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(tag_id::COMPOUND)?;
        write_string(writer, &self.name)?;
        write_entries(writer, &self.root)
    }

    pub fn write_gzip<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        self.write(&mut encoder)?;
        encoder.finish()?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Cursor;

    fn compound<const N: usize>(entries: [(&str, Tag); N]) -> Compound {
        entries.into_iter().collect()
    }

    fn sample_file() -> NbtFile {
        let version = compound([("Name", Tag::String("1.20.4".to_string())), ("Id", Tag::Int(3700))]);
        let nested_list = Tag::List(
            tag_id::LIST,
            vec![
                Tag::List(tag_id::LONG, vec![Tag::Long(i64::MIN), Tag::Long(-1)]),
                Tag::List(tag_id::STRING, vec![]),
            ],
        );
        let data = compound([
            ("LevelName", Tag::String("Slime\0Farm 🙂".to_string())),
            ("RandomSeed", Tag::Long(3334823393436897159)),
            ("Version", Tag::Compound(version)),
            ("EmptyCompoundList", Tag::List(tag_id::COMPOUND, vec![])),
            ("EmptyEndList", Tag::List(tag_id::END, vec![])),
            ("Nested", nested_list),
            ("Bytes", Tag::ByteArray(vec![-128, 0, 127])),
            ("Ints", Tag::IntArray(vec![i32::MIN, 0, i32::MAX])),
            ("Longs", Tag::LongArray(vec![1 << 40, -(1 << 40)])),
            ("Weight", Tag::Float(0.25)),
            ("Time", Tag::Double(-1.5e300)),
            ("Small", Tag::Short(-2)),
            ("Flag", Tag::Byte(1)),
        ]);
        NbtFile::new(String::new(), compound([("Data", Tag::Compound(data))]))
    }

    #[test]
    fn test_tag_type_ids() {
        assert_eq!(Tag::End.get_type_id(), 0);
        assert_eq!(Tag::Byte(0).get_type_id(), 1);
        assert_eq!(Tag::Short(0).get_type_id(), 2);
        assert_eq!(Tag::Int(0).get_type_id(), 3);
        assert_eq!(Tag::Long(0).get_type_id(), 4);
        assert_eq!(Tag::Float(0.0).get_type_id(), 5);
        assert_eq!(Tag::Double(0.0).get_type_id(), 6);
        assert_eq!(Tag::ByteArray(vec![]).get_type_id(), 7);
        assert_eq!(Tag::String("".to_string()).get_type_id(), 8);
        assert_eq!(Tag::List(0, vec![]).get_type_id(), 9);
        assert_eq!(Tag::Compound(Compound::new()).get_type_id(), 10);
        assert_eq!(Tag::IntArray(vec![]).get_type_id(), 11);
        assert_eq!(Tag::LongArray(vec![]).get_type_id(), 12);
    }

    #[test]
    fn test_file_round_trip_preserves_order_and_list_types() {
        let original = sample_file();
        let bytes = original.to_bytes().unwrap();
        let decoded = NbtFile::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, original);

        let data = decoded.root.get("Data").and_then(Tag::as_compound).unwrap();
        assert_eq!(
            data.names().take(3).collect::<Vec<_>>(),
            vec!["LevelName", "RandomSeed", "Version"]
        );
        assert_eq!(data.get("EmptyCompoundList"), Some(&Tag::List(tag_id::COMPOUND, vec![])));
    }

    #[test]
    fn test_gzip_round_trip() {
        let original = sample_file();
        let mut buffer = Vec::new();
        original.write_gzip(&mut buffer).unwrap();
        assert!(gzip::has_gzip_magic(&buffer));

        let decoded = NbtFile::read_gzip(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_named_tag_read_write() {
        let tag = Tag::List(tag_id::INT, vec![Tag::Int(1), Tag::Int(2), Tag::Int(3)]);
        let mut buffer = Vec::new();
        tag.write(&mut buffer, "list").unwrap();

        let mut reader = NbtReader::new(&buffer);
        let (name, read_tag) = Tag::read(&mut reader).unwrap();
        assert_eq!(name, "list");
        assert_eq!(read_tag, tag);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_long_is_high_word_first() {
        let bytes = [
            tag_id::LONG, 0, 1, b's', 0x2E, 0x47, 0xAC, 0x35, 0x2A, 0x78, 0x0F, 0x87,
        ];
        let (_, tag) = Tag::read(&mut NbtReader::new(&bytes)).unwrap();
        assert_eq!(tag, Tag::Long(3334823393436897159));
    }

    #[test]
    fn test_every_truncation_fails_cleanly() {
        let bytes = sample_file().to_bytes().unwrap();
        for cut in 0..bytes.len() {
            assert_matches!(
                NbtFile::from_bytes(&bytes[..cut]),
                Err(SlimeError::TruncatedBuffer { .. }),
                "cut at {}",
                cut
            );
        }
    }

    #[test]
    fn test_root_must_be_compound() {
        let mut buffer = Vec::new();
        Tag::Int(5).write(&mut buffer, "root").unwrap();
        assert_matches!(NbtFile::from_bytes(&buffer), Err(SlimeError::RootNotCompound(3)));
        assert_matches!(NbtFile::from_bytes(&[0]), Err(SlimeError::RootNotCompound(0)));
    }

    #[test]
    fn test_unknown_tag_type() {
        assert_matches!(
            NbtFile::from_bytes(&[13, 0, 0]),
            Err(SlimeError::UnknownTagType(13))
        );
        // list declaring element type 42
        let bytes = [10, 0, 0, 9, 0, 1, b'l', 42, 0, 0, 0, 1, 0];
        assert_matches!(NbtFile::from_bytes(&bytes), Err(SlimeError::UnknownTagType(42)));
    }

    #[test]
    fn test_non_empty_end_list_is_rejected() {
        let bytes = [10, 0, 0, 9, 0, 1, b'l', 0, 0, 0, 0, 3, 0];
        assert_matches!(NbtFile::from_bytes(&bytes), Err(SlimeError::UnknownTagType(0)));
    }

    #[test]
    fn test_negative_list_length() {
        let bytes = [10, 0, 0, 9, 0, 1, b'l', 3, 0xFF, 0xFF, 0xFF, 0xFF, 0];
        assert_matches!(NbtFile::from_bytes(&bytes), Err(SlimeError::NegativeLength(-1)));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let mut bytes = vec![10, 0, 0];
        Tag::Int(1).write(&mut bytes, "a").unwrap();
        Tag::Int(2).write(&mut bytes, "b").unwrap();
        Tag::Long(3).write(&mut bytes, "a").unwrap();
        bytes.push(0);

        let file = NbtFile::from_bytes(&bytes).unwrap();
        assert_eq!(file.root.get("a"), Some(&Tag::Long(3)));
        assert_eq!(file.root.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let mut bytes = vec![10, 0, 0];
        for _ in 0..MAX_DEPTH + 1 {
            bytes.extend_from_slice(&[10, 0, 0]);
        }
        bytes.extend(std::iter::repeat(0).take(MAX_DEPTH + 2));
        assert_matches!(NbtFile::from_bytes(&bytes), Err(SlimeError::NestingTooDeep(_)));
    }

    #[test]
    fn test_mismatched_list_is_not_written() {
        assert_matches!(
            Tag::list(tag_id::INT, vec![Tag::Int(1), Tag::Long(2)]),
            Err(SlimeError::ListElementTypeMismatch { declared: 3, found: 4 })
        );

        let bad = Tag::List(tag_id::STRING, vec![Tag::Byte(0)]);
        assert_matches!(
            bad.write(&mut Vec::new(), "bad"),
            Err(SlimeError::ListElementTypeMismatch { declared: 8, found: 1 })
        );
    }

    #[test]
    fn test_end_child_is_not_written() {
        let root = compound([("a", Tag::End), ("b", Tag::Int(1))]);
        assert_matches!(
            NbtFile::new(String::new(), root).to_bytes(),
            Err(SlimeError::UnknownTagType(0))
        );

        let inner = compound([("seed", Tag::Long(1)), ("stop", Tag::End)]);
        let nested = Tag::Compound(compound([("Data", Tag::Compound(inner))]));
        assert_matches!(nested.write(&mut Vec::new(), ""), Err(SlimeError::UnknownTagType(0)));
    }

    #[test]
    fn test_end_typed_list_must_be_empty() {
        assert_matches!(
            Tag::list(tag_id::END, vec![Tag::End, Tag::End]),
            Err(SlimeError::UnknownTagType(0))
        );
        assert_matches!(
            Tag::List(tag_id::END, vec![Tag::End]).write(&mut Vec::new(), "l"),
            Err(SlimeError::UnknownTagType(0))
        );

        let empty = assert_matches!(Tag::list(tag_id::END, vec![]), Ok(tag) => tag);
        let mut buffer = Vec::new();
        empty.write(&mut buffer, "l").unwrap();
        let (_, decoded) = Tag::read(&mut NbtReader::new(&buffer)).unwrap();
        assert_eq!(decoded, empty);
    }

    #[test]
    fn test_unknown_list_type_is_not_written() {
        assert_matches!(Tag::list(13, vec![]), Err(SlimeError::UnknownTagType(13)));
        assert_matches!(
            Tag::List(42, vec![]).write(&mut Vec::new(), "l"),
            Err(SlimeError::UnknownTagType(42))
        );
    }

    #[test]
    fn test_read_uncompressed_stream() {
        let original = sample_file();
        let bytes = original.to_bytes().unwrap();
        let decoded = NbtFile::read(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(decoded, original);

        let mut empty = Cursor::new(Vec::new());
        assert_matches!(NbtFile::read(&mut empty), Err(SlimeError::TruncatedBuffer { .. }));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Tag::Byte(-3).as_integer(), Some(-3));
        assert_eq!(Tag::Short(300).as_integer(), Some(300));
        assert_eq!(Tag::Int(-70000).as_integer(), Some(-70000));
        assert_eq!(Tag::Long(1 << 40).as_integer(), Some(1 << 40));
        assert_eq!(Tag::Float(1.0).as_integer(), None);
        assert_eq!(Tag::String("x".to_string()).as_string(), Some("x"));
        assert_eq!(Tag::List(1, vec![Tag::Byte(1)]).as_list().map(<[Tag]>::len), Some(1));
        assert!(Tag::Int(0).as_compound().is_none());
    }
}
