//! Constant pool model and parser.
//!
//! Only Utf8 and Class entries need to be resolvable for summarization;
//! everything else is stored as an opaque placeholder of the right slot
//! width. Indexing is 1-based and long/double entries consume two slots.

use super::bytes::ByteReader;
use crate::error::ClassFileErrorKind;

// Constant pool tags (wire constants).
const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_INTERFACE_METHODREF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

/// One constant pool entry, resolved as far as summarization needs.
#[derive(Debug, Clone)]
pub enum Constant {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    /// name_index of a Class entry
    Class(u16),
    /// string_index of a String entry
    String(u16),
    /// Any entry we never dereference (refs, name-and-type, handles...)
    Opaque,
    /// Second slot of a long/double entry
    WideContinuation,
}

/// Parsed constant pool with 1-based resolution helpers.
pub struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    /// Parse `count - 1` entries from the reader (`count` as it appears in
    /// the class-file header).
    pub fn parse(r: &mut ByteReader<'_>, count: u16) -> Result<Self, ClassFileErrorKind> {
        let mut entries = Vec::with_capacity(count as usize);
        // Slot 0 is unusable by definition
        entries.push(Constant::Opaque);

        let mut index = 1u16;
        while index < count {
            let tag = r.read_u8()?;
            let constant = match tag {
                TAG_UTF8 => {
                    let len = r.read_u16()? as usize;
                    let bytes = r.read_bytes(len)?;
                    // Real payloads use the JVM's modified UTF-8; the class
                    // and descriptor names the summary needs are ASCII-safe,
                    // so strict UTF-8 with a lossy fallback is sufficient.
                    match std::str::from_utf8(bytes) {
                        Ok(s) => Constant::Utf8(s.to_string()),
                        Err(_) => return Err(ClassFileErrorKind::BadUtf8 { index }),
                    }
                }
                TAG_INTEGER => Constant::Integer(r.read_u32()? as i32),
                TAG_FLOAT => Constant::Float(f32::from_bits(r.read_u32()?)),
                TAG_LONG => {
                    let high = u64::from(r.read_u32()?);
                    let low = u64::from(r.read_u32()?);
                    Constant::Long(((high << 32) | low) as i64)
                }
                TAG_DOUBLE => {
                    let high = u64::from(r.read_u32()?);
                    let low = u64::from(r.read_u32()?);
                    Constant::Double(f64::from_bits((high << 32) | low))
                }
                TAG_CLASS => Constant::Class(r.read_u16()?),
                TAG_STRING => Constant::String(r.read_u16()?),
                TAG_METHOD_TYPE | TAG_MODULE | TAG_PACKAGE => {
                    r.skip(2)?;
                    Constant::Opaque
                }
                TAG_METHOD_HANDLE => {
                    r.skip(3)?;
                    Constant::Opaque
                }
                TAG_FIELDREF | TAG_METHODREF | TAG_INTERFACE_METHODREF | TAG_NAME_AND_TYPE
                | TAG_DYNAMIC | TAG_INVOKE_DYNAMIC => {
                    r.skip(4)?;
                    Constant::Opaque
                }
                _ => return Err(ClassFileErrorKind::UnknownConstantTag { tag, index }),
            };

            let wide = matches!(constant, Constant::Long(_) | Constant::Double(_));
            entries.push(constant);
            index += 1;
            if wide {
                entries.push(Constant::WideContinuation);
                index += 1;
            }
        }

        Ok(Self { entries })
    }

    fn size(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Look up an entry, rejecting index 0 and out-of-range indices.
    pub fn get(&self, index: u16) -> Result<&Constant, ClassFileErrorKind> {
        if index == 0 || (index as usize) >= self.entries.len() {
            return Err(ClassFileErrorKind::BadConstantIndex {
                index,
                pool_size: self.size(),
            });
        }
        Ok(&self.entries[index as usize])
    }

    /// Resolve a Utf8 entry.
    pub fn utf8(&self, index: u16) -> Result<&str, ClassFileErrorKind> {
        match self.get(index)? {
            Constant::Utf8(s) => Ok(s),
            _ => Err(ClassFileErrorKind::WrongConstantKind {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Resolve a Class entry to its internal (slash-separated) name.
    pub fn class_name(&self, index: u16) -> Result<&str, ClassFileErrorKind> {
        match self.get(index)? {
            Constant::Class(name_index) => self.utf8(*name_index),
            _ => Err(ClassFileErrorKind::WrongConstantKind {
                index,
                expected: "Class",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_bytes(entries: &[&[u8]]) -> Vec<u8> {
        entries.concat()
    }

    #[test]
    fn test_parse_utf8_and_class() {
        // #1 Utf8 "pkg/A", #2 Class -> #1
        let data = pool_bytes(&[
            &[TAG_UTF8, 0, 5],
            b"pkg/A",
            &[TAG_CLASS, 0, 1],
        ]);
        let mut r = ByteReader::new(&data);
        let pool = ConstantPool::parse(&mut r, 3).unwrap();

        assert_eq!(pool.utf8(1).unwrap(), "pkg/A");
        assert_eq!(pool.class_name(2).unwrap(), "pkg/A");
    }

    #[test]
    fn test_wide_entries_consume_two_slots() {
        // #1 Long (slots 1+2), #3 Utf8 "x"
        let data = pool_bytes(&[
            &[TAG_LONG, 0, 0, 0, 0, 0, 0, 0, 42],
            &[TAG_UTF8, 0, 1],
            b"x",
        ]);
        let mut r = ByteReader::new(&data);
        let pool = ConstantPool::parse(&mut r, 4).unwrap();

        assert!(matches!(pool.get(1).unwrap(), Constant::Long(42)));
        assert!(matches!(pool.get(2).unwrap(), Constant::WideContinuation));
        assert_eq!(pool.utf8(3).unwrap(), "x");
    }

    #[test]
    fn test_index_zero_rejected() {
        let data = pool_bytes(&[&[TAG_UTF8, 0, 1], b"a"]);
        let mut r = ByteReader::new(&data);
        let pool = ConstantPool::parse(&mut r, 2).unwrap();

        assert!(matches!(
            pool.get(0),
            Err(ClassFileErrorKind::BadConstantIndex { .. })
        ));
        assert!(matches!(
            pool.get(9),
            Err(ClassFileErrorKind::BadConstantIndex { .. })
        ));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let data = [99u8, 0, 0];
        let mut r = ByteReader::new(&data);
        assert!(matches!(
            ConstantPool::parse(&mut r, 2),
            Err(ClassFileErrorKind::UnknownConstantTag { tag: 99, .. })
        ));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let data = pool_bytes(&[&[TAG_UTF8, 0, 1], b"a"]);
        let mut r = ByteReader::new(&data);
        let pool = ConstantPool::parse(&mut r, 2).unwrap();
        assert!(matches!(
            pool.class_name(1),
            Err(ClassFileErrorKind::WrongConstantKind { expected: "Class", .. })
        ));
    }
}
