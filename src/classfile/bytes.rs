//! Big-endian cursor over a class-file payload.

use crate::error::ClassFileErrorKind;

/// A bounds-checked big-endian reader over a byte slice.
///
/// All class-file quantities are big-endian. Every read either consumes the
/// requested bytes or reports exactly how the payload is truncated.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the payload.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ClassFileErrorKind> {
        if self.remaining() < len {
            return Err(ClassFileErrorKind::Truncated {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, ClassFileErrorKind> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ClassFileErrorKind> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, ClassFileErrorKind> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ClassFileErrorKind> {
        self.take(len)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), ClassFileErrorKind> {
        self.take(len)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_reads() {
        let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x34];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u32().unwrap(), 0xCAFE_BABE);
        assert_eq!(r.read_u16().unwrap(), 0x0034);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_truncation_reports_offset() {
        let data = [0x00, 0x01];
        let mut r = ByteReader::new(&data);
        r.read_u16().unwrap();
        match r.read_u32() {
            Err(ClassFileErrorKind::Truncated { offset, needed }) => {
                assert_eq!(offset, 2);
                assert_eq!(needed, 4);
            }
            other => panic!("expected Truncated, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_consumes() {
        let data = [1, 2, 3, 4, 5];
        let mut r = ByteReader::new(&data);
        r.skip(3).unwrap();
        assert_eq!(r.read_u8().unwrap(), 4);
        assert!(r.skip(2).is_err());
    }
}
