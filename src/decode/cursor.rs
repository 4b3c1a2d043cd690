//! Read cursor over the immutable container bytes
//!
//! The scanner and chunk decoder never index the input directly; all
//! reads go through this cursor so every access stays in bounds.

/// Forward-only cursor into a borrowed byte slice
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at `pos` within `data`
    pub fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Current byte offset within the container
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Number of bytes left ahead of the cursor
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Byte at the cursor without advancing, `None` past the end
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Read one byte and advance
    pub fn read_u8(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Read two bytes big-endian and advance (back-reference tokens)
    pub fn read_u16_be(&mut self) -> Option<u16> {
        if self.remaining() < 2 {
            return None;
        }
        let hi = self.data[self.pos];
        let lo = self.data[self.pos + 1];
        self.pos += 2;
        Some(u16::from_be_bytes([hi, lo]))
    }

    /// Read four bytes little-endian and advance (chunk headers)
    pub fn read_u32_le(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let bytes: [u8; 4] = self.data[self.pos..self.pos + 4].try_into().ok()?;
        self.pos += 4;
        Some(u32::from_le_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_and_bounds() {
        let data = [0x10, 0x05, 0x00, 0x00, 0xAB, 0xCD];
        let mut c = Cursor::new(&data, 0);

        assert_eq!(c.read_u32_le(), Some(0x0000_0510));
        assert_eq!(c.pos(), 4);
        assert_eq!(c.read_u16_be(), Some(0xABCD));
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.peek(), None);
        assert_eq!(c.read_u8(), None);
        assert_eq!(c.read_u16_be(), None);
    }

    #[test]
    fn test_short_tail() {
        let data = [0x01];
        let mut c = Cursor::new(&data, 0);
        assert_eq!(c.read_u16_be(), None);
        assert_eq!(c.read_u8(), Some(0x01));
    }
}
