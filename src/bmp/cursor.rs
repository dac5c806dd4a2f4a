//! Little-endian reader over a byte slice.
//!
//! The read position doubles as the count of bytes consumed so far, which is
//! what the pixel-data offset is measured against.

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Advance by exactly `n` bytes. `None` (without moving) if fewer remain.
    pub(crate) fn skip(&mut self, n: usize) -> Option<()> {
        self.take(n).map(|_| ())
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn read_fixed<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.take(N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Some(buf)
    }

    pub(crate) fn read_u8(&mut self) -> Option<u8> {
        self.read_fixed::<1>().map(|[b]| b)
    }

    pub(crate) fn read_u16_le(&mut self) -> Option<u16> {
        self.read_fixed().map(u16::from_le_bytes)
    }

    pub(crate) fn read_u32_le(&mut self) -> Option<u32> {
        self.read_fixed().map(u32::from_le_bytes)
    }

    pub(crate) fn read_i32_le(&mut self) -> Option<i32> {
        self.read_fixed().map(i32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_and_counts() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xff];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_u16_le(), Some(0x1234));
        assert_eq!(c.read_u32_le(), Some(0x1234_5678));
        assert_eq!(c.position(), 6);
        assert_eq!(c.read_u8(), Some(0xff));
        assert_eq!(c.read_u8(), None);
    }

    #[test]
    fn short_read_does_not_advance() {
        let data = [1, 2, 3];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_u32_le(), None);
        assert_eq!(c.position(), 0);
        assert_eq!(c.skip(4), None);
        assert_eq!(c.skip(3), Some(()));
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn signed_values() {
        let data = (-2i32).to_le_bytes();
        assert_eq!(Cursor::new(&data).read_i32_le(), Some(-2));
    }
}
