//! Bit-level reading over a fixed header window.
//!
//! Wraps a big-endian `bitstream_io` reader with explicit bounds checks so a
//! read that runs past the end of the window fails without moving the cursor.

use std::io;

use bitstream_io::{BigEndian, BitRead, BitReader, UnsignedInteger};

/// Widest field a single read may extract.
pub const MAX_READ_BITS: u32 = 32;

/// Sequential, most-significant-bit-first cursor over a byte slice.
#[derive(Debug)]
pub struct BitCursor<'a> {
    bs: BitReader<io::Cursor<&'a [u8]>, BigEndian>,
    len: u64,
}

impl<'a> BitCursor<'a> {
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self {
            bs: BitReader::new(io::Cursor::new(buf)),
            len: (buf.len() as u64) << 3,
        }
    }

    /// Reads the next `n` bits as an unsigned integer.
    ///
    /// `n` must lie in `1..=32`. Fails with [`io::ErrorKind::UnexpectedEof`]
    /// when fewer than `n` bits remain.
    #[inline(always)]
    pub fn get_n<I: UnsignedInteger>(&mut self, n: u32) -> io::Result<I> {
        if n == 0 || n > MAX_READ_BITS {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("get_n({n}): width must be between 1 and {MAX_READ_BITS}"),
            ));
        }

        self.ensure(n, "get_n")?;
        self.bs.read_unsigned_var(n)
    }

    #[inline(always)]
    pub fn get(&mut self) -> io::Result<bool> {
        self.ensure(1, "get")?;
        self.bs.read_bit()
    }

    #[inline(always)]
    pub fn skip_n(&mut self, n: u32) -> io::Result<()> {
        self.ensure(n, "skip_n")?;
        self.bs.skip(n)
    }

    #[inline(always)]
    pub fn position(&mut self) -> io::Result<u64> {
        self.bs.position_in_bits()
    }

    #[inline(always)]
    pub fn available(&mut self) -> io::Result<u64> {
        self.bs.position_in_bits().map(|pos| self.len - pos)
    }

    fn ensure(&mut self, n: u32, op: &str) -> io::Result<()> {
        let avail = self.available()?;
        if n as u64 > avail {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{op}({n}): out of bounds bits at {}, {avail} remaining",
                    self.len - avail
                ),
            ));
        }

        Ok(())
    }
}

impl Default for BitCursor<'_> {
    fn default() -> Self {
        Self::from_slice(&[])
    }
}

#[test]
fn reads_msb_first_across_bytes() -> io::Result<()> {
    let buf = [0xFF, 0xF2, 0x5A];
    let mut cursor = BitCursor::from_slice(&buf);

    assert_eq!(cursor.get_n::<u16>(12)?, 0xFFF);
    assert_eq!(cursor.get_n::<u8>(4)?, 2);
    assert!(!cursor.get()?);
    assert_eq!(cursor.get_n::<u8>(3)?, 0b101);
    assert_eq!(cursor.position()?, 20);
    assert_eq!(cursor.available()?, 4);
    assert_eq!(cursor.get_n::<u8>(4)?, 0xA);
    assert_eq!(cursor.available()?, 0);
    Ok(())
}

#[test]
fn reads_full_32_bit_field() -> io::Result<()> {
    let buf = [0x12, 0x34, 0x56, 0x78, 0x9A];
    let mut cursor = BitCursor::from_slice(&buf);

    cursor.skip_n(4)?;
    assert_eq!(cursor.get_n::<u32>(32)?, 0x2345_6789);
    Ok(())
}

#[test]
fn out_of_bounds_read_keeps_position() -> io::Result<()> {
    let buf = [0xAB];
    let mut cursor = BitCursor::from_slice(&buf);

    cursor.skip_n(5)?;
    let err = cursor.get_n::<u8>(4).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(cursor.position()?, 5);

    let err = cursor.skip_n(8).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(cursor.get_n::<u8>(3)?, 0b011);
    Ok(())
}

#[test]
fn rejects_invalid_widths() {
    let buf = [0u8; 8];
    let mut cursor = BitCursor::from_slice(&buf);

    assert_eq!(
        cursor.get_n::<u32>(0).unwrap_err().kind(),
        io::ErrorKind::InvalidInput
    );
    assert_eq!(
        cursor.get_n::<u64>(33).unwrap_err().kind(),
        io::ErrorKind::InvalidInput
    );
}

#[test]
fn empty_cursor_is_exhausted() {
    let mut cursor = BitCursor::default();
    assert_eq!(cursor.get().unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
}
