use std::io;
use std::io::Write;

/// Cursor for reading little-endian fields out of a byte slice
pub struct LittleEndianReader<'a> {
    /// the bytes to decode
    bytes: &'a [u8],
    /// index of the next unread byte
    position: usize,
}

impl<'a> LittleEndianReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// read the next `N` bytes verbatim
    ///
    /// returns None without advancing if fewer than `N` bytes remain
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.position.checked_add(N)?;
        let array: [u8; N] = self.bytes.get(self.position..end)?.try_into().ok()?;
        self.position = end;
        Some(array)
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Writes little-endian fields to a Writer and keeps
/// track of how many bytes reached it
pub struct LittleEndianWriter<'a, T: Write> {
    /// the underlying output stream
    writer: &'a mut T,
    /// number of bytes handed to the output stream so far
    bytes_written: usize,
}

impl<'a, T: Write> LittleEndianWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> LittleEndianWriter<'a, T> {
        LittleEndianWriter {
            writer,
            bytes_written: 0,
        }
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), io::Error> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), io::Error> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), io::Error> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), io::Error> {
        self.writer.write_all(bytes)?;
        self.bytes_written += bytes.len();
        Ok(())
    }

    /// write `count` zero bytes, used for row padding
    pub fn write_zeros(&mut self, count: usize) -> Result<(), io::Error> {
        const ZEROS: [u8; 4] = [0; 4];
        let mut remaining = count;
        while remaining > 0 {
            let chunk = remaining.min(ZEROS.len());
            self.write_bytes(&ZEROS[..chunk])?;
            remaining -= chunk;
        }
        Ok(())
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }
}
