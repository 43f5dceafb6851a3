use std::io;
use std::io::Write;

use crate::binary_stream::{LittleEndianReader, LittleEndianWriter};

/// "BM" read as a little-endian u16
pub const BITMAP_SIGNATURE: u16 = 0x4D42;
pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
pub const SUPPORTED_BITS_PER_PIXEL: u16 = 24;

pub const FILE_HEADER_NAME: &str = "file header";
pub const INFO_HEADER_NAME: &str = "info header";

/// The header at the start of every bitmap file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// byte index within the file where the pixel array starts
    pub pixel_data_offset: u32,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            signature: BITMAP_SIGNATURE,
            file_size: HEADERS_SIZE as u32,
            reserved1: 0,
            reserved2: 0,
            pixel_data_offset: HEADERS_SIZE as u32,
        }
    }
}

impl FileHeader {
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let mut reader = LittleEndianReader::new(bytes);
        Some(Self {
            signature: reader.read_u16()?,
            file_size: reader.read_u32()?,
            reserved1: reader.read_u16()?,
            reserved2: reader.read_u16()?,
            pixel_data_offset: reader.read_u32()?,
        })
    }

    pub fn write_to<T: Write>(&self, writer: &mut LittleEndianWriter<T>) -> io::Result<()> {
        writer.write_u16(self.signature)?;
        writer.write_u32(self.file_size)?;
        writer.write_u16(self.reserved1)?;
        writer.write_u16(self.reserved2)?;
        writer.write_u32(self.pixel_data_offset)
    }
}

/// The 40 byte BITMAPINFOHEADER following the file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// a negative value marks rows stored from the top down
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl Default for InfoHeader {
    fn default() -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width: 0,
            height: 0,
            planes: 1,
            bits_per_pixel: SUPPORTED_BITS_PER_PIXEL,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }
}

impl InfoHeader {
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let mut reader = LittleEndianReader::new(bytes);
        Some(Self {
            header_size: reader.read_u32()?,
            width: reader.read_i32()?,
            height: reader.read_i32()?,
            planes: reader.read_u16()?,
            bits_per_pixel: reader.read_u16()?,
            compression: reader.read_u32()?,
            image_size: reader.read_u32()?,
            x_pixels_per_meter: reader.read_i32()?,
            y_pixels_per_meter: reader.read_i32()?,
            colors_used: reader.read_u32()?,
            colors_important: reader.read_u32()?,
        })
    }

    pub fn write_to<T: Write>(&self, writer: &mut LittleEndianWriter<T>) -> io::Result<()> {
        writer.write_u32(self.header_size)?;
        writer.write_i32(self.width)?;
        writer.write_i32(self.height)?;
        writer.write_u16(self.planes)?;
        writer.write_u16(self.bits_per_pixel)?;
        writer.write_u32(self.compression)?;
        writer.write_u32(self.image_size)?;
        writer.write_i32(self.x_pixels_per_meter)?;
        writer.write_i32(self.y_pixels_per_meter)?;
        writer.write_u32(self.colors_used)?;
        writer.write_u32(self.colors_important)
    }
}

#[cfg(test)]
mod test {
    use super::{FileHeader, InfoHeader, FILE_HEADER_SIZE, INFO_HEADER_SIZE};
    use crate::binary_stream::LittleEndianWriter;

    #[rustfmt::skip]
    const FILE_HEADER_BYTES: [u8; FILE_HEADER_SIZE] = [
        0x42, 0x4D,
        0x46, 0x00, 0x00, 0x00,
        0x01, 0x00,
        0x02, 0x00,
        0x36, 0x00, 0x00, 0x00,
    ];

    #[rustfmt::skip]
    const INFO_HEADER_BYTES: [u8; INFO_HEADER_SIZE] = [
        0x28, 0x00, 0x00, 0x00,
        0x05, 0x00, 0x00, 0x00,
        0xFD, 0xFF, 0xFF, 0xFF,
        0x01, 0x00,
        0x18, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x30, 0x00, 0x00, 0x00,
        0x13, 0x0B, 0x00, 0x00,
        0x13, 0x0B, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn parse_file_header() {
        let header = FileHeader::from_bytes(&FILE_HEADER_BYTES).expect("14 bytes are enough");
        assert_eq!(header.signature, 0x4D42);
        assert_eq!(header.file_size, 70);
        assert_eq!(header.reserved1, 1);
        assert_eq!(header.reserved2, 2);
        assert_eq!(header.pixel_data_offset, 54);
    }

    #[test]
    fn parse_info_header() {
        let header = InfoHeader::from_bytes(&INFO_HEADER_BYTES).expect("40 bytes are enough");
        assert_eq!(header.header_size, 40);
        assert_eq!(header.width, 5);
        assert_eq!(header.height, -3);
        assert_eq!(header.planes, 1);
        assert_eq!(header.bits_per_pixel, 24);
        assert_eq!(header.image_size, 48);
        assert_eq!(header.x_pixels_per_meter, 2835);
        assert_eq!(header.y_pixels_per_meter, 2835);
    }

    #[test]
    fn parse_short_header() {
        assert!(FileHeader::from_bytes(&FILE_HEADER_BYTES[..13]).is_none());
        assert!(InfoHeader::from_bytes(&INFO_HEADER_BYTES[..39]).is_none());
    }

    #[test]
    fn encode_headers_byte_exact() {
        let file_header = FileHeader::from_bytes(&FILE_HEADER_BYTES).unwrap();
        let info_header = InfoHeader::from_bytes(&INFO_HEADER_BYTES).unwrap();
        let mut output: Vec<u8> = vec![];
        let mut writer = LittleEndianWriter::new(&mut output);
        file_header.write_to(&mut writer).expect("ERR");
        assert_eq!(writer.bytes_written(), FILE_HEADER_SIZE);
        info_header.write_to(&mut writer).expect("ERR");
        assert_eq!(writer.bytes_written(), FILE_HEADER_SIZE + INFO_HEADER_SIZE);
        assert_eq!(&output[..FILE_HEADER_SIZE], &FILE_HEADER_BYTES);
        assert_eq!(&output[FILE_HEADER_SIZE..], &INFO_HEADER_BYTES);
    }
}
