use std::io::{Read, Seek, SeekFrom};

use super::header::{
    FileHeader, InfoHeader, BITMAP_SIGNATURE, FILE_HEADER_NAME, FILE_HEADER_SIZE,
    INFO_HEADER_NAME, INFO_HEADER_SIZE, SUPPORTED_BITS_PER_PIXEL,
};
use super::{check_dimensions, row_stride_for, Bitmap, Pixel, RowOrder, BYTES_PER_PIXEL};
use crate::error::Error;
use crate::Result;

/// Decodes a 24-bit bitmap from any seekable byte source.
pub struct BitmapReader<T: Read + Seek> {
    reader: T,
    row_order: RowOrder,
}

impl<T: Read + Seek> BitmapReader<T> {
    pub fn new(reader: T) -> Self {
        Self {
            reader,
            row_order: RowOrder::default(),
        }
    }

    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    pub fn read_bitmap(&mut self) -> Result<Bitmap> {
        let file_header = self.read_file_header()?;
        Self::check_signature(&file_header)?;
        let info_header = self.read_info_header()?;
        Self::check_bit_depth(&info_header)?;
        let width = Self::extract_width(&info_header)?;
        let height = Self::extract_height(&info_header)?;
        let row_stride = Self::calculate_row_stride(width, height)?;
        let pixel_data_size = Self::calculate_pixel_data_size(width, height, row_stride)?;
        self.seek_to_pixel_data(file_header.pixel_data_offset)?;
        let pixel_data = self.read_pixel_data(pixel_data_size)?;
        let bottom_up = self.row_order.is_bottom_up(info_header.height);
        let pixels = decode_rows(&pixel_data, width, height, row_stride, bottom_up);
        log::info!(
            "Loaded {}x{} bitmap ({} rows)",
            width,
            height,
            if bottom_up { "bottom-up" } else { "top-down" }
        );
        Ok(Bitmap::from_decoded_parts(
            file_header,
            info_header,
            self.row_order,
            width,
            height,
            pixels,
        ))
    }

    fn read_file_header(&mut self) -> Result<FileHeader> {
        let mut bytes = [0; FILE_HEADER_SIZE];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| Error::FailedToReadHeader(FILE_HEADER_NAME, e))?;
        let header = FileHeader::from_bytes(&bytes).ok_or_else(|| {
            Error::FailedToReadHeader(FILE_HEADER_NAME, std::io::ErrorKind::UnexpectedEof.into())
        })?;
        log::debug!("{:?}", header);
        Ok(header)
    }

    fn read_info_header(&mut self) -> Result<InfoHeader> {
        let mut bytes = [0; INFO_HEADER_SIZE];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| Error::FailedToReadHeader(INFO_HEADER_NAME, e))?;
        let header = InfoHeader::from_bytes(&bytes).ok_or_else(|| {
            Error::FailedToReadHeader(INFO_HEADER_NAME, std::io::ErrorKind::UnexpectedEof.into())
        })?;
        log::debug!("{:?}", header);
        Ok(header)
    }

    fn check_signature(header: &FileHeader) -> Result<()> {
        if header.signature != BITMAP_SIGNATURE {
            log::warn!("Rejected file with signature 0x{:04X}", header.signature);
            return Err(Error::BadSignature(header.signature));
        }
        Ok(())
    }

    fn check_bit_depth(header: &InfoHeader) -> Result<()> {
        if header.bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
            log::warn!(
                "Rejected bitmap with {} bits per pixel",
                header.bits_per_pixel
            );
            return Err(Error::UnsupportedBitDepth(header.bits_per_pixel));
        }
        Ok(())
    }

    fn extract_width(header: &InfoHeader) -> Result<u32> {
        u32::try_from(header.width).map_err(|_| Error::NegativeWidth(header.width))
    }

    fn extract_height(header: &InfoHeader) -> Result<u32> {
        let height = header.height.unsigned_abs();
        check_dimensions(header.width.unsigned_abs(), height)?;
        Ok(height)
    }

    fn calculate_row_stride(width: u32, height: u32) -> Result<usize> {
        row_stride_for(width).ok_or(Error::ImageTooLarge(width, height))
    }

    fn calculate_pixel_data_size(width: u32, height: u32, row_stride: usize) -> Result<usize> {
        row_stride
            .checked_mul(height as usize)
            .ok_or(Error::ImageTooLarge(width, height))
    }

    fn seek_to_pixel_data(&mut self, offset: u32) -> Result<()> {
        self.reader
            .seek(SeekFrom::Start(u64::from(offset)))
            .map_err(|e| Error::FailedToSeekToPixelData(offset, e))?;
        Ok(())
    }

    /// Reads exactly `size` bytes, buffering only what the source really holds.
    fn read_pixel_data(&mut self, size: usize) -> Result<Vec<u8>> {
        let mut pixel_data = Vec::new();
        let limit = u64::try_from(size).unwrap_or(u64::MAX);
        let actual = (&mut self.reader)
            .take(limit)
            .read_to_end(&mut pixel_data)
            .map_err(Error::FailedToReadPixelData)?;
        if actual < size {
            log::warn!("Pixel data truncated: {} of {} bytes", actual, size);
            return Err(Error::TruncatedPixelData {
                expected: size,
                actual,
            });
        }
        Ok(pixel_data)
    }
}

/// Turns the raw pixel array into top-down rows of pixels.
///
/// With `bottom_up` set, the first stored row becomes the last row in memory.
fn decode_rows(
    pixel_data: &[u8],
    width: u32,
    height: u32,
    row_stride: usize,
    bottom_up: bool,
) -> Vec<Pixel> {
    let width = width as usize;
    let height = height as usize;
    let mut pixels = vec![Pixel::default(); width * height];
    if width == 0 {
        return pixels;
    }
    for (y, stored_row) in pixel_data.chunks_exact(row_stride).take(height).enumerate() {
        let target_row = if bottom_up { height - y - 1 } else { y };
        let target = &mut pixels[target_row * width..(target_row + 1) * width];
        for (pixel, bytes) in target
            .iter_mut()
            .zip(stored_row.chunks_exact(BYTES_PER_PIXEL))
        {
            *pixel = Pixel::from_bgr_bytes([bytes[0], bytes[1], bytes[2]]);
        }
    }
    pixels
}
