use std::io::Write;

use super::header::{
    FileHeader, InfoHeader, FILE_HEADER_NAME, HEADERS_SIZE, INFO_HEADER_NAME, INFO_HEADER_SIZE,
    SUPPORTED_BITS_PER_PIXEL,
};
use super::{Bitmap, BYTES_PER_PIXEL};
use crate::binary_stream::LittleEndianWriter;
use crate::error::Error;
use crate::logger::log_header;
use crate::Result;

/// Encodes a bitmap into any byte sink.
pub struct BitmapWriter<'a, T: Write> {
    writer: &'a mut T,
    bitmap: &'a Bitmap,
}

impl<'a, T: Write> BitmapWriter<'a, T> {
    pub fn new(writer: &'a mut T, bitmap: &'a Bitmap) -> BitmapWriter<'a, T> {
        BitmapWriter { writer, bitmap }
    }

    pub fn write_bitmap(&mut self) -> Result<()> {
        check_not_empty(self.bitmap)?;
        let (file_header, info_header) = prepare_headers(self.bitmap)?;
        let bitmap = self.bitmap;
        let mut writer = LittleEndianWriter::new(&mut *self.writer);
        write_header(&mut writer, FILE_HEADER_NAME, |w| file_header.write_to(w))?;
        write_header(&mut writer, INFO_HEADER_NAME, |w| info_header.write_to(w))?;
        write_pixel_rows(&mut writer, bitmap, info_header.height)?;
        writer.flush().map_err(Error::FailedToWritePixelData)?;
        log::info!(
            "Wrote {}x{} bitmap ({} bytes)",
            bitmap.width(),
            bitmap.height(),
            writer.bytes_written()
        );
        debug_assert_eq!(writer.bytes_written(), file_header.file_size as usize);
        Ok(())
    }
}

pub(crate) fn check_not_empty(bitmap: &Bitmap) -> Result<()> {
    if bitmap.is_empty() {
        return Err(Error::EmptyBuffer);
    }
    Ok(())
}

/// Derive the headers to emit from the ones the bitmap was loaded with.
fn prepare_headers(bitmap: &Bitmap) -> Result<(FileHeader, InfoHeader)> {
    let too_large = || Error::ImageTooLarge(bitmap.width(), bitmap.height());
    let image_size = bitmap
        .row_stride()
        .checked_mul(bitmap.height() as usize)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(too_large)?;
    let file_size = image_size
        .checked_add(HEADERS_SIZE as u32)
        .ok_or_else(too_large)?;
    let file_header = FileHeader {
        file_size,
        pixel_data_offset: HEADERS_SIZE as u32,
        ..*bitmap.file_header()
    };
    let info_header = InfoHeader {
        header_size: INFO_HEADER_SIZE as u32,
        width: bitmap.width() as i32,
        height: bitmap.stored_height(),
        bits_per_pixel: SUPPORTED_BITS_PER_PIXEL,
        image_size,
        ..*bitmap.info_header()
    };
    Ok((file_header, info_header))
}

/// Encode a header in memory first so it can be logged, then pass it on.
fn write_header<T, F>(
    writer: &mut LittleEndianWriter<T>,
    header_name: &'static str,
    encode: F,
) -> Result<()>
where
    T: Write,
    F: FnOnce(&mut LittleEndianWriter<Vec<u8>>) -> std::io::Result<()>,
{
    let mut buffer = Vec::with_capacity(HEADERS_SIZE);
    encode(&mut LittleEndianWriter::new(&mut buffer))
        .map_err(|e| Error::FailedToWriteHeader(header_name, e))?;
    log_header(header_name, &buffer);
    writer
        .write_bytes(&buffer)
        .map_err(|e| Error::FailedToWriteHeader(header_name, e))
}

fn write_pixel_rows<T: Write>(
    writer: &mut LittleEndianWriter<T>,
    bitmap: &Bitmap,
    stored_height: i32,
) -> Result<()> {
    let width = bitmap.width() as usize;
    let height = bitmap.height() as usize;
    let bottom_up = bitmap.row_order().is_bottom_up(stored_height);
    let mut row_buffer = Vec::with_capacity(width * BYTES_PER_PIXEL);
    for stored_row in 0..height {
        let y = if bottom_up {
            height - stored_row - 1
        } else {
            stored_row
        };
        let row = &bitmap.pixels()[y * width..(y + 1) * width];
        row_buffer.clear();
        row_buffer.extend(row.iter().flat_map(|pixel| pixel.to_bgr_bytes()));
        writer
            .write_bytes(&row_buffer)
            .map_err(Error::FailedToWritePixelData)?;
        writer
            .write_zeros(bitmap.padding())
            .map_err(Error::FailedToWritePixelData)?;
    }
    Ok(())
}
