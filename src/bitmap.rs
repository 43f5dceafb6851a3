use clap::builder::PossibleValue;
use clap::ValueEnum;

use crate::error::Error;
use crate::Result;
use header::{FileHeader, InfoHeader};

pub mod header;
pub mod reader;
pub mod transformer;
pub mod writer;

pub const BYTES_PER_PIXEL: usize = 3;
const ROW_ALIGNMENT: usize = 4;

/// A single 24-bit dot, stored in on-disk channel order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Pixel {
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { blue, green, red }
    }

    pub const fn from_bgr_bytes(bytes: [u8; BYTES_PER_PIXEL]) -> Self {
        Self {
            blue: bytes[0],
            green: bytes[1],
            red: bytes[2],
        }
    }

    pub const fn to_bgr_bytes(self) -> [u8; BYTES_PER_PIXEL] {
        [self.blue, self.green, self.red]
    }
}

/// How rows of the pixel array are ordered on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// rows are always stored bottom-up; the sign of the stored height
    /// is carried through to the output but otherwise ignored
    #[default]
    AlwaysBottomUp,
    /// a negative stored height marks top-down storage
    FollowHeaderSign,
}

impl RowOrder {
    pub fn is_bottom_up(&self, stored_height: i32) -> bool {
        match self {
            Self::AlwaysBottomUp => true,
            Self::FollowHeaderSign => stored_height >= 0,
        }
    }
}

impl ValueEnum for RowOrder {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::AlwaysBottomUp, Self::FollowHeaderSign]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::AlwaysBottomUp => Some(PossibleValue::new("BottomUp")),
            Self::FollowHeaderSign => Some(PossibleValue::new("HeaderSign")),
        }
    }
}

/// Number of bytes one row of `width` pixels occupies on disk, padding included.
///
/// Returns None if the value does not fit into `usize`.
pub fn row_stride_for(width: u32) -> Option<usize> {
    let unpadded = usize::try_from(width).ok()?.checked_mul(BYTES_PER_PIXEL)?;
    let padded = unpadded.checked_add(ROW_ALIGNMENT - 1)?;
    Some(padded / ROW_ALIGNMENT * ROW_ALIGNMENT)
}

/// A decoded 24-bit bitmap.
///
/// Pixels are kept row by row from the top of the image down, regardless
/// of the row order used by the file they were loaded from. The headers of
/// the source file are retained so that re-encoding keeps their fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bitmap {
    file_header: FileHeader,
    info_header: InfoHeader,
    row_order: RowOrder,
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
    row_stride: usize,
    padding: usize,
}

impl Bitmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bitmap from top-down, row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::MismatchOfPixelCountAndDimensions {
                expected,
                actual: pixels.len(),
            });
        }
        let mut bitmap = Self::new();
        bitmap.replace_pixels(width, height, pixels);
        Ok(bitmap)
    }

    pub(crate) fn from_decoded_parts(
        file_header: FileHeader,
        info_header: InfoHeader,
        row_order: RowOrder,
        width: u32,
        height: u32,
        pixels: Vec<Pixel>,
    ) -> Self {
        let mut bitmap = Self {
            file_header,
            info_header,
            row_order,
            pixels,
            width,
            height,
            row_stride: 0,
            padding: 0,
        };
        bitmap.calculate_row_stride();
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at column `x` of row `y`, counted from the top left corner.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn clear(&mut self) {
        self.pixels.clear();
        self.width = 0;
        self.height = 0;
        self.row_stride = 0;
        self.padding = 0;
    }

    /// Height as stored in the info header: the current height carrying
    /// the sign of the height the bitmap was loaded with.
    pub(crate) fn stored_height(&self) -> i32 {
        let height = self.height as i32;
        if self.info_header.height < 0 {
            -height
        } else {
            height
        }
    }

    /// Swap in a new pixel grid, keeping every derived field consistent.
    fn replace_pixels(&mut self, width: u32, height: u32, pixels: Vec<Pixel>) {
        self.width = width;
        self.height = height;
        self.pixels = pixels;
        self.calculate_row_stride();
        self.info_header.width = self.width as i32;
        self.info_header.height = self.stored_height();
    }

    fn calculate_row_stride(&mut self) {
        let unpadded = self.width as usize * BYTES_PER_PIXEL;
        self.row_stride = row_stride_for(self.width).unwrap_or(unpadded);
        self.padding = self.row_stride - unpadded;
    }
}

/// Both dimensions have to be representable in the signed header fields.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(Error::ImageTooLarge(width, height));
    }
    Ok(())
}
