use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use bitmap::reader::BitmapReader;
pub use bitmap::transformer::{
    apply_gaussian_blur, rotate_clockwise, rotate_counterclockwise, Transformation,
};
pub use bitmap::writer::BitmapWriter;
pub use bitmap::{Bitmap, Pixel, RowOrder};
pub use cli::CLIParser;
pub use error::{Error, ErrorKind};

pub mod binary_stream;
pub mod bitmap;
mod cli;
mod error;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    clockwise_output_file: PathBuf,
    counterclockwise_output_file: PathBuf,
    blur_output_file: PathBuf,
    row_order: RowOrder,
}

impl Arguments {
    /// Output paths in the order the variants are produced.
    fn outputs(&self) -> [(Transformation, &Path); 3] {
        [
            (Transformation::RotateClockwise, self.clockwise_output_file.as_path()),
            (
                Transformation::RotateCounterclockwise,
                self.counterclockwise_output_file.as_path(),
            ),
            (Transformation::GaussianBlur, self.blur_output_file.as_path()),
        ]
    }
}

/// Result of deriving and writing one variant of the input bitmap.
#[derive(Debug)]
pub struct TransformationOutcome {
    pub transformation: Transformation,
    pub output_file: PathBuf,
    pub result: Result<()>,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Load a 24-bit bitmap, treating its pixel rows as stored bottom-up.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Bitmap> {
    load_with_row_order(path, RowOrder::default())
}

pub fn load_with_row_order<P: AsRef<Path>>(path: P, row_order: RowOrder) -> Result<Bitmap> {
    let input_file = open_input_file(path.as_ref())?;
    let mut reader = BitmapReader::new(BufReader::new(input_file)).with_row_order(row_order);
    reader.read_bitmap()
}

/// Write a bitmap to `path`, replacing any existing file.
///
/// An empty bitmap is rejected before the file is created.
pub fn write<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> Result<()> {
    bitmap::writer::check_not_empty(bitmap)?;
    let output_file = open_output_file(path.as_ref())?;
    let mut output_file_writer = BufWriter::new(&output_file);
    let mut writer = BitmapWriter::new(&mut output_file_writer, bitmap);
    writer.write_bitmap()
}

/// Load the input once and write a rotated and a blurred variant of it.
///
/// Only a failure to load is returned as an error. Each variant is
/// written independently, so one failed write does not stop the others.
pub fn transform_bitmap(arguments: &Arguments) -> Result<Vec<TransformationOutcome>> {
    let original = load_with_row_order(&arguments.input_file, arguments.row_order)?;
    let outcomes = arguments
        .outputs()
        .into_iter()
        .map(|(transformation, output_file)| {
            let mut variant = original.clone();
            transformation.apply(&mut variant);
            let result = write(output_file, &variant);
            if let Err(e) = &result {
                log::error!(
                    "Writing {} to {} failed: {}",
                    transformation,
                    output_file.display(),
                    e
                );
            }
            TransformationOutcome {
                transformation,
                output_file: output_file.to_path_buf(),
                result,
            }
        })
        .collect();
    Ok(outcomes)
}
