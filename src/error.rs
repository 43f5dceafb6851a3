use std::fmt::Display;

/// Coarse classification of [`Error`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// file cannot be opened, created, or fully read/written
    Io,
    /// file content violates the supported bitmap layout
    Format,
    /// operation attempted on a bitmap that cannot support it
    Value,
}

#[derive(Debug)]
pub enum Error {
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadHeader(&'static str, std::io::Error),
    FailedToSeekToPixelData(u32, std::io::Error),
    FailedToReadPixelData(std::io::Error),
    TruncatedPixelData { expected: usize, actual: usize },
    FailedToWriteHeader(&'static str, std::io::Error),
    FailedToWritePixelData(std::io::Error),
    BadSignature(u16),
    UnsupportedBitDepth(u16),
    NegativeWidth(i32),
    ImageTooLarge(u32, u32),
    EmptyBuffer,
    MismatchOfPixelCountAndDimensions { expected: usize, actual: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnableToOpenInputFileForReading(..)
            | Self::UnableToOpenOutputFileForWriting(..)
            | Self::FailedToReadHeader(..)
            | Self::FailedToSeekToPixelData(..)
            | Self::FailedToReadPixelData(..)
            | Self::TruncatedPixelData { .. }
            | Self::FailedToWriteHeader(..)
            | Self::FailedToWritePixelData(..) => ErrorKind::Io,
            Self::BadSignature(_)
            | Self::UnsupportedBitDepth(_)
            | Self::NegativeWidth(_)
            | Self::ImageTooLarge(..) => ErrorKind::Format,
            Self::EmptyBuffer | Self::MismatchOfPixelCountAndDimensions { .. } => {
                ErrorKind::Value
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadHeader(header_name, error) => {
                write!(f, "Failed to read {}: {}", header_name, error)
            }
            Self::FailedToSeekToPixelData(offset, error) => {
                write!(
                    f,
                    "Failed to seek to pixel data at offset {}: {}",
                    offset, error
                )
            }
            Self::FailedToReadPixelData(error) => {
                write!(f, "Failed to read pixel data: {}", error)
            }
            Self::TruncatedPixelData { expected, actual } => {
                write!(
                    f,
                    "Truncated pixel data. Expected {} bytes, but only {} are available.",
                    expected, actual
                )
            }
            Self::FailedToWriteHeader(header_name, error) => {
                write!(f, "Failed to write {}: {}", header_name, error)
            }
            Self::FailedToWritePixelData(error) => {
                write!(f, "Failed to write pixel data: {}", error)
            }
            Self::BadSignature(signature) => {
                write!(
                    f,
                    "Not a bitmap file. Expected signature 0x4D42, but got 0x{:04X}.",
                    signature
                )
            }
            Self::UnsupportedBitDepth(bits_per_pixel) => {
                write!(
                    f,
                    "Only 24-bit bitmaps are supported, but file uses {} bits per pixel",
                    bits_per_pixel
                )
            }
            Self::NegativeWidth(width) => {
                write!(f, "Image width must not be negative, but was {}", width)
            }
            Self::ImageTooLarge(width, height) => {
                write!(
                    f,
                    "Image of {}x{} pixels exceeds the limits of the bitmap format",
                    width, height
                )
            }
            Self::EmptyBuffer => write!(f, "No image data to write"),
            Self::MismatchOfPixelCountAndDimensions { expected, actual } => {
                write!(
                    f,
                    "Number of pixels does not match the dimensions. Expected {}, but got {}.",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadHeader(_, error)
            | Self::FailedToSeekToPixelData(_, error)
            | Self::FailedToReadPixelData(error)
            | Self::FailedToWriteHeader(_, error)
            | Self::FailedToWritePixelData(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Error, ErrorKind};

    #[test]
    fn classify_error_kinds() {
        let not_found = || std::io::Error::from(std::io::ErrorKind::NotFound);
        assert_eq!(
            Error::UnableToOpenInputFileForReading("a.bmp".to_owned(), not_found()).kind(),
            ErrorKind::Io
        );
        assert_eq!(
            Error::TruncatedPixelData {
                expected: 12,
                actual: 3
            }
            .kind(),
            ErrorKind::Io
        );
        assert_eq!(Error::BadSignature(0x1234).kind(), ErrorKind::Format);
        assert_eq!(Error::UnsupportedBitDepth(32).kind(), ErrorKind::Format);
        assert_eq!(Error::EmptyBuffer.kind(), ErrorKind::Value);
    }

    #[test]
    fn display_bad_signature_in_hex() {
        let message = Error::BadSignature(0x5089).to_string();
        assert!(message.contains("0x5089"), "unexpected message: {}", message);
    }
}
