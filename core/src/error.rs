use core::fmt;

use crate::artifact::Path;

/// Error type for packing and artifact operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The source has no alpha channel but the classifier needs one.
    UnsupportedFormat,
    /// Width or height is zero.
    EmptyImage,
    /// A hex dump line is not exactly two hex digits.
    InvalidHex,
    IoError(embedded_io::ErrorKind),
}

impl Error {
    pub fn from_io_error(error: impl embedded_io::Error) -> Self {
        Error::IoError(error.kind())
    }
}

impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Error::IoError(kind) => *kind,
            Error::UnsupportedFormat => embedded_io::ErrorKind::Unsupported,
            Error::EmptyImage => embedded_io::ErrorKind::InvalidInput,
            Error::InvalidHex => embedded_io::ErrorKind::InvalidData,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFormat => write!(f, "source image has no alpha channel"),
            Error::EmptyImage => write!(f, "source image is empty"),
            Error::InvalidHex => write!(f, "malformed hex dump line"),
            Error::IoError(kind) => write!(f, "i/o error: {:?}", kind),
        }
    }
}

impl core::error::Error for Error {}

/// A failed artifact write and the file it was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteError {
    pub path: Path,
    pub error: Error,
}

impl WriteError {
    pub fn new(path: &Path, error: impl embedded_io::Error) -> Self {
        Self {
            path: path.clone(),
            error: Error::from_io_error(error),
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write {}: {}", self.path, self.error)
    }
}

impl core::error::Error for WriteError {}

pub type Result<T> = core::result::Result<T, Error>;
