use embedded_io::{ErrorType, Write};

pub trait Filesystem: ErrorType {
    type File: Write;

    /// Creates `path`, truncating an existing file.
    fn create_file(&self, path: &str) -> Result<Self::File, Self::Error>;
}
