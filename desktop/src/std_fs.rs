use std::fs;

use embedded_io::ErrorType;
use log::{debug, info};

pub struct StdFilesystem {
    base_path: std::path::PathBuf,
}

impl StdFilesystem {
    pub fn new_with_base_path(base_path: std::path::PathBuf) -> Self {
        info!("Using StdFilesystem with base path: {:?}", base_path);
        StdFilesystem { base_path }
    }
}

impl ErrorType for StdFilesystem {
    type Error = std::io::Error;
}

impl logopack_core::fs::Filesystem for StdFilesystem {
    type File = StdFile;

    fn create_file(&self, path: &str) -> std::io::Result<StdFile> {
        let path = self.base_path.join(path);
        debug!("Creating {:?}", path);
        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(StdFile {
            file: std::io::BufWriter::new(file),
        })
    }
}

pub struct StdFile {
    file: std::io::BufWriter<std::fs::File>,
}

impl ErrorType for StdFile {
    type Error = std::io::Error;
}

impl embedded_io::Write for StdFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        use std::io::Write;
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        use std::io::Write;
        self.file.flush()
    }
}
