use alloc::vec::Vec;
use embedded_io::Write;
use log::info;

use crate::{
    bitmap::{self, PackOptions, PackedBitmap},
    bits,
    error::{Error, Result, WriteError},
    fs::Filesystem,
    hexdump::HexDump,
    source::SourceImage,
};

pub type Path = heapless::String<256>;

pub const DEFAULT_STEM: &str = "interface_logo";
pub const HEX_EXTENSION: &str = "hex";
pub const BIN_EXTENSION: &str = "bin";

/// The packed bitmap and the two forms it is persisted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub packed: PackedBitmap,
    /// Rendered from `packed` before bit reversal.
    pub hex: HexDump,
    /// `packed` with every byte bit-reversed.
    pub binary: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub hex: Path,
    pub bin: Path,
}

/// Packs `image` and derives the hex dump and the bit-reversed binary.
pub fn pack(image: &impl SourceImage, options: &PackOptions) -> Result<Artifacts> {
    let packed = bitmap::pack_bits(image, options)?;
    let hex = HexDump::from_bytes(packed.as_bytes());
    let mut binary = packed.as_bytes().to_vec();
    bits::reverse_all(&mut binary);
    Ok(Artifacts {
        packed,
        hex,
        binary,
    })
}

pub fn artifact_paths(stem: &str) -> Result<ArtifactPaths> {
    let hex: Path = heapless::format!("{}.{}", stem, HEX_EXTENSION)
        .map_err(|_| Error::IoError(embedded_io::ErrorKind::InvalidInput))?;
    let bin: Path = heapless::format!("{}.{}", stem, BIN_EXTENSION)
        .map_err(|_| Error::IoError(embedded_io::ErrorKind::InvalidInput))?;
    Ok(ArtifactPaths { hex, bin })
}

/// Writes the hex dump then the binary, replacing existing files. Stops at
/// the first failure; a hex file written before a failing binary is left.
pub fn write_artifacts<F: Filesystem>(
    fs: &F,
    paths: &ArtifactPaths,
    artifacts: &Artifacts,
) -> core::result::Result<(), WriteError> {
    write_file(fs, &paths.hex, artifacts.hex.as_bytes())?;
    write_file(fs, &paths.bin, &artifacts.binary)?;
    info!(
        "Wrote {} ({} lines) and {} ({} bytes)",
        paths.hex,
        artifacts.hex.line_count(),
        paths.bin,
        artifacts.binary.len()
    );
    Ok(())
}

fn write_file<F: Filesystem>(
    fs: &F,
    path: &Path,
    data: &[u8],
) -> core::result::Result<(), WriteError> {
    let mut file = fs
        .create_file(path)
        .map_err(|e| WriteError::new(path, e))?;
    file.write_all(data).map_err(|e| WriteError::new(path, e))?;
    file.flush().map_err(|e| WriteError::new(path, e))?;
    Ok(())
}
