#![no_std]

pub mod artifact;
pub mod bitmap;
pub mod bits;
pub mod error;
pub mod fs;
pub mod hexdump;
pub mod source;


extern crate alloc;

pub use artifact::{Artifacts, pack, write_artifacts};
pub use bitmap::{Classifier, PackOptions, PackedBitmap, Stride};
pub use bits::reverse_bits;
pub use error::{Error, WriteError};
pub use hexdump::HexDump;
pub use source::{RgbaRaster, SourceImage};
