use alloc::{vec, vec::Vec};
use core::ops::Range;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{OriginDimensions, Size},
};
use log::{debug, trace};

use crate::{
    bits::reverse_bits,
    error::{Error, Result},
    source::{Rgba, SourceImage},
};

pub const DEFAULT_THRESHOLD: u8 = 128;

/// Bytes per packed row: one bit per pixel, rounded up to a whole byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride(usize);

impl Stride {
    pub const fn for_width(width: usize) -> Self {
        Self(width.div_ceil(8))
    }

    pub const fn bytes(self) -> usize {
        self.0
    }

    /// Unused bits at the end of each row for an image `width` pixels wide.
    pub const fn padding_bits(self, width: usize) -> usize {
        self.0 * 8 - width
    }

    pub const fn row_range(self, row: usize) -> Range<usize> {
        row * self.0..(row + 1) * self.0
    }
}

/// Decides which pixels become set bits.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Classifier {
    /// Set when alpha >= threshold.
    #[default]
    Alpha,
    /// Set when the pixel is dark: r + g + b < threshold * 3.
    Luma,
}

impl Classifier {
    pub fn needs_alpha(self) -> bool {
        matches!(self, Classifier::Alpha)
    }

    pub fn classify(self, pixel: Rgba, threshold: u8) -> BinaryColor {
        let [r, g, b, a] = pixel;
        let set = match self {
            Classifier::Alpha => a >= threshold,
            Classifier::Luma => (r as u16 + g as u16 + b as u16) < threshold as u16 * 3,
        };
        BinaryColor::from(set)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Align a partial trailing group with the full groups and clear the
    /// padding bits. When false the partial group is written the way the
    /// reference converter flushed it: pixel `i` of the group in bit `i`.
    pub zero_pad: bool,
    pub classifier: Classifier,
    pub threshold: u8,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            zero_pad: true,
            classifier: Classifier::Alpha,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// One bit per pixel, row-major, rows byte aligned, MSB first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width: usize,
    height: usize,
    stride: Stride,
    zero_pad: bool,
    data: Vec<u8>,
}

impl PackedBitmap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> Stride {
        self.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[self.stride.row_range(y)]
    }

    /// Reads a pixel back out of the packed rows. Out of range reads are Off.
    pub fn pixel(&self, x: usize, y: usize) -> BinaryColor {
        if x >= self.width || y >= self.height {
            return BinaryColor::Off;
        }
        let byte = self.row(y)[x / 8];
        let group_start = x - x % 8;
        let group_len = (self.width - group_start).min(8);
        let shift = if group_len < 8 && !self.zero_pad {
            x % 8
        } else {
            7 - x % 8
        };
        BinaryColor::from(byte >> shift & 1 != 0)
    }
}

impl OriginDimensions for PackedBitmap {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

/// Packs `image` into one bit per pixel.
pub fn pack_bits(image: &impl SourceImage, options: &PackOptions) -> Result<PackedBitmap> {
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }
    if options.classifier.needs_alpha() && !image.has_alpha() {
        return Err(Error::UnsupportedFormat);
    }

    let stride = Stride::for_width(width);
    let mut data = vec![0u8; stride.bytes() * height];
    debug!(
        "Packing {}x{} image, stride={} bytes, padding={} bits",
        width,
        height,
        stride.bytes(),
        stride.padding_bits(width)
    );

    for y in 0..height {
        let row = &mut data[stride.row_range(y)];
        let mut byte_index = 0;
        let mut pixels = 0u8;
        let mut count = 0u32;
        for x in 0..width {
            let color = options.classifier.classify(image.pixel(x, y), options.threshold);
            pixels = pixels << 1 | color.is_on() as u8;
            count += 1;
            if count == 8 {
                row[byte_index] = pixels;
                byte_index += 1;
                pixels = 0;
                count = 0;
            }
        }
        if count != 0 {
            let aligned = pixels << (8 - count);
            row[byte_index] = if options.zero_pad {
                aligned
            } else {
                reverse_bits(aligned)
            };
        }
        trace!("Row {}: {:02X?}", y, row);
    }

    Ok(PackedBitmap {
        width,
        height,
        stride,
        zero_pad: options.zero_pad,
        data,
    })
}
