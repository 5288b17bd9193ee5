use alloc::{vec, vec::Vec};

/// Straight (non-premultiplied) RGBA pixel.
pub type Rgba = [u8; 4];

/// A decoded raster the packer reads pixel by pixel.
pub trait SourceImage {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Pixel at column `x`, row `y`. Sources without alpha report 255.
    fn pixel(&self, x: usize, y: usize) -> Rgba;
    fn has_alpha(&self) -> bool;
}

/// Owned row-major RGBA raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaRaster {
    width: usize,
    height: usize,
    has_alpha: bool,
    data: Vec<u8>,
}

impl RgbaRaster {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: usize, height: usize, pixel: Rgba) -> Self {
        let mut data = vec![0u8; width * height * 4];
        for chunk in data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
        Self {
            width,
            height,
            has_alpha: true,
            data,
        }
    }

    /// Wraps tightly packed RGBA bytes. Returns `None` if the length does
    /// not match the dimensions.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            has_alpha: true,
            data,
        })
    }

    /// Wraps tightly packed RGB bytes, expanding them to opaque RGBA.
    pub fn from_rgb(width: usize, height: usize, data: &[u8]) -> Option<Self> {
        if data.len() != width * height * 3 {
            return None;
        }
        let data = data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xFF])
            .collect();
        Some(Self {
            width,
            height,
            has_alpha: false,
            data,
        })
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = (y * self.width + x) * 4;
        self.data[offset..offset + 4].copy_from_slice(&pixel);
    }
}

impl SourceImage for RgbaRaster {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, x: usize, y: usize) -> Rgba {
        let offset = (y * self.width + x) * 4;
        let mut pixel = [0u8; 4];
        pixel.copy_from_slice(&self.data[offset..offset + 4]);
        pixel
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }
}
