use image::{DynamicImage, RgbaImage};
use logopack_core::{SourceImage, source::Rgba};

/// A decoded image expanded to RGBA, remembering whether the file had alpha.
pub struct DecodedImage {
    pixels: RgbaImage,
    has_alpha: bool,
}

impl From<DynamicImage> for DecodedImage {
    fn from(image: DynamicImage) -> Self {
        let has_alpha = image.color().has_alpha();
        Self {
            pixels: image.into_rgba8(),
            has_alpha,
        }
    }
}

impl SourceImage for DecodedImage {
    fn width(&self) -> usize {
        self.pixels.width() as usize
    }

    fn height(&self) -> usize {
        self.pixels.height() as usize
    }

    fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels.get_pixel(x as u32, y as u32).0
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba as RgbaPixel};
    use logopack_core::{Classifier, Error, PackOptions, pack};

    use super::*;

    fn alternating_logo() -> DynamicImage {
        let image = RgbaImage::from_fn(8, 1, |x, _| {
            let alpha = if x % 2 == 0 { 255 } else { 0 };
            RgbaPixel([0x20, 0x40, 0x60, alpha])
        });
        DynamicImage::ImageRgba8(image)
    }

    #[test]
    fn rgba_image_keeps_alpha() {
        let source = DecodedImage::from(alternating_logo());
        assert!(source.has_alpha());
        assert_eq!((source.width(), source.height()), (8, 1));
        assert_eq!(source.pixel(1, 0), [0x20, 0x40, 0x60, 0]);

        let artifacts = pack(&source, &PackOptions::default()).unwrap();
        assert_eq!(artifacts.hex.as_str(), "AA\n");
        assert_eq!(artifacts.binary, vec![0x55]);
    }

    #[test]
    fn rgb_image_has_no_alpha() {
        let image = RgbImage::from_fn(10, 2, |x, _| {
            if x < 4 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        let source = DecodedImage::from(DynamicImage::ImageRgb8(image));
        assert!(!source.has_alpha());
        assert_eq!(
            pack(&source, &PackOptions::default()),
            Err(Error::UnsupportedFormat)
        );

        let options = PackOptions {
            classifier: Classifier::Luma,
            ..PackOptions::default()
        };
        let artifacts = pack(&source, &options).unwrap();
        assert_eq!(artifacts.packed.as_bytes(), &[0xF0, 0x00, 0xF0, 0x00]);
    }

    #[test]
    fn png_round_trip_through_decoder() {
        let mut encoded = std::io::Cursor::new(Vec::new());
        alternating_logo()
            .write_to(&mut encoded, image::ImageFormat::Png)
            .unwrap();
        let decoded = image::load_from_memory(encoded.get_ref()).unwrap();
        let source = DecodedImage::from(decoded);
        let artifacts = pack(&source, &PackOptions::default()).unwrap();
        assert_eq!(artifacts.packed.as_bytes(), &[0xAA]);
    }
}
