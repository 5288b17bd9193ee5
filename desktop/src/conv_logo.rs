use std::{fmt, process::ExitCode};

use argh::FromArgs;
use log::{error, info, warn};
use logopack_core::{
    Classifier, PackOptions, SourceImage, WriteError,
    artifact::{self, DEFAULT_STEM},
    bitmap::DEFAULT_THRESHOLD,
};
use strum::IntoEnumIterator;

use crate::{image_source::DecodedImage, std_fs::StdFilesystem};

mod image_source;
mod std_fs;

#[derive(FromArgs)]
/// Convert a logo into a packed 1-bit bitmap and a hex dump
struct Args {
    /// input image path
    #[argh(option, short = 'i', default = "String::from(\"interface_logo.png\")")]
    input: String,

    /// output path without extension, `.hex` and `.bin` are appended
    #[argh(option, short = 'o', default = "String::from(DEFAULT_STEM)")]
    output: String,

    /// keep the reference placement of a row's trailing partial byte instead
    /// of aligning it and clearing the padding bits
    #[argh(switch)]
    raw_padding: bool,

    /// pixel classifier: alpha or luma
    #[argh(
        option,
        short = 'c',
        default = "Classifier::Alpha",
        from_str_fn(parse_classifier)
    )]
    classifier: Classifier,

    /// classification threshold
    #[argh(option, short = 't', default = "DEFAULT_THRESHOLD")]
    threshold: u8,
}

fn parse_classifier(value: &str) -> Result<Classifier, String> {
    value.parse().map_err(|_| {
        let names: Vec<&'static str> = Classifier::iter().map(Into::into).collect();
        format!("unknown classifier `{}`, expected one of: {}", value, names.join(", "))
    })
}

#[derive(Debug)]
enum ConvError {
    Io(std::io::Error),
    Decode(image::ImageError),
    Pack(logopack_core::Error),
    Write(WriteError),
}

impl From<std::io::Error> for ConvError {
    fn from(err: std::io::Error) -> Self {
        ConvError::Io(err)
    }
}

impl From<image::ImageError> for ConvError {
    fn from(err: image::ImageError) -> Self {
        ConvError::Decode(err)
    }
}

impl From<logopack_core::Error> for ConvError {
    fn from(err: logopack_core::Error) -> Self {
        ConvError::Pack(err)
    }
}

impl From<WriteError> for ConvError {
    fn from(err: WriteError) -> Self {
        ConvError::Write(err)
    }
}

impl fmt::Display for ConvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvError::Io(err) => write!(f, "failed to read input: {}", err),
            ConvError::Decode(err) => write!(f, "failed to decode input: {}", err),
            ConvError::Pack(err) => write!(f, "conversion failed: {}", err),
            ConvError::Write(err) => write!(f, "{}", err),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    match convert(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn convert(args: &Args) -> Result<(), ConvError> {
    let reader = image::ImageReader::open(&args.input)?.with_guessed_format()?;
    let format = reader.format();
    let image = reader.decode()?;
    info!(
        "Loaded {}: {}x{} {:?} {:?}",
        args.input,
        image.width(),
        image.height(),
        format,
        image.color()
    );

    let source = DecodedImage::from(image);
    if !source.has_alpha() {
        warn!("{} has no alpha channel", args.input);
    }

    let options = PackOptions {
        zero_pad: !args.raw_padding,
        classifier: args.classifier,
        threshold: args.threshold,
    };
    let artifacts = logopack_core::pack(&source, &options)?;
    info!(
        "Packed {} bytes ({} per row)",
        artifacts.packed.as_bytes().len(),
        artifacts.packed.stride().bytes()
    );

    let paths = artifact::artifact_paths(&args.output)?;
    let fs = StdFilesystem::new_with_base_path(".".into());
    artifact::write_artifacts(&fs, &paths, &artifacts)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
    use logopack_core::Error;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("logopack-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn default_args(dir: &std::path::Path) -> Args {
        Args {
            input: dir.join("interface_logo.png").to_string_lossy().into_owned(),
            output: dir.join(DEFAULT_STEM).to_string_lossy().into_owned(),
            raw_padding: false,
            classifier: Classifier::Alpha,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    #[test]
    fn converts_png_to_hex_and_bin() {
        let dir = scratch_dir("convert");
        let args = default_args(&dir);
        // 10x2: row 0 alternates starting opaque, row 1 is opaque in its last two pixels
        let logo = RgbaImage::from_fn(10, 2, |x, y| {
            let opaque = if y == 0 { x % 2 == 0 } else { x >= 8 };
            Rgba([0, 0, 0, if opaque { 255 } else { 0 }])
        });
        DynamicImage::ImageRgba8(logo).save(&args.input).unwrap();
        fs::write(dir.join("interface_logo.bin"), [0xEEu8; 32]).unwrap();

        convert(&args).unwrap();

        assert_eq!(
            fs::read_to_string(dir.join("interface_logo.hex")).unwrap(),
            "AA\n80\n00\nC0\n"
        );
        assert_eq!(
            fs::read(dir.join("interface_logo.bin")).unwrap(),
            vec![0x55, 0x01, 0x00, 0x03]
        );

        let raw = Args {
            raw_padding: true,
            ..default_args(&dir)
        };
        convert(&raw).unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("interface_logo.hex")).unwrap(),
            "AA\n01\n00\n03\n"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn alpha_less_input_needs_luma() {
        let dir = scratch_dir("no-alpha");
        let args = default_args(&dir);
        let logo = RgbImage::from_fn(8, 1, |x, _| {
            if x < 2 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        DynamicImage::ImageRgb8(logo).save(&args.input).unwrap();

        let err = convert(&args).unwrap_err();
        assert!(matches!(err, ConvError::Pack(Error::UnsupportedFormat)));
        assert!(!dir.join("interface_logo.hex").exists());

        let luma = Args {
            classifier: Classifier::Luma,
            ..default_args(&dir)
        };
        convert(&luma).unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("interface_logo.hex")).unwrap(),
            "C0\n"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_failure_names_the_file() {
        let dir = scratch_dir("write-failure");
        let args = Args {
            output: dir.join("missing").join("logo").to_string_lossy().into_owned(),
            ..default_args(&dir)
        };
        let logo = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 0, 255]));
        DynamicImage::ImageRgba8(logo).save(&args.input).unwrap();

        let err = convert(&args).unwrap_err();
        let ConvError::Write(write) = &err else {
            panic!("expected a write error, got {}", err);
        };
        assert!(write.path.ends_with("logo.hex"));
        assert!(err.to_string().starts_with("failed to write "));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn classifier_flag_values() {
        assert_eq!(parse_classifier("luma"), Ok(Classifier::Luma));
        assert_eq!(parse_classifier("alpha"), Ok(Classifier::Alpha));
        assert_eq!(
            parse_classifier("gray"),
            Err(String::from("unknown classifier `gray`, expected one of: alpha, luma"))
        );
    }
}
