//! # Output Module
//!
//! Writes rendered 8-bit RGB images to disk. The encoder is picked from the
//! file extension:
//! - `.png`: lossless PNG
//! - `.jpg` / `.jpeg`: baseline JPEG at the requested quality

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use log::{debug, info};

use crate::error::{Error, Result};

/// Highest JPEG quality accepted by the encoder.
pub const MAX_QUALITY: u8 = 100;

/// Encoder chosen for an output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG file
    Png,
    /// JPEG file
    Jpeg,
}

impl OutputFormat {
    /// Format implied by the extension of `path`, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("jpg") | Some("jpeg") => Ok(Self::Jpeg),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Save `image` at `path`; `quality` (1..=100) only applies to JPEG.
pub fn save_image(image: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    let image_error = |source| Error::ImageWrite {
        path: path.to_path_buf(),
        source,
    };

    match format {
        OutputFormat::Png => image
            .save_with_format(path, ImageFormat::Png)
            .map_err(image_error)?,
        OutputFormat::Jpeg => {
            let quality = quality.clamp(1, MAX_QUALITY);
            debug!("Encoding JPEG at quality {}", quality);
            let writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(writer, quality);
            image.write_with_encoder(encoder).map_err(image_error)?;
        }
    }

    info!("Image saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker() -> RgbImage {
        RgbImage::from_fn(8, 4, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.JPG")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.jpeg")).unwrap(), OutputFormat::Jpeg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.exr")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_png_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = checker();
        save_image(&image, &path, 95).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_jpeg_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        save_image(&checker(), &path, 95).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 4));
    }

    #[test]
    fn test_unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        assert!(save_image(&checker(), &path, 95).is_err());
        assert!(!path.exists());
    }
}
