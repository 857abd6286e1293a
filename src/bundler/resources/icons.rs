//! Source icon loading for ICNS conversion.
//!
//! A bundle icon starts life as a single PNG. It is decoded once, then
//! resized to every ICNS slot it can fill without upscaling.
//!
//! # Best Practices
//!
//! - Use a square PNG (1:1 aspect ratio); other shapes are stretched
//! - Provide at least 1024x1024 so every Retina slot is populated
//! - Use 32-bit RGBA with transparency

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// A decoded source icon.
#[derive(Debug, Clone)]
pub struct SourceIcon {
    /// Path the icon was read from.
    pub path: PathBuf,
    image: image::DynamicImage,
}

impl SourceIcon {
    /// Icon width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Icon height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns whether this icon is square (width == height).
    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    /// The larger of width and height.
    pub fn largest_side(&self) -> u32 {
        self.width().max(self.height())
    }

    /// Resizes to exact square dimensions.
    ///
    /// Uses Lanczos3 filtering which gives the best quality for downscaling.
    pub fn resized(&self, size: u32) -> image::RgbaImage {
        self.image
            .resize_exact(size, size, image::imageops::FilterType::Lanczos3)
            .to_rgba8()
    }
}

/// Reads and decodes an icon.
///
/// # Errors
///
/// - [`Error::Fs`] if the file cannot be read
/// - [`Error::ImageFormat`] if the bytes are not a decodable image
pub fn load_icon(path: &Path) -> Result<SourceIcon> {
    let bytes = std::fs::read(path).fs_context("reading icon", path)?;
    let image = image::load_from_memory(&bytes).map_err(|source| Error::ImageFormat {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "Loaded icon: {}x{} from {}",
        image.width(),
        image.height(),
        path.display()
    );

    let icon = SourceIcon {
        path: path.to_path_buf(),
        image,
    };
    if !icon.is_square() {
        log::warn!(
            "icon {} is {}x{}; it will be stretched to a square",
            path.display(),
            icon.width(),
            icon.height()
        );
    }
    Ok(icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_icon_dimensions() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("wide.png");
        image::RgbaImage::new(48, 32).save(&path).expect("save png");

        let icon = load_icon(&path).expect("load");
        assert_eq!(icon.largest_side(), 48);
        assert!(!icon.is_square());
        assert_eq!(icon.resized(16).dimensions(), (16, 16));
    }

    #[test]
    fn test_load_icon_rejects_non_image() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("icon.png");
        std::fs::write(&path, "definitely not a png").expect("write");

        assert!(matches!(load_icon(&path), Err(Error::ImageFormat { .. })));
    }

    #[test]
    fn test_load_icon_missing_file() {
        let err = load_icon(Path::new("/nonexistent/icon.png")).unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
    }
}
