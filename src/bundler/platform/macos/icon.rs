//! ICNS icon creation for macOS applications.

use crate::bundler::error::{Error, Result};
use crate::bundler::resources::icons::load_icon;
use icns::{IconFamily, IconType, Image as IconsImage};
use std::path::Path;

/// ICNS slots, smallest first: type, pixel size, label.
const ICON_TYPES: [(IconType, u32, &str); 11] = [
    (IconType::RGBA32_16x16, 16, "16x16"),
    (IconType::RGBA32_16x16_2x, 32, "16x16@2x"),
    (IconType::RGBA32_32x32, 32, "32x32"),
    (IconType::RGBA32_32x32_2x, 64, "32x32@2x"),
    (IconType::RGBA32_64x64, 64, "64x64"),
    (IconType::RGBA32_128x128, 128, "128x128"),
    (IconType::RGBA32_128x128_2x, 256, "128x128@2x"),
    (IconType::RGBA32_256x256, 256, "256x256"),
    (IconType::RGBA32_256x256_2x, 512, "256x256@2x"),
    (IconType::RGBA32_512x512, 512, "512x512"),
    (IconType::RGBA32_512x512_2x, 1024, "512x512@2x"),
];

/// Turns an image file into icon container bytes.
pub trait IconConverter {
    /// Converts the image at `png_path`.
    ///
    /// # Errors
    ///
    /// [`Error::ImageFormat`] when the input cannot be decoded.
    fn convert(&self, png_path: &Path) -> Result<Vec<u8>>;
}

/// Converts a single PNG into a multi-resolution `.icns`.
///
/// Every slot up to the source's size is filled; sources smaller than 16px
/// are scaled up into the 16x16 slot alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcnsConverter;

impl IconConverter for IcnsConverter {
    fn convert(&self, png_path: &Path) -> Result<Vec<u8>> {
        let icon = load_icon(png_path)?;
        let largest = icon.largest_side();

        let mut selected: Vec<_> = ICON_TYPES
            .iter()
            .filter(|(_, size, _)| *size <= largest)
            .collect();
        if selected.is_empty() {
            selected.push(&ICON_TYPES[0]);
        }

        let mut family = IconFamily::new();
        for (icon_type, size, name) in selected {
            log::debug!("Adding {} from {}", name, icon.path.display());

            let rgba = icon.resized(*size);
            let icns_img =
                IconsImage::from_data(icns::PixelFormat::RGBA, *size, *size, rgba.into_raw())
                    .map_err(|e| {
                        Error::GenericError(format!("creating ICNS image for {}: {}", name, e))
                    })?;

            family
                .add_icon_with_type(&icns_img, *icon_type)
                .map_err(|e| {
                    Error::GenericError(format!("adding {} to icon family: {}", name, e))
                })?;
        }

        let mut bytes = Vec::new();
        family
            .write(&mut bytes)
            .map_err(|e| Error::GenericError(format!("writing ICNS data: {}", e)))?;

        log::info!(
            "Converted {} to ICNS ({} bytes)",
            png_path.display(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// File name the icon gets inside `Contents/Resources`: `<source name>.icns`.
pub fn icns_file_name(png_path: &Path) -> Result<String> {
    let Some(name) = png_path.file_name() else {
        crate::bail!("{} has no file name", png_path.display());
    };
    Ok(format!("{}.icns", name.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icns_file_name_keeps_png_suffix() {
        assert_eq!(
            icns_file_name(Path::new("media/icon.png")).ok(),
            Some("icon.png.icns".to_string())
        );
    }

    #[test]
    fn test_convert_produces_icns_family() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("icon.png");
        image::RgbaImage::from_pixel(64, 64, image::Rgba([200, 40, 40, 255]))
            .save(&path)
            .expect("save png");

        let bytes = IcnsConverter.convert(&path).expect("convert");
        assert_eq!(&bytes[..4], b"icns");

        let family = IconFamily::read(std::io::Cursor::new(bytes)).expect("read back");
        assert!(family.has_icon_with_type(IconType::RGBA32_64x64));
        assert!(!family.has_icon_with_type(IconType::RGBA32_128x128));
    }

    #[test]
    fn test_convert_tiny_icon_fills_smallest_slot() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("dot.png");
        image::RgbaImage::new(4, 4).save(&path).expect("save png");

        let bytes = IcnsConverter.convert(&path).expect("convert");
        let family = IconFamily::read(std::io::Cursor::new(bytes)).expect("read back");
        assert!(family.has_icon_with_type(IconType::RGBA32_16x16));
    }
}
