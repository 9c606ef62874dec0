use std::path::{Path, PathBuf};

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

/// Decode an image file into egui's RGBA format.
pub fn decode_verse_image(path: &Path) -> Result<ColorImage, image::ImageError> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        image.as_raw(),
    ))
}

/// Texture for the verse currently on screen, reloaded when the path changes.
#[derive(Default)]
pub struct VerseImageCache {
    path: Option<PathBuf>,
    texture: Option<TextureHandle>,
    error: Option<String>,
}

impl VerseImageCache {
    pub fn texture_for(&mut self, ctx: &egui::Context, path: &Path) -> Option<&TextureHandle> {
        if self.path.as_deref() != Some(path) {
            self.path = Some(path.to_path_buf());
            self.texture = None;
            self.error = None;
            match decode_verse_image(path) {
                Ok(image) => {
                    self.texture =
                        Some(ctx.load_texture("verse-image", image, TextureOptions::LINEAR));
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "Failed to load verse image: {err}");
                    self.error = Some(format!("Image unavailable: {err}"));
                }
            }
        }
        self.texture.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn decodes_png_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("1.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let decoded = decode_verse_image(&path).unwrap();
        assert_eq!(decoded.size, [3, 2]);
    }

    #[test]
    fn missing_image_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(decode_verse_image(&dir.path().join("missing.png")).is_err());
    }
}
