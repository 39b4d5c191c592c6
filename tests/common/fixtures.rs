//! Image fixtures generated on the fly.

use super::temp::TempDir;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[allow(dead_code)]
impl TempDir {
    /// Solid-colour PNG.
    pub fn write_png(&self, rel: &str) -> PathBuf {
        let path = self.join(rel);
        ensure_parent(&path);
        RgbImage::from_pixel(16, 12, Rgb([30, 120, 220]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap_or_else(|e| panic!("Failed to write PNG {rel}: {e}"));
        path
    }

    /// Half-transparent PNG.
    pub fn write_transparent_png(&self, rel: &str) -> PathBuf {
        let path = self.join(rel);
        ensure_parent(&path);
        RgbaImage::from_pixel(16, 12, Rgba([30, 120, 220, 100]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap_or_else(|e| panic!("Failed to write PNG {rel}: {e}"));
        path
    }

    pub fn write_jpeg(&self, rel: &str) -> PathBuf {
        let path = self.join(rel);
        ensure_parent(&path);
        RgbImage::from_pixel(16, 12, Rgb([220, 120, 30]))
            .save_with_format(&path, ImageFormat::Jpeg)
            .unwrap_or_else(|e| panic!("Failed to write JPEG {rel}: {e}"));
        path
    }
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
}

/// RIFF....WEBP header check.
#[allow(dead_code)]
pub fn is_webp(path: &Path) -> bool {
    fs::read(path).is_ok_and(|bytes| {
        bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    })
}
