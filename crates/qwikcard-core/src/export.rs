//! Scannable code export: SVG in, fixed-size PNG with a solid background out.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};
use thiserror::Error;

use crate::color::HexColor;

/// Edge length of the exported square, in pixels.
pub const EXPORT_SIZE: u32 = 256;

/// Stem used when the profile has no display name.
pub const DEFAULT_STEM: &str = "qrcode";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not parse code image: {0}")]
    InvalidSvg(#[from] usvg::Error),
    #[error("could not allocate a {0}x{0} raster surface")]
    Surface(u32),
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct ExportRequest<'a> {
    /// Serialized vector image of the code.
    pub svg: &'a str,
    /// Painted under the code; shows wherever the vector is transparent.
    pub background: HexColor,
    /// File stem, usually the profile display name.
    pub stem: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// Write the PNG into `dir` under its file name and return the full path.
    pub fn save_into(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.png).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = self.png.len(), "code image saved");
        Ok(path)
    }
}

#[derive(Clone, Debug)]
pub struct CodeExporter {
    default_stem: String,
}

impl Default for CodeExporter {
    fn default() -> Self {
        Self::new(DEFAULT_STEM)
    }
}

impl CodeExporter {
    pub fn new(default_stem: impl Into<String>) -> Self {
        let default_stem = default_stem.into();
        let default_stem = if default_stem.trim().is_empty() {
            DEFAULT_STEM.to_string()
        } else {
            default_stem
        };
        Self { default_stem }
    }

    /// `<name>.png`, falling back to the default stem for a blank name.
    pub fn file_name(&self, name: &str) -> String {
        let stem = sanitize_stem(name);
        if stem.is_empty() {
            format!("{}.png", sanitize_stem(&self.default_stem))
        } else {
            format!("{stem}.png")
        }
    }

    pub fn export(&self, request: &ExportRequest<'_>) -> Result<ExportedImage, ExportError> {
        let png = rasterize(request.svg, request.background)?;
        let file_name = self.file_name(request.stem);
        tracing::debug!(%file_name, background = %request.background, "code image rasterized");
        Ok(ExportedImage {
            file_name,
            width: EXPORT_SIZE,
            height: EXPORT_SIZE,
            png,
        })
    }
}

fn sanitize_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}

/// Render `svg` scaled onto an `EXPORT_SIZE` square pre-filled with
/// `background`, then encode it as PNG.
pub fn rasterize(svg: &str, background: HexColor) -> Result<Vec<u8>, ExportError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;
    let mut pixmap =
        tiny_skia::Pixmap::new(EXPORT_SIZE, EXPORT_SIZE).ok_or(ExportError::Surface(EXPORT_SIZE))?;
    pixmap.fill(tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        255,
    ));

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        EXPORT_SIZE as f32 / size.width(),
        EXPORT_SIZE as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity((EXPORT_SIZE * EXPORT_SIZE * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let image = RgbaImage::from_raw(EXPORT_SIZE, EXPORT_SIZE, rgba)
        .ok_or(ExportError::Surface(EXPORT_SIZE))?;

    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
