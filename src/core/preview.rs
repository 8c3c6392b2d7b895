// src/core/preview.rs

use tracing::{debug, warn};

/// Widest thumbnail we build, in terminal columns (one pixel per column).
pub const PREVIEW_MAX_WIDTH: u32 = 72;
/// Tallest thumbnail we build, in pixel rows. The preview widget paints two
/// pixel rows per terminal row with the upper-half-block glyph.
pub const PREVIEW_MAX_HEIGHT: u32 = 56;

/// What the preview pane shows for a settled upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePreview {
    /// The submitted bytes decoded as an image thumbnail.
    Image(PreviewImage),
    /// The bytes were not a decodable image; show metadata instead.
    Info { name: String, byte_count: usize },
}

/// A small RGB thumbnail prepared for half-block terminal rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub name: String,
    /// Dimensions of the original image, for the caption line.
    pub source_width: u32,
    pub source_height: u32,
    /// Dimensions of the downscaled thumbnail.
    pub width: u32,
    pub height: u32,
    /// Row-major `width * height` RGB triples.
    pixels: Vec<(u8, u8, u8)>,
}

impl PreviewImage {
    /// Pixel at `(x, y)` in thumbnail coordinates, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

/// Turns the exact bytes that were uploaded into something the preview pane
/// can draw. Decode failures are not upload failures: the server may well
/// accept formats this client cannot decode, so we degrade to metadata.
pub fn build_preview(name: &str, bytes: &[u8]) -> FilePreview {
    match image::load_from_memory(bytes) {
        Ok(decoded) => {
            let (source_width, source_height) = (decoded.width(), decoded.height());
            let thumbnail = decoded
                .thumbnail(PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT)
                .to_rgb8();
            let (width, height) = (thumbnail.width(), thumbnail.height());
            let pixels = thumbnail
                .pixels()
                .map(|p| (p.0[0], p.0[1], p.0[2]))
                .collect();
            debug!(
                name,
                source_width, source_height, width, height, "built preview thumbnail"
            );
            FilePreview::Image(PreviewImage {
                name: name.to_string(),
                source_width,
                source_height,
                width,
                height,
                pixels,
            })
        }
        Err(e) => {
            warn!(name, error = %e, "submitted file is not a decodable image");
            FilePreview::Info {
                name: name.to_string(),
                byte_count: bytes.len(),
            }
        }
    }
}
