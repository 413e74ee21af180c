//! Flattening the layer stack and exporting it as an image.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::document::Document;
use crate::error::ExportError;
use crate::grid::Grid;

/// File name offered to whoever saves an export
pub const DEFAULT_EXPORT_FILE_NAME: &str = "pixel-art.png";

/// Pixels per cell used by the export button
pub const DEFAULT_EXPORT_SCALE: u32 = 10;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An encoded export ready to be written somewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded RGBA pixels
    pub bytes: Vec<u8>,
}

/// Resolves every cell to the color of the topmost visible layer that has
/// one, or empty. Hidden layers never contribute.
pub fn flatten(document: &Document) -> Grid {
    let mut raster = Grid::new(document.grid_size());
    for layer in document.layers().iter().filter(|layer| layer.is_visible()) {
        for (pos, color) in layer.grid().filled() {
            if let Some(index) = raster.index_of(pos) {
                raster.set_index(index, Some(color));
            }
        }
    }
    raster
}

/// Scales a raster up so each cell becomes a `scale × scale` block.
/// Empty cells stay fully transparent.
pub fn rasterize(raster: &Grid, scale: u32) -> Result<RgbaImage, ExportError> {
    if scale == 0 {
        return Err(ExportError::InvalidScale(scale));
    }
    let too_large = || ExportError::TooLarge {
        grid_size: raster.size(),
        scale,
    };
    let side = u32::try_from(raster.size())
        .ok()
        .and_then(|size| size.checked_mul(scale))
        .ok_or_else(too_large)?;
    // Keep the byte count addressable: side² × 4 channels
    side.checked_mul(side)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(too_large)?;

    let mut image = RgbaImage::from_pixel(side, side, TRANSPARENT);
    for (pos, color) in raster.filled() {
        let pixel = Rgba([color.r(), color.g(), color.b(), color.a()]);
        let (left, top) = (pos.x as u32 * scale, pos.y as u32 * scale);
        for y in top..top + scale {
            for x in left..left + scale {
                image.put_pixel(x, y, pixel);
            }
        }
    }
    Ok(image)
}

/// Encodes an image as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Flattens the visible layers and encodes them at `scale` pixels per cell.
pub fn export(document: &Document, scale: u32, file_name: &str) -> Result<ExportedImage, ExportError> {
    let image = rasterize(&flatten(document), scale)?;
    let bytes = encode_png(&image)?;
    log::info!(
        "Exported {}x{} image as {} ({} bytes)",
        image.width(),
        image.height(),
        file_name,
        bytes.len()
    );
    Ok(ExportedImage {
        file_name: file_name.to_owned(),
        width: image.width(),
        height: image.height(),
        bytes,
    })
}
