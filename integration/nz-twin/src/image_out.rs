//! PNG coverage dumps.

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use nz_twin_core::{TileOrigin, PATCH_SIZE, TILE_SIZE};

use crate::error::TwinError;
use crate::twin::TriangleResult;

const BACKGROUND: Rgb<u8> = Rgb([24, 24, 28]);
/// Pixels claimed by more than one triangle.
const OVERLAP: Rgb<u8> = Rgb([255, 255, 255]);

const PALETTE: [Rgb<u8>; 8] = [
    Rgb([230, 80, 70]),
    Rgb([90, 190, 90]),
    Rgb([80, 130, 230]),
    Rgb([230, 190, 60]),
    Rgb([170, 90, 210]),
    Rgb([60, 200, 200]),
    Rgb([240, 140, 50]),
    Rgb([150, 150, 150]),
];

fn darken(Rgb([r, g, b]): Rgb<u8>) -> Rgb<u8> {
    Rgb([r / 2 + 8, g / 2 + 8, b / 2 + 8])
}

/// Render every result that targets `tile`, one colour per triangle.
///
/// Each rasterized pixel becomes a `scale`x`scale` block. At scales of 4 and
/// up, patch boundaries are drawn as darker lines.
pub fn tile_image(results: &[TriangleResult], tile: TileOrigin, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let side = TILE_SIZE as u32 * scale;
    let patch_px = PATCH_SIZE as u32 * scale;
    let in_tile: Vec<(usize, &TriangleResult)> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.job.tile == tile)
        .collect();

    ImageBuffer::from_fn(side, side, |px, py| {
        let (x, y) = ((px / scale) as usize, (py / scale) as usize);
        let mut owners = in_tile.iter().filter(|(_, r)| r.coverage.get(x, y));
        let colour = match (owners.next(), owners.next()) {
            (None, _) => BACKGROUND,
            (Some((i, _)), None) => PALETTE[i % PALETTE.len()],
            (Some(_), Some(_)) => OVERLAP,
        };
        if scale >= 4 && (px % patch_px == 0 || py % patch_px == 0) {
            darken(colour)
        } else {
            colour
        }
    })
}

/// Write an image as PNG.
pub fn write_png(path: &Path, image: &RgbImage) -> Result<(), TwinError> {
    image.save_with_format(path, ImageFormat::Png)?;
    log::info!("wrote {}", path.display());
    Ok(())
}
