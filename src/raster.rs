//! Static rendering: paint a grid into an RGBA image

use crate::error::{MapError, Result};
use crate::grid::Grid;
use crate::palette::{Palette, Rgb};
use image::{Rgba, RgbaImage};
use std::path::Path;
use tracing::info;

/// Paint every cell as a `cell_size` x `cell_size` block
pub fn render_image(grid: &Grid, palette: &Palette, cell_size: usize) -> Result<RgbaImage> {
    let cell_size = cell_size.max(1);
    let (width, height) = image_size(grid, cell_size)?;
    let mut img = RgbaImage::new(width, height);

    // image_size bounds every edge to u32, so block corners fit too
    let cell = cell_size as u32;
    for ((x, y), code) in grid.iter_cells() {
        fill_rect(&mut img, x as u32 * cell, y as u32 * cell, cell, palette.color(code));
    }

    Ok(img)
}

/// Pixel dimensions of the rendered grid, refusing anything that overflows
/// the image buffer
fn image_size(grid: &Grid, cell_size: usize) -> Result<(u32, u32)> {
    let too_large = || MapError::ImageTooLarge {
        width: grid.width().saturating_mul(cell_size),
        height: grid.height().saturating_mul(cell_size),
    };

    let width = grid.width().checked_mul(cell_size).ok_or_else(too_large)?;
    let height = grid.height().checked_mul(cell_size).ok_or_else(too_large)?;
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;

    // RGBA buffer length must fit in usize as well
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(too_large)?;

    Ok((width, height))
}

fn fill_rect(img: &mut RgbaImage, left: u32, top: u32, size: u32, color: Rgb) {
    let pixel = Rgba(color.to_rgba());
    for py in top..top + size {
        for px in left..left + size {
            img.put_pixel(px, py, pixel);
        }
    }
}

/// Render the grid and write it to `path`; the format follows the extension
pub fn save_map_image(
    grid: &Grid,
    palette: &Palette,
    path: impl AsRef<Path>,
    cell_size: usize,
) -> Result<()> {
    let path = path.as_ref();
    let img = render_image(grid, palette, cell_size)?;
    img.save(path)?;
    info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "saved map image"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_pixel_per_cell_by_default() {
        let grid = Grid::from_rows(&["@T", ".?"], 2);
        let img = render_image(&grid, &Palette::default(), 1).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0), &Rgba([50, 50, 50, 255]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([34, 139, 34, 255]));
        assert_eq!(img.get_pixel(0, 1), &Rgba([240, 240, 240, 255]));
        assert_eq!(img.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn scaled_cells_fill_whole_block() {
        let grid = Grid::from_rows(&["SW"], 2);
        let img = render_image(&grid, &Palette::default(), 3).unwrap();
        assert_eq!(img.dimensions(), (6, 3));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(img.get_pixel(x, y), &Rgba([100, 100, 200, 255]));
                assert_eq!(img.get_pixel(x + 3, y), &Rgba([70, 130, 180, 255]));
            }
        }
    }

    #[test]
    fn zero_scale_is_clamped() {
        let grid = Grid::from_rows(&["..."], 3);
        let img = render_image(&grid, &Palette::default(), 0).unwrap();
        assert_eq!(img.dimensions(), (3, 1));
    }

    #[test]
    fn scale_past_u32_is_an_error() {
        let grid = Grid::from_rows(&["."], 1);
        let err = render_image(&grid, &Palette::default(), (1usize << 32) + 1).unwrap_err();
        assert!(matches!(err, MapError::ImageTooLarge { width, height } if width == height));
    }

    #[test]
    fn overflowing_scale_is_an_error() {
        let grid = Grid::from_rows(&["..", ".."], 2);
        let err = render_image(&grid, &Palette::default(), usize::MAX).unwrap_err();
        assert!(matches!(err, MapError::ImageTooLarge { width: usize::MAX, height: usize::MAX }));
    }
}
