//! Interactive map window
//!
//! The grid is painted once into an off-screen raster, uploaded as a single
//! texture, and presented until the window is closed or Escape is pressed.
//! Each call owns its window: it is created on entry and torn down before
//! the call returns.

use crate::error::{MapError, Result};
use crate::grid::Grid;
use crate::palette::Palette;
use crate::raster::render_image;
use crate::scale::{calculate_cell_size, window_size, DEFAULT_MAX_WINDOW};
use image::RgbaImage;
use macroquad::prelude::*;
use macroquad::Window;
use tracing::{debug, info};

/// Largest texture edge the viewer accepts
pub const MAX_TEXTURE_EDGE: usize = u16::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Fixed cell size in pixels; auto-scaled to `max_window` when `None`
    pub cell_size: Option<usize>,
    pub max_window: (usize, usize),
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            cell_size: None,
            max_window: DEFAULT_MAX_WINDOW,
        }
    }
}

/// Resolved window geometry for one grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPlan {
    pub cell_size: usize,
    pub window_width: usize,
    pub window_height: usize,
    pub title: String,
}

impl ViewPlan {
    pub fn new(grid: &Grid, options: &ViewOptions) -> Result<Self> {
        let cell_size = match options.cell_size {
            Some(size) => size.max(1),
            None => {
                let (max_w, max_h) = options.max_window;
                let size = calculate_cell_size(grid.width(), grid.height(), max_w, max_h);
                info!(cell_size = size, "auto cell size");
                size
            }
        };

        let (window_width, window_height) = window_size(grid.width(), grid.height(), cell_size)
            .ok_or(MapError::WindowTooLarge {
                width: grid.width().saturating_mul(cell_size),
                height: grid.height().saturating_mul(cell_size),
            })?;
        check_texture_size(window_width, window_height)?;

        Ok(ViewPlan {
            cell_size,
            window_width,
            window_height,
            title: format!(
                "Map Viewer - {}x{} (cell={}px)",
                grid.width(),
                grid.height(),
                cell_size
            ),
        })
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }
}

fn check_texture_size(width: usize, height: usize) -> Result<()> {
    if width > MAX_TEXTURE_EDGE || height > MAX_TEXTURE_EDGE {
        return Err(MapError::WindowTooLarge { width, height });
    }
    Ok(())
}

/// Open a window showing the grid; blocks until the window is closed or Escape is pressed
///
/// A process can open only one macroquad window in its lifetime. Callers that
/// show several maps go through `menu::ProcessPresenter`, which runs each
/// window in its own child process.
pub fn draw_map(grid: &Grid, palette: &Palette, options: &ViewOptions) -> Result<()> {
    let plan = ViewPlan::new(grid, options)?;
    let raster = render_image(grid, palette, plan.cell_size)?;
    present(raster, plan.title)
}

/// Show the static rendering of the grid, scaled to fit the bounding window
/// unless a cell size is given
pub fn show_map_image(grid: &Grid, palette: &Palette, options: &ViewOptions) -> Result<()> {
    let title = format!("Map Visualization ({}x{})", grid.width(), grid.height());
    let plan = ViewPlan::new(grid, options)?.with_title(title);
    let raster = render_image(grid, palette, plan.cell_size)?;
    present(raster, plan.title)
}

fn present(raster: RgbaImage, title: String) -> Result<()> {
    let conf = Conf {
        window_title: title,
        window_width: raster.width() as i32,
        window_height: raster.height() as i32,
        window_resizable: false,
        ..Default::default()
    };

    debug!(
        width = conf.window_width,
        height = conf.window_height,
        "opening map window"
    );
    Window::from_config(conf, run_window(raster));
    debug!("map window closed");
    Ok(())
}

async fn run_window(raster: RgbaImage) {
    prevent_quit();

    let texture = Texture2D::from_rgba8(
        raster.width() as u16,
        raster.height() as u16,
        raster.as_raw(),
    );
    texture.set_filter(FilterMode::Nearest);
    drop(raster);

    loop {
        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            break;
        }

        clear_background(BLACK);
        draw_texture(&texture, 0.0, 0.0, WHITE);

        next_frame().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_scale_fits_default_window() {
        let grid = Grid::filled(50, 100);
        let plan = ViewPlan::new(&grid, &ViewOptions::default()).unwrap();
        assert_eq!(plan.cell_size, 16);
        assert_eq!((plan.window_width, plan.window_height), (1600, 800));
        assert_eq!(plan.title, "Map Viewer - 100x50 (cell=16px)");
    }

    #[test]
    fn fixed_cell_size_is_used_as_is() {
        let grid = Grid::filled(10, 20);
        let options = ViewOptions {
            cell_size: Some(3),
            ..Default::default()
        };
        let plan = ViewPlan::new(&grid, &options).unwrap();
        assert_eq!((plan.cell_size, plan.window_width, plan.window_height), (3, 60, 30));
    }

    #[test]
    fn custom_max_window_changes_scale() {
        let grid = Grid::filled(50, 100);
        let options = ViewOptions {
            cell_size: None,
            max_window: (1920, 1080),
        };
        assert_eq!(ViewPlan::new(&grid, &options).unwrap().cell_size, 19);
    }

    #[test]
    fn overflowing_cell_size_is_rejected() {
        let grid = Grid::from_rows(&["...."], 4);
        let options = ViewOptions {
            cell_size: Some(usize::MAX / 2),
            ..Default::default()
        };
        let err = ViewPlan::new(&grid, &options).unwrap_err();
        assert!(matches!(err, MapError::WindowTooLarge { width: usize::MAX, .. }));
    }

    #[test]
    fn static_display_is_fitted_to_window() {
        let grid = Grid::from_rows(&["@@@@@@@@@@"; 6], 10);
        let title = "Map Visualization (10x6)".to_string();
        let plan = ViewPlan::new(&grid, &ViewOptions::default())
            .unwrap()
            .with_title(title.clone());
        assert_eq!(plan.cell_size, 150);
        assert_eq!((plan.window_width, plan.window_height), (1500, 900));
        assert_eq!(plan.title, title);
    }

    #[test]
    fn oversized_window_is_rejected() {
        let grid = Grid::filled(10, 10_000);
        let options = ViewOptions {
            cell_size: Some(10),
            ..Default::default()
        };
        let err = ViewPlan::new(&grid, &options).unwrap_err();
        assert!(matches!(err, MapError::WindowTooLarge { width: 100_000, height: 100 }));
    }
}
