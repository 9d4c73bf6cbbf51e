pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod map_file;
pub mod menu;
pub mod palette;
pub mod raster;
pub mod scale;
pub mod summary;
pub mod terrain;
pub mod viewer;

pub use error::MapError;
pub use grid::{get_walkable_cells, Coord, Grid};
pub use map_file::{load_map, parse_map, read_map_file, MapFile, MapHeader};
pub use palette::{Palette, Rgb};
pub use raster::{render_image, save_map_image};
pub use scale::calculate_cell_size;
pub use summary::MapSummary;
pub use terrain::Terrain;
pub use viewer::{draw_map, ViewOptions};
