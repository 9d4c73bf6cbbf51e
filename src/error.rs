use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Everything that can go wrong while loading or rendering a map
#[derive(Debug)]
pub enum MapError {
    /// The file does not follow the octile header layout
    Format(String),
    /// A header dimension is not an integer
    InvalidNumber {
        field: &'static str,
        source: ParseIntError,
    },
    /// The map path does not exist
    NotFound(PathBuf),
    Io(io::Error),
    Image(image::ImageError),
    /// The painted map does not fit in a single texture
    WindowTooLarge { width: usize, height: usize },
    /// The rendered image would not fit in an image buffer
    ImageTooLarge { width: usize, height: usize },
    /// A child viewer process failed
    Viewer(String),
}

pub type Result<T> = std::result::Result<T, MapError>;

impl Display for MapError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            MapError::Format(msg) => write!(f, "format error: {}", msg),
            MapError::InvalidNumber { field, source } => {
                write!(f, "format error: invalid {} value: {}", field, source)
            }
            MapError::NotFound(path) => write!(f, "map file not found: {}", path.display()),
            MapError::Io(e) => write!(f, "i/o error: {}", e),
            MapError::Image(e) => write!(f, "image error: {}", e),
            MapError::WindowTooLarge { width, height } => write!(
                f,
                "window of {}x{} pixels is too large to display, use a smaller cell size",
                width, height
            ),
            MapError::ImageTooLarge { width, height } => write!(
                f,
                "image of {}x{} pixels is too large, use a smaller scale",
                width, height
            ),
            MapError::Viewer(msg) => write!(f, "viewer failed: {}", msg),
        }
    }
}

impl Error for MapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MapError::InvalidNumber { source, .. } => Some(source),
            MapError::Io(e) => Some(e),
            MapError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        MapError::Io(e)
    }
}

impl From<image::ImageError> for MapError {
    fn from(e: image::ImageError) -> Self {
        MapError::Image(e)
    }
}

impl MapError {
    pub fn is_format(&self) -> bool {
        matches!(self, MapError::Format(_) | MapError::InvalidNumber { .. })
    }
}
