//! Reader for octile `.map` files
//!
//! ```text
//! type octile
//! height 4
//! width 6
//! map
//! @@@@@@
//! @..T.@
//! @.WW.@
//! @@@@@@
//! ```
//!
//! Body rows are normalized to the declared size: short rows are padded with
//! obstacles, long rows are cut, missing rows are filled with obstacles.

use crate::error::{MapError, Result};
use crate::grid::{normalize_row, Grid, RowFit};
use crate::terrain::OBSTACLE;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const HEADER_LINES: usize = 4;

/// Header values of a map file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapHeader {
    /// Second token of the first line, "unknown" when absent
    pub map_type: String,
    pub height: usize,
    pub width: usize,
}

/// A parsed map: header plus normalized grid
#[derive(Debug, Clone)]
pub struct MapFile {
    pub header: MapHeader,
    pub grid: Grid,
}

/// Read a map file and return its normalized grid
pub fn read_map_file(path: impl AsRef<Path>) -> Result<Grid> {
    load_map(path).map(|map| map.grid)
}

/// Read a map file, keeping the header alongside the grid
pub fn load_map(path: impl AsRef<Path>) -> Result<MapFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MapError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let map = parse_map(&contents).map_err(|e| match e {
        MapError::Format(msg) => MapError::Format(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    debug!(
        path = %path.display(),
        map_type = %map.header.map_type,
        width = map.header.width,
        height = map.header.height,
        "loaded map"
    );
    Ok(map)
}

/// Parse map text that is already in memory
pub fn parse_map(contents: &str) -> Result<MapFile> {
    let lines = split_lines(contents);

    if lines.len() < HEADER_LINES {
        return Err(MapError::Format(format!(
            "invalid map file, expected at least {} header lines, found {}",
            HEADER_LINES,
            lines.len()
        )));
    }

    let header = parse_header(&lines[..HEADER_LINES])?;
    let body = &lines[HEADER_LINES..];
    let body = &body[..body.len().min(header.height)];

    // parse_header already rejected sizes whose product overflows
    let total_cells = header.height * header.width;
    let mut cells = Vec::new();
    cells.try_reserve_exact(total_cells).map_err(|_| {
        MapError::Format(format!(
            "declared size {}x{} is too large to load",
            header.width, header.height
        ))
    })?;

    let mut padded = 0;
    let mut truncated = 0;
    for line in body {
        let (row, fit) = normalize_row(line, header.width);
        match fit {
            RowFit::Padded => padded += 1,
            RowFit::Truncated => truncated += 1,
            RowFit::Exact => {}
        }
        cells.extend(row);
    }

    let missing = header.height - body.len();
    cells.resize(total_cells, OBSTACLE);

    if padded + truncated + missing > 0 {
        warn!(
            padded,
            truncated,
            missing,
            "map body does not match declared {}x{} size, normalized",
            header.width,
            header.height
        );
    }

    let grid = Grid::from_cells(header.height, header.width, cells);
    Ok(MapFile { header, grid })
}

fn parse_header(lines: &[&str]) -> Result<MapHeader> {
    let map_type = lines[0]
        .split_whitespace()
        .nth(1)
        .unwrap_or("unknown")
        .to_string();
    let height = parse_dimension(lines[1], "height")?;
    let width = parse_dimension(lines[2], "width")?;

    if height.checked_mul(width).is_none() {
        return Err(MapError::Format(format!(
            "declared size {}x{} overflows the cell count",
            width, height
        )));
    }

    if !lines[3].trim().starts_with("map") {
        return Err(MapError::Format(
            "invalid header, line 4 must be 'map'".to_string(),
        ));
    }

    Ok(MapHeader {
        map_type,
        height,
        width,
    })
}

/// Split on `\n`, `\r\n` or a lone `\r`; a trailing terminator does not start a new line
fn split_lines(contents: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = contents;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(end) => {
                lines.push(&rest[..end]);
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Parse a `<name> <value>` header line
fn parse_dimension(line: &str, field: &'static str) -> Result<usize> {
    let token = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| MapError::Format(format!("missing {} value", field)))?;
    let value: usize = token
        .parse()
        .map_err(|source| MapError::InvalidNumber { field, source })?;
    if value == 0 {
        return Err(MapError::Format(format!("{} must be positive", field)));
    }
    Ok(value)
}
