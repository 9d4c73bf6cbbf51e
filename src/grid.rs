use crate::terrain::{Terrain, OBSTACLE};
use std::ops::Index;

/// Cell coordinate as (x, y) = (column, row)
pub type Coord = (usize, usize);

/// Grid structure for storing cell codes
/// Cells are stored row-major; every row holds exactly `cols` codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Create a grid with every cell set to obstacle
    #[cfg(test)]
    pub(crate) fn filled(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![OBSTACLE; rows * cols],
        }
    }

    /// Wrap row-major cells that already hold `rows * cols` codes
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Grid { rows, cols, cells }
    }

    /// Build a grid from text rows, padding with obstacles or truncating to `cols`
    pub fn from_rows<S: AsRef<str>>(rows: &[S], cols: usize) -> Self {
        let cells = rows
            .iter()
            .flat_map(|row| normalize_row(row.as_ref(), cols).0)
            .collect();
        Self::from_cells(rows.len(), cols, cells)
    }

    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn height(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: usize, y: usize) -> usize {
        x + y * self.cols
    }

    /// Convert cell ID to (x, y) coordinates
    pub fn get_coords(&self, id: usize) -> Coord {
        (id % self.cols, id / self.cols)
    }

    /// Get cell code at (x, y); out of bounds reads as obstacle
    pub fn get_cell(&self, x: usize, y: usize) -> char {
        if x >= self.cols || y >= self.rows {
            return OBSTACLE;
        }
        self.cells[self.get_id(x, y)]
    }

    pub fn terrain(&self, x: usize, y: usize) -> Terrain {
        Terrain::from_code(self.get_cell(x, y))
    }

    /// Check if a cell at (x, y) is blocked
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        !self.terrain(x, y).is_walkable()
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        (0..self.rows).map(move |y| &self[y])
    }

    /// Iterate every cell in row-major order with its coordinate
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(id, &code)| (self.get_coords(id), code))
    }
}

impl Index<usize> for Grid {
    type Output = [char];

    fn index(&self, y: usize) -> &[char] {
        let start = y * self.cols;
        assert!(y < self.rows, "row {} out of range for grid of {} rows", y, self.rows);
        &self.cells[start..start + self.cols]
    }
}

/// Row normalization result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowFit {
    Exact,
    Padded,
    Truncated,
}

/// Pad a row with obstacles or cut it down so it holds exactly `cols` codes
pub(crate) fn normalize_row(line: &str, cols: usize) -> (Vec<char>, RowFit) {
    let mut row: Vec<char> = line.chars().collect();
    let fit = if row.len() < cols {
        row.resize(cols, OBSTACLE);
        RowFit::Padded
    } else if row.len() > cols {
        row.truncate(cols);
        RowFit::Truncated
    } else {
        RowFit::Exact
    };
    (row, fit)
}

/// Collect every non-obstacle cell in row-major order
pub fn get_walkable_cells(grid: &Grid) -> Vec<Coord> {
    grid.iter_cells()
        .filter(|&(_, code)| code != OBSTACLE)
        .map(|(coord, _)| coord)
        .collect()
}
