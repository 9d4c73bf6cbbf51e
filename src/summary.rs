use crate::grid::{get_walkable_cells, Grid};
use crate::terrain::Terrain;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Cell count for one code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellCount {
    pub code: char,
    pub name: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Terrain statistics of a map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub width: usize,
    pub height: usize,
    pub total_cells: usize,
    pub walkable_cells: usize,
    /// Sorted by code
    pub cells: Vec<CellCount>,
}

impl MapSummary {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        for (_, code) in grid.iter_cells() {
            *counts.entry(code).or_insert(0) += 1;
        }

        let total_cells = grid.width() * grid.height();
        let cells = counts
            .into_iter()
            .map(|(code, count)| CellCount {
                code,
                name: Terrain::from_code(code).name(),
                count,
                percentage: percentage(count, total_cells),
            })
            .collect();

        MapSummary {
            width: grid.width(),
            height: grid.height(),
            total_cells,
            walkable_cells: get_walkable_cells(grid).len(),
            cells,
        }
    }

    pub fn count_of(&self, code: char) -> usize {
        self.cells
            .iter()
            .find(|c| c.code == code)
            .map_or(0, |c| c.count)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

impl Display for MapSummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Size: {} x {}", self.width, self.height)?;
        writeln!(f, "Total cells: {}", group_thousands(self.total_cells))?;
        writeln!(f, "Cell types:")?;
        for cell in &self.cells {
            writeln!(
                f,
                "  '{}' ({:<8}): {:>9} cells ({:5.2}%)",
                cell.code,
                cell.name,
                group_thousands(cell.count),
                cell.percentage
            )?;
        }
        write!(f, "Walkable cells: {}", group_thousands(self.walkable_cells))
    }
}

/// Format a count with comma separators, e.g. 1234567 -> "1,234,567"
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// First `rows` rows of the grid, each cut to `cols` codes
pub fn preview_rows(grid: &Grid, rows: usize, cols: usize) -> Vec<String> {
    grid.iter_rows()
        .take(rows)
        .map(|row| row.iter().take(cols).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cells_by_code() {
        let grid = Grid::from_rows(&["@@T.", "SW.?"], 4);
        let summary = MapSummary::from_grid(&grid);
        assert_eq!(summary.total_cells, 8);
        assert_eq!(summary.walkable_cells, 6);
        assert_eq!(summary.count_of('@'), 2);
        assert_eq!(summary.count_of('.'), 2);
        assert_eq!(summary.count_of('?'), 1);
        assert_eq!(summary.count_of('Z'), 0);
        assert_eq!(summary.cells.iter().map(|c| c.count).sum::<usize>(), 8);
        assert_eq!(summary.cells[0].code, '.');
        assert_eq!(summary.cells[0].percentage, 25.0);

        let unknown = summary.cells.iter().find(|c| c.code == '?').unwrap();
        assert_eq!(unknown.name, "Unknown");
    }

    #[test]
    fn cells_are_sorted_by_code() {
        let grid = Grid::from_rows(&["WT.@S"], 5);
        let codes: Vec<char> = MapSummary::from_grid(&grid).cells.iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!['.', '@', 'S', 'T', 'W']);
    }

    #[test]
    fn empty_grid_has_zero_percentages() {
        let summary = MapSummary::from_grid(&Grid::filled(0, 0));
        assert_eq!(summary.total_cells, 0);
        assert!(summary.cells.is_empty());
    }

    #[test]
    fn display_lists_every_code() {
        let grid = Grid::from_rows(&["@."], 2);
        let text = MapSummary::from_grid(&grid).to_string();
        assert!(text.contains("Size: 2 x 1"));
        assert!(text.contains("'@' (Obstacle)"));
        assert!(text.contains("50.00%"));
        assert!(text.ends_with("Walkable cells: 1"));
    }

    #[test]
    fn json_export_has_counts() {
        let grid = Grid::from_rows(&["T."], 2);
        let json = MapSummary::from_grid(&grid).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["walkable_cells"], 2);
        assert_eq!(value["cells"][1]["name"], "Tree");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn preview_cuts_rows_and_columns() {
        let grid = Grid::from_rows(&["T.T.", "....", "WWWW"], 4);
        assert_eq!(preview_rows(&grid, 2, 3), vec!["T.T", "..."]);
    }
}
