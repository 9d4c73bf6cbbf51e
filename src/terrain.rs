use serde::Serialize;

pub const OBSTACLE: char = '@';
pub const TREE: char = 'T';
pub const WALKABLE: char = '.';
pub const SWAMP: char = 'S';
pub const WATER: char = 'W';

/// Terrain kind behind a cell code
/// Codes outside the known alphabet are kept as `Unknown` and treated as walkable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Terrain {
    Obstacle,
    Tree,
    Walkable,
    Swamp,
    Water,
    Unknown(char),
}

impl Terrain {
    pub fn from_code(code: char) -> Self {
        match code {
            OBSTACLE => Terrain::Obstacle,
            TREE => Terrain::Tree,
            WALKABLE => Terrain::Walkable,
            SWAMP => Terrain::Swamp,
            WATER => Terrain::Water,
            other => Terrain::Unknown(other),
        }
    }

    pub fn code(self) -> char {
        match self {
            Terrain::Obstacle => OBSTACLE,
            Terrain::Tree => TREE,
            Terrain::Walkable => WALKABLE,
            Terrain::Swamp => SWAMP,
            Terrain::Water => WATER,
            Terrain::Unknown(c) => c,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Obstacle => "Obstacle",
            Terrain::Tree => "Tree",
            Terrain::Walkable => "Walkable",
            Terrain::Swamp => "Swamp",
            Terrain::Water => "Water",
            Terrain::Unknown(_) => "Unknown",
        }
    }

    pub fn is_walkable(self) -> bool {
        self != Terrain::Obstacle
    }
}
