use crate::terrain::{OBSTACLE, SWAMP, TREE, WALKABLE, WATER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

pub const OBSTACLE_COLOR: Rgb = Rgb(50, 50, 50);
pub const TREE_COLOR: Rgb = Rgb(34, 139, 34);
pub const WALKABLE_COLOR: Rgb = Rgb(240, 240, 240);
pub const SWAMP_COLOR: Rgb = Rgb(100, 100, 200);
pub const WATER_COLOR: Rgb = Rgb(70, 130, 180);
pub const FALLBACK_COLOR: Rgb = Rgb(255, 255, 255);

/// Cell code to colour lookup with a fallback for unknown codes
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<char, Rgb>,
    fallback: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            (OBSTACLE, OBSTACLE_COLOR),
            (TREE, TREE_COLOR),
            (WALKABLE, WALKABLE_COLOR),
            (SWAMP, SWAMP_COLOR),
            (WATER, WATER_COLOR),
        ]
        .into_iter()
        .collect();

        Palette {
            colors,
            fallback: FALLBACK_COLOR,
        }
    }
}

impl Palette {
    pub fn color(&self, code: char) -> Rgb {
        self.colors.get(&code).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Rgb {
        self.fallback
    }

    /// Override or add the colour for one code
    pub fn with_color(mut self, code: char, color: Rgb) -> Self {
        self.colors.insert(code, color);
        self
    }

    pub fn with_fallback(mut self, color: Rgb) -> Self {
        self.fallback = color;
        self
    }
}
