#![allow(dead_code)]

use mapview::menu::MapPresenter;
use mapview::viewer::ViewOptions;
use mapview::Grid;
use std::fs;
use std::path::{Path, PathBuf};

pub const MAPS_DIR: &str = "./test_data/maps";
pub const INVALID_DIR: &str = "./test_data/invalid";

/// Write `contents` to a per-test file under the system temp dir
pub fn write_temp_map(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mapview-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp map");
    path
}

/// Build map text from a declared size and body lines
pub fn map_text(height: usize, width: usize, body: &[&str]) -> String {
    let mut text = format!("type octile\nheight {}\nwidth {}\nmap\n", height, width);
    for line in body {
        text.push_str(line);
        text.push('\n');
    }
    text
}

pub fn rows_of(grid: &Grid) -> Vec<String> {
    grid.iter_rows().map(|r| r.iter().collect()).collect()
}

/// Every `.map` file in a directory, sorted by name
pub fn map_files(dir: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read test data dir")
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("map"))
        .collect();
    files.sort();
    files
}

pub fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown")
}

/// What the menu asked the presenter to do
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Static { map: String, width: usize, height: usize },
    Interactive { map: String, width: usize, height: usize, options: ViewOptions },
}

/// Presenter that records calls instead of opening windows
#[derive(Default)]
pub struct RecordingPresenter {
    pub shown: Vec<Shown>,
}

impl MapPresenter for &mut RecordingPresenter {
    fn show_static(&mut self, path: &Path, grid: &Grid) -> mapview::error::Result<()> {
        self.shown.push(Shown::Static {
            map: file_name(path).to_string(),
            width: grid.width(),
            height: grid.height(),
        });
        Ok(())
    }

    fn show_interactive(
        &mut self,
        path: &Path,
        grid: &Grid,
        options: &ViewOptions,
    ) -> mapview::error::Result<()> {
        self.shown.push(Shown::Interactive {
            map: file_name(path).to_string(),
            width: grid.width(),
            height: grid.height(),
            options: *options,
        });
        Ok(())
    }
}
