//! Console session for browsing map files
//!
//! The session is a small state machine: pick a map, work with it through
//! the map menu, then either pick another map or exit. Input and output are
//! generic so the whole session can be driven from a script.

use crate::config::Config;
use crate::error::{MapError, Result};
use crate::grid::{get_walkable_cells, Grid};
use crate::map_file::read_map_file;
use crate::summary::{group_thousands, preview_rows};
use crate::viewer::ViewOptions;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

const RULE: &str = "============================================================";
const PREVIEW_ROWS: usize = 5;
const PREVIEW_COLS: usize = 50;
const WALKABLE_SAMPLE: usize = 10;

/// Rendering backend used by the menu
pub trait MapPresenter {
    fn show_static(&mut self, path: &Path, grid: &Grid) -> Result<()>;
    fn show_interactive(&mut self, path: &Path, grid: &Grid, options: &ViewOptions) -> Result<()>;
}

/// Presenter that opens every window in a child `mapview` process
///
/// macroquad allows one window per process, so the menu never opens one
/// itself. Each child runs the `image` or `view` subcommand and exits when
/// its window closes.
#[derive(Debug, Clone)]
pub struct ProcessPresenter {
    program: PathBuf,
    config_path: PathBuf,
}

impl ProcessPresenter {
    /// Spawn the running executable
    pub fn current(config_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::with_program(std::env::current_exe()?, config_path))
    }

    pub fn with_program(program: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        ProcessPresenter {
            program: program.into(),
            config_path: config_path.into(),
        }
    }

    pub fn static_command(&self, path: &Path) -> Command {
        let mut cmd = self.base_command();
        cmd.arg("image").arg(path);
        cmd
    }

    pub fn view_command(&self, path: &Path, options: &ViewOptions) -> Command {
        let mut cmd = self.base_command();
        cmd.arg("view").arg(path);
        match options.cell_size {
            Some(size) => cmd.arg("--cell-size").arg(size.to_string()),
            None => cmd.arg("--fit"),
        };
        let (max_w, max_h) = options.max_window;
        cmd.arg("--max-width")
            .arg(max_w.to_string())
            .arg("--max-height")
            .arg(max_h.to_string());
        cmd
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--config").arg(&self.config_path);
        // the menu already told the user what is opening
        cmd.stdin(Stdio::null()).stdout(Stdio::null());
        cmd
    }

    fn wait(&self, mut cmd: Command) -> Result<()> {
        let args: Vec<OsString> = cmd.get_args().map(|a| a.to_os_string()).collect();
        debug!(program = %self.program.display(), ?args, "spawning viewer");
        let status = cmd.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(MapError::Viewer(format!(
                "{} exited with {}",
                self.program.display(),
                status
            )))
        }
    }
}

impl MapPresenter for ProcessPresenter {
    fn show_static(&mut self, path: &Path, _grid: &Grid) -> Result<()> {
        let cmd = self.static_command(path);
        self.wait(cmd)
    }

    fn show_interactive(&mut self, path: &Path, _grid: &Grid, options: &ViewOptions) -> Result<()> {
        let cmd = self.view_command(path, options);
        self.wait(cmd)
    }
}

#[derive(Debug)]
enum MenuState {
    SelectMap,
    MapMenu {
        name: String,
        path: PathBuf,
        grid: Grid,
    },
    Exit,
}

pub struct Menu<'a, R, W, P> {
    input: R,
    output: W,
    presenter: P,
    config: &'a Config,
}

impl<'a, R: BufRead, W: Write, P: MapPresenter> Menu<'a, R, W, P> {
    pub fn new(input: R, output: W, presenter: P, config: &'a Config) -> Self {
        Menu {
            input,
            output,
            presenter,
            config,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(mut self) -> io::Result<()> {
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "MAP VIEWER")?;
        writeln!(self.output, "{}", RULE)?;

        let mut state = MenuState::SelectMap;
        loop {
            state = match state {
                MenuState::SelectMap => self.select_map()?,
                MenuState::MapMenu { name, path, grid } => self.map_menu(name, path, grid)?,
                MenuState::Exit => break,
            };
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn confirm(&mut self, text: &str) -> io::Result<bool> {
        Ok(self
            .prompt(text)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }

    fn select_map(&mut self) -> io::Result<MenuState> {
        let Some(name) = self.prompt("\nEnter map file name (e.g. w_woundedcoast_map1): ")? else {
            return Ok(MenuState::Exit);
        };

        if name.is_empty() {
            writeln!(self.output, "Invalid file name, please try again.")?;
            return Ok(MenuState::SelectMap);
        }

        let path = self.config.maps.resolve(&name);
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(name);

        writeln!(self.output, "\nLoading map: {}...", display_name)?;
        match read_map_file(&path) {
            Ok(grid) => {
                writeln!(self.output, "Loaded map: {}x{}", grid.width(), grid.height())?;
                info!(path = %path.display(), "map selected");
                Ok(MenuState::MapMenu {
                    name: display_name,
                    path,
                    grid,
                })
            }
            Err(MapError::NotFound(_)) => {
                writeln!(self.output, "File not found: {}", display_name)?;
                if self.confirm("Try again? (y/n): ")? {
                    Ok(MenuState::SelectMap)
                } else {
                    Ok(MenuState::Exit)
                }
            }
            Err(e) => {
                warn!(path = %path.display(), "failed to load map: {}", e);
                writeln!(self.output, "Could not load {}: {}", display_name, e)?;
                Ok(MenuState::SelectMap)
            }
        }
    }

    fn map_menu(&mut self, name: String, path: PathBuf, grid: Grid) -> io::Result<MenuState> {
        writeln!(self.output, "\n{}", RULE)?;
        writeln!(self.output, "CURRENT MAP: {}", name)?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "1. Show map info")?;
        writeln!(self.output, "2. List walkable cells")?;
        writeln!(self.output, "3. Show static image")?;
        writeln!(self.output, "4. Open viewer (auto scale)")?;
        writeln!(self.output, "5. Open viewer with custom window size")?;
        writeln!(self.output, "0. Back (choose another map or quit)")?;
        writeln!(self.output, "{}", RULE)?;

        let Some(choice) = self.prompt("Enter choice (0-5): ")? else {
            return Ok(MenuState::Exit);
        };

        match choice.as_str() {
            "1" => self.print_info(&grid)?,
            "2" => self.print_walkable(&grid)?,
            "3" => {
                writeln!(self.output, "Showing static image (close the window to continue)")?;
                let result = self.presenter.show_static(&path, &grid);
                self.report(result)?;
            }
            "4" => {
                writeln!(self.output, "Opening viewer (press ESC or close the window to quit)")?;
                let options = ViewOptions {
                    cell_size: self.config.viewer.cell_size,
                    max_window: self.config.viewer.max_window(),
                };
                let result = self.presenter.show_interactive(&path, &grid, &options);
                self.report(result)?;
            }
            "5" => {
                let Some(max_window) = self.ask_window_size()? else {
                    return Ok(MenuState::Exit);
                };
                writeln!(self.output, "Opening viewer (press ESC or close the window to quit)")?;
                let options = ViewOptions {
                    cell_size: None,
                    max_window,
                };
                let result = self.presenter.show_interactive(&path, &grid, &options);
                self.report(result)?;
            }
            "0" => {
                return if self.confirm("\nChoose another map? (y/n): ")? {
                    Ok(MenuState::SelectMap)
                } else {
                    Ok(MenuState::Exit)
                };
            }
            _ => writeln!(self.output, "Invalid choice!")?,
        }

        Ok(MenuState::MapMenu { name, path, grid })
    }

    fn print_info(&mut self, grid: &Grid) -> io::Result<()> {
        writeln!(self.output, "Map size: {}x{}", grid.width(), grid.height())?;
        writeln!(self.output, "First rows:")?;
        for (y, row) in preview_rows(grid, PREVIEW_ROWS, PREVIEW_COLS).iter().enumerate() {
            writeln!(self.output, "  Row {}: {}...", y, row)?;
        }
        Ok(())
    }

    fn print_walkable(&mut self, grid: &Grid) -> io::Result<()> {
        let walkable = get_walkable_cells(grid);
        writeln!(self.output, "Walkable cells: {}", group_thousands(walkable.len()))?;
        let sample = &walkable[..walkable.len().min(WALKABLE_SAMPLE)];
        writeln!(self.output, "First {}: {:?}", sample.len(), sample)?;
        Ok(())
    }

    /// `None` when input ended
    fn ask_window_size(&mut self) -> io::Result<Option<(usize, usize)>> {
        let default = self.config.viewer.custom_window();
        let text = format!("Max window size as 'W H' [{} {}]: ", default.0, default.1);
        let Some(answer) = self.prompt(&text)? else {
            return Ok(None);
        };

        if answer.is_empty() {
            return Ok(Some(default));
        }
        match parse_window_size(&answer) {
            Some(size) => Ok(Some(size)),
            None => {
                writeln!(
                    self.output,
                    "Invalid size, using {}x{}",
                    default.0, default.1
                )?;
                Ok(Some(default))
            }
        }
    }

    fn report(&mut self, result: Result<()>) -> io::Result<()> {
        if let Err(e) = result {
            warn!("rendering failed: {}", e);
            writeln!(self.output, "Error: {}", e)?;
        }
        Ok(())
    }
}

/// Parse "W H" or "WxH" into a window size
pub fn parse_window_size(text: &str) -> Option<(usize, usize)> {
    let mut parts = text
        .split(|c: char| c.is_whitespace() || c == 'x' || c == 'X' || c == ',')
        .filter(|p| !p.is_empty());
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    if parts.next().is_some() || width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn static_command_runs_image_subcommand() {
        let presenter = ProcessPresenter::with_program("mapview", "custom.toml");
        let cmd = presenter.static_command(Path::new("Map/lake.map"));
        assert_eq!(cmd.get_program(), "mapview");
        assert_eq!(args_of(&cmd), vec!["--config", "custom.toml", "image", "Map/lake.map"]);
    }

    #[test]
    fn view_command_carries_options() {
        let presenter = ProcessPresenter::with_program("mapview", "config.toml");
        let fixed = ViewOptions {
            cell_size: Some(4),
            max_window: (800, 600),
        };
        assert_eq!(
            args_of(&presenter.view_command(Path::new("a.map"), &fixed)),
            vec![
                "--config", "config.toml", "view", "a.map", "--cell-size", "4",
                "--max-width", "800", "--max-height", "600",
            ]
        );

        let fitted = ViewOptions {
            cell_size: None,
            max_window: (1920, 1080),
        };
        let args = args_of(&presenter.view_command(Path::new("a.map"), &fitted));
        assert!(args.contains(&"--fit".to_string()));
        assert!(!args.contains(&"--cell-size".to_string()));
    }

    #[test]
    fn window_size_formats() {
        assert_eq!(parse_window_size("1920 1080"), Some((1920, 1080)));
        assert_eq!(parse_window_size("2560x1440"), Some((2560, 1440)));
        assert_eq!(parse_window_size(" 800 , 600 "), Some((800, 600)));
        assert_eq!(parse_window_size("800"), None);
        assert_eq!(parse_window_size("0 600"), None);
        assert_eq!(parse_window_size("a b"), None);
        assert_eq!(parse_window_size("1 2 3"), None);
    }
}
