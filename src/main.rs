use clap::{ArgAction, Parser, Subcommand};
use mapview::config::{Config, DEFAULT_CONFIG_PATH};
use mapview::menu::{Menu, ProcessPresenter};
use mapview::summary::{group_thousands, MapSummary};
use mapview::{get_walkable_cells, logging, read_map_file, save_map_image, viewer};
use mapview::ViewOptions;
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

/// Octile map loader and viewer
#[derive(Parser, Debug)]
#[command(name = "mapview")]
#[command(about = "Load octile grid maps and render them", long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive console menu (default)
    Menu,
    /// Print map size and terrain statistics
    Info {
        file: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print walkable cell coordinates
    Walkable {
        file: PathBuf,
        /// How many coordinates to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Render a static image, saved to OUTPUT or shown in a window
    Image {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pixels per cell edge; a shown window is fitted to the max window when omitted
        #[arg(short, long)]
        scale: Option<usize>,
    },
    /// Open the interactive viewer
    View {
        file: PathBuf,
        /// Fixed cell size in pixels (auto-scaled when omitted)
        #[arg(long)]
        cell_size: Option<usize>,
        /// Ignore the configured cell size and fit the max window
        #[arg(long, conflicts_with = "cell_size")]
        fit: bool,
        #[arg(long)]
        max_width: Option<usize>,
        #[arg(long)]
        max_height: Option<usize>,
    },
}

fn run(command: Command, config: &Config, config_path: &Path) -> Result<(), Box<dyn Error>> {
    let palette = config.palette.to_palette();

    match command {
        Command::Menu => {
            let presenter = ProcessPresenter::current(config_path)?;
            let stdin = io::stdin();
            Menu::new(stdin.lock(), io::stdout(), presenter, config).run()?;
        }
        Command::Info { file, json } => {
            let grid = read_map_file(&file)?;
            let summary = MapSummary::from_grid(&grid);
            if json {
                println!("{}", summary.to_json()?);
            } else {
                println!("Map: {}", file.display());
                println!("{}", summary);
            }
        }
        Command::Walkable { file, limit } => {
            let grid = read_map_file(&file)?;
            let walkable = get_walkable_cells(&grid);
            println!("Walkable cells: {}", group_thousands(walkable.len()));
            for (x, y) in walkable.iter().take(limit) {
                println!("({}, {})", x, y);
            }
        }
        Command::Image {
            file,
            output,
            scale,
        } => {
            let grid = read_map_file(&file)?;
            match output {
                Some(path) => {
                    let scale = scale.unwrap_or(config.viewer.image_scale);
                    save_map_image(&grid, &palette, &path, scale)?;
                    println!("Saved image to {}", path.display());
                }
                None => {
                    let options = ViewOptions {
                        cell_size: scale,
                        max_window: config.viewer.max_window(),
                    };
                    viewer::show_map_image(&grid, &palette, &options)?;
                }
            }
        }
        Command::View {
            file,
            cell_size,
            fit,
            max_width,
            max_height,
        } => {
            let grid = read_map_file(&file)?;
            let (default_w, default_h) = config.viewer.max_window();
            let configured = if fit { None } else { config.viewer.cell_size };
            let options = ViewOptions {
                cell_size: cell_size.or(configured),
                max_window: (max_width.unwrap_or(default_w), max_height.unwrap_or(default_h)),
            };
            println!("Opening viewer (press ESC or close the window to quit)");
            viewer::draw_map(&grid, &palette, &options)?;
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = Config::load(&args.config);
    if let Err(e) = run(args.command.unwrap_or(Command::Menu), &config, &args.config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
