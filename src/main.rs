//! Gridcalc - a terminal spreadsheet with a tiny arithmetic formula language

mod config;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result, anyhow};
use gridcalc_core::{Document, View};
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: gridcalc [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Spreadsheet file to open");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --print               Print computed values and exit (non-interactive)");
    eprintln!("  --config <FILE>           Load settings from TOML file");
    eprintln!("  --log <FILE>              Write a log to FILE (filter with RUST_LOG)");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    file_path: Option<PathBuf>,
    print: bool,
    config_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
}

/// Parse the arguments after the program name.
fn parse_args(args: &[String]) -> std::result::Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-p" | "--print" => options.print = true,
            "--config" => {
                let path = iter.next().ok_or("--config requires a file path")?;
                options.config_file = Some(PathBuf::from(path));
            }
            "--log" => {
                let path = iter.next().ok_or("--log requires a file path")?;
                options.log_file = Some(PathBuf::from(path));
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if options.file_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                options.file_path = Some(PathBuf::from(arg));
            }
        }
    }
    Ok(Command::Run(options))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("cannot install logger: {}", e))
}

/// Load `path` into a fresh document, reporting bad lines on stderr.
fn load_for_print(path: Option<&Path>, rows: usize, cols: usize) -> Result<Document> {
    let mut doc = Document::new(rows, cols);
    if let Some(path) = path {
        if path.exists() {
            let problems = doc
                .load_file(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            for problem in problems {
                eprintln!("Warning: {}", problem);
            }
        } else {
            eprintln!("Warning: Fresh file: {}", path.display());
        }
    }
    Ok(doc)
}

fn run(options: Options) -> Result<()> {
    if let Some(log_file) = &options.log_file {
        init_logging(log_file)?;
    }

    let (config, warnings) = config::load_config(options.config_file.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    info!(rows = config.rows, cols = config.cols, "starting");

    if options.print {
        let mut doc = load_for_print(options.file_path.as_deref(), config.rows, config.cols)?;
        print!("{}", doc.render_text(View::Values, config.column_width));
        return Ok(());
    }

    run_interactive(options, config)
}

#[cfg(feature = "tui")]
fn run_interactive(options: Options, config: config::Config) -> Result<()> {
    let (keymap, warnings) = tui::build_keymap(&config.keys);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let doc = Document::with_file(options.file_path, config.rows, config.cols)
        .context("cannot open spreadsheet")?;
    let mut app = tui::App::new(doc, config.column_width, keymap);
    tui::run(&mut app).context("terminal failure")?;
    info!("quit");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_options: Options, _config: config::Config) -> Result<()> {
    Err(anyhow!("built without the terminal UI; use --print"))
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
