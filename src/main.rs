//! termscribe - styled text at terminal coordinates
//!
//! termscribe prompts for a name and renders it at fixed coordinates in
//! bold and normal weight, using capabilities resolved from the terminfo
//! database. All output, plain text and control sequences alike, flows
//! through one buffered writer so it reaches the terminal in call order.
//!
//! # Features
//!
//! - **Capability lookup**: `bold`/`sgr0`/`clear`/`cup` resolved once from terminfo
//! - **Ordered output**: text and control sequences share a single buffer
//! - **Graceful degradation**: missing styling capabilities become no-ops
//! - **Configurable demo**: greeting text and coordinates from `config.toml`
//!
//! # Quick Start
//!
//! ```text
//! termscribe              # resolve capabilities from $TERM
//! termscribe -t vt100     # force a terminal type
//! ```

mod config;
mod term;

use std::env;
use std::io;

use crossterm::terminal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config as FileConfig;
use crate::term::{CapabilitySet, TermWriter};

/// Application configuration
struct Config {
    /// Terminal type override
    term: Option<String>,
    /// Terminal type was explicitly set via command line
    term_from_cli: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            term: None, // Will be set from config.toml or resolved from $TERM
            term_from_cli: false,
        }
    }
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("termscribe {}", VERSION);
}

fn print_help() {
    eprintln!("termscribe {} - styled text at terminal coordinates", VERSION);
    eprintln!();
    eprintln!("Usage: termscribe [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --term <NAME>     Resolve capabilities for NAME instead of $TERM");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Prompts for a name, prints it bold and normal at the configured");
    eprintln!("coordinates, waits for enter, then clears the screen.");
    eprintln!();
    eprintln!("Configuration: ~/.termscribe/config.toml");
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-t" | "--term" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing terminal type argument".to_string());
                }
                config.term = Some(args[i].clone());
                config.term_from_cli = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Read one line from stdin, dropping the trailing newline
fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let mut config = match parse_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    // Initialize logging to file (the terminal itself is the UI)
    let log_path = config::home_dir()
        .map(|h| h.join(".termscribe").join("termscribe.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("termscribe.log"));

    // Create log directory if needed
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    // Open log file (append mode)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    info!("termscribe starting...");

    // Load termscribe config file
    let file_config = FileConfig::load();

    // Merge config: command line args override config file
    if !config.term_from_cli {
        if let Some(ref term) = file_config.term {
            config.term = Some(term.clone());
        }
    }

    info!(
        "Terminal type: {}",
        config.term.as_deref().unwrap_or("(from $TERM)")
    );
    info!("Rows: {:?}", file_config.rows);

    run_demo(&file_config, config.term.as_deref())?;

    info!("termscribe done");
    Ok(())
}

/// Run the interactive greeting demo
fn run_demo(config: &FileConfig, term: Option<&str>) -> anyhow::Result<()> {
    let caps = match term {
        Some(name) => CapabilitySet::from_name(name)?,
        None => CapabilitySet::from_env()?,
    };

    // Bottom row for the exit prompt
    let (_cols, rows) = terminal::size().unwrap_or((80, 25));
    let bottom = rows.saturating_sub(1);

    let mut writer = TermWriter::new(io::stdout(), caps);

    writer.clear_screen()?;
    writer.write_text("Enter your name: ")?;
    writer.flush()?;
    let name = read_line()?;

    let line = format!("{} {}", config.greeting, name);
    for &row in &config.rows {
        let column = row + config.column_offset;
        writer.goto(row, column)?;
        writer.bold()?;
        writer.write_text(&line)?;
        writer.normal()?;
        writer.goto(row + 1, column + 1)?;
        writer.write_text(&line)?;
    }

    writer.goto(bottom, 0)?;
    writer.write_text("Press enter to exit: ")?;
    writer.flush()?;
    read_line()?;

    writer.clear_screen()?;
    writer.flush()?;

    Ok(())
}
