mod app;
mod config;
mod error;
mod fileio;
mod input;
mod mode;
mod style;
mod table;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::App;
use config::{Cli, HeaderPolicy, Settings};
use error::Result;
use fileio::{FileIO, LoadResult};
use style::Style;

/// Logs go to a file, the terminal belongs to the table. Without a log file
/// no subscriber is installed.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .init();
    Ok(())
}

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(file = location.file(), line = location.line(), "panic occurred");
        } else {
            error!("panic occurred");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

fn run(settings: Settings) -> Result<()> {
    let file_io = FileIO::new(settings.file, settings.parser);
    let LoadResult { mut table, warnings } = file_io.load_table()?;

    table.set_defaults();
    match settings.header {
        HeaderPolicy::Auto => {
            table.detect_header();
        }
        HeaderPolicy::Show => table.show_header = true,
        HeaderPolicy::Hide => table.show_header = false,
    }

    let mut app = App::new(table, file_io.file_name(), Style::with_theme(settings.theme));
    if !warnings.is_empty() {
        app.message = Some(warnings.join("; "));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

fn main() -> ExitCode {
    let settings = match Settings::load(Cli::parse()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("tabview: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &settings.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("tabview: cannot open log file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }
    info!("tabview started");

    install_panic_hook();

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to view table");
            eprintln!("tabview: {}", e);
            ExitCode::FAILURE
        }
    }
}
