use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use protoboard_io::Session;
use ratatui::{
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
mod geometry;
mod widgets;

use app::{App, Paths};

#[derive(Parser)]
struct Args {
    /// Card table to import (CSV)
    #[arg(short, long)]
    cards: Option<PathBuf>,

    /// Zone layout document to import (JSON)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Where the "e" key writes cards.csv and layout.json
    #[arg(short, long, default_value = ".")]
    export_dir: PathBuf,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// The terminal is taken by the board, so logs go to this file
    #[arg(long, default_value = "protoboard.log")]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level, &args.log_file)?;

    let has_files = args.cards.is_some() || args.layout.is_some();
    let mut app = App::new(
        Session::default(),
        Paths {
            cards: args.cards,
            layout: args.layout,
            export_dir: args.export_dir,
        },
    );
    if has_files {
        app.reload();
    }
    info!(status = app.status(), "Starting");

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let result = run(&mut app);
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    while !app.should_quit() {
        terminal.draw(|frame| app.draw(frame))?;
        handle_events(app)?;
    }
    Ok(())
}

fn handle_events(app: &mut App) -> io::Result<()> {
    if event::poll(Duration::from_millis(16))? {
        app.handle_event(event::read()?);
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create log file {}", path.display()))?;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .with_ansi(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .event_format(format),
        )
        .with(filter)
        .init();
    Ok(())
}
