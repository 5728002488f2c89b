use std::path::PathBuf;

use anyhow::Context;
use boardctl::{load_session, CheckReport, MoveSpec};
use clap::{Args, Parser, Subcommand};
use protoboard::{reference_document, visualize_board};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Args)]
struct Files {
    /// Card table to import (CSV)
    #[arg(short, long)]
    cards: Option<PathBuf>,

    /// Zone layout document to import (JSON)
    #[arg(short, long)]
    layout: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the seeded board
    Show {
        #[command(flatten)]
        files: Files,

        /// Move a card before printing, as CARD=ZONE or CARD=ZONE@INDEX
        #[arg(short, long = "move")]
        moves: Vec<MoveSpec>,
    },
    /// Import the files and report every problem found
    Check {
        #[command(flatten)]
        files: Files,
    },
    /// Write the imported cards and layout back out, normalized
    Export {
        #[command(flatten)]
        files: Files,

        /// Directory to write cards.csv and layout.json into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the description of the layout document
    Reference,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    initialize_logging(cli.log_level);

    match cli.command {
        Command::Show { files, moves } => {
            let mut session = load_session(files.cards.as_deref(), files.layout.as_deref());
            for spec in &moves {
                match spec.apply(session.board_mut()) {
                    Some(change) => debug!(?change, "Applied move"),
                    None => warn!(card_id = spec.card_id, zone = spec.zone, "Move had no effect"),
                }
            }
            print!("{}", visualize_board(session.board()));
        }
        Command::Check { files } => {
            let mut session = load_session(files.cards.as_deref(), files.layout.as_deref());
            let report = CheckReport::new(&mut session);
            print!("{}", report);
            if !report.is_clean() {
                let problems = report.diagnostics.len() + report.unplaced_zones.len();
                anyhow::bail!("Found {} problems", problems);
            }
        }
        Command::Export { files, out_dir } => {
            let session = load_session(files.cards.as_deref(), files.layout.as_deref());
            if let Some(diagnostic) = session.diagnostics().first() {
                anyhow::bail!("Not exporting, the import had problems: {}", diagnostic);
            }
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("Could not create {}", out_dir.display()))?;
            let [cards, layout] = session.export_to_dir(&out_dir)?;
            info!(cards = %cards.display(), layout = %layout.display(), "Exported");
        }
        Command::Reference => print!("{}", reference_document()),
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(format),
        )
        .with(filter)
        .init();
}
