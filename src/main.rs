use clap::{ArgAction, Parser};
use flashcards::{Session, SessionConfig};
use std::io;
use std::path::PathBuf;

/// Interactive flashcard quiz with per-card mistake tracking.
#[derive(Parser, Debug)]
#[command(name = "flashcards")]
#[command(version, about, long_about = None)]
struct Args {
    /// Deck snapshot to load before the first prompt
    #[arg(long = "import_from", value_name = "FILE")]
    import_from: Option<PathBuf>,

    /// Where to save the deck when the session exits
    #[arg(long = "export_to", value_name = "FILE")]
    export_to: Option<PathBuf>,

    /// Verbosity of diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    // stdout belongs to the prompt
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = SessionConfig {
        import_from: args.import_from,
        export_to: args.export_to,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(config, stdin.lock(), stdout.lock(), rand::thread_rng())?;
    session.run()?;

    Ok(())
}
