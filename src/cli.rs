use std::path::PathBuf;

mod check;
mod fmt;
mod list;
mod show;
mod terminal;

use check::Check;
use clap::ArgAction;
use fmt::Fmt;
use list::List;
use show::Show;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the manifest file
    #[arg(short, long, default_value = "requirements.txt", global = true)]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Check(Check::default()))
            .run(self.manifest)
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

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Parse and validate the manifest (default)
    Check(Check),

    /// List requirement entries
    List(List),

    /// Show detailed information about one entry
    Show(Show),

    /// Re-serialize the manifest in canonical form
    Fmt(Fmt),
}

impl Command {
    fn run(self, manifest: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Check(cmd) => cmd.run(manifest),
            Self::List(cmd) => cmd.run(manifest),
            Self::Show(cmd) => cmd.run(manifest),
            Self::Fmt(cmd) => cmd.run(manifest),
        }
    }
}
