mod check;
mod completions;
mod languages;
mod render;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use languages::LanguagesCommand;
use render::RenderCommand;
use tracing_subscriber::EnvFilter;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for typewriter_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "typewriter")]
#[command(version)]
#[command(about = "Generate Flow and TypeScript type declarations from a TOML type manifest")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Languages(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    /// Install the log subscriber. `-v` wins over `RUST_LOG`; without
    /// either only warnings and errors are shown.
    pub fn init_tracing(&self) {
        let filter = match self.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render type declarations from types.toml
    Render(RenderCommand),

    /// Validate types.toml without rendering
    Check(CheckCommand),

    /// List built-in languages and fragment names
    Languages(LanguagesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
