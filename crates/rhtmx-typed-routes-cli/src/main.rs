mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rhtmx-routes")]
#[command(version, about = "Generate typed href declarations from a route tree", long_about = None)]
struct Cli {
    /// Log progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the route declaration document
    Generate {
        /// Serialized route tree (JSON), or `-` for stdin
        #[arg(short, long)]
        tree: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Options file (defaults to ./typed-routes.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Treat every group as optional and enumerable
        #[arg(long)]
        partial_typed_groups: bool,

        /// Emit a diagnostic-suppression comment before each union
        #[arg(long)]
        test_ignore_comments: bool,

        /// Router module to re-export and augment
        #[arg(long)]
        router_module: Option<String>,
    },

    /// Print the static and dynamic routes found in a route tree
    Inspect {
        /// Serialized route tree (JSON), or `-` for stdin
        #[arg(short, long)]
        tree: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            tree,
            out,
            config,
            partial_typed_groups,
            test_ignore_comments,
            router_module,
        } => {
            let overrides = commands::generate::Overrides {
                partial_typed_groups,
                test_ignore_comments,
                router_module,
            };
            commands::generate::execute(&tree, out.as_deref(), config.as_deref(), overrides)?;
        }
        Commands::Inspect { tree } => {
            commands::inspect::execute(&tree)?;
        }
    }

    Ok(())
}
