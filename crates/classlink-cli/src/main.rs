//! classlink command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod session;

#[derive(Parser)]
#[command(
    name = "classlink",
    version,
    about = "Single-classroom attendance and gradebook keeper"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Session {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Start with the sample class loaded
        #[arg(long)]
        demo: bool,

        /// Also write dashboard.svg to the output directory when opening the dashboard
        #[arg(long)]
        save_dashboard: bool,
    },

    /// Print one report: attendance, grades or at-risk
    Report {
        /// Which report to print
        kind: String,

        /// Use the sample class
        #[arg(long)]
        demo: bool,

        /// Output format: text, table, markdown, json
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render the dashboard
    Dashboard {
        /// Use the sample class
        #[arg(long)]
        demo: bool,

        /// Output format: text, svg, html, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Output file (defaults to stdout for text, the output directory otherwise)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter classlink.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("classlink=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Session {
        config: None,
        demo: false,
        save_dashboard: false,
    });

    let result = match command {
        Commands::Session {
            config,
            demo,
            save_dashboard,
        } => commands::session::execute(config, demo, save_dashboard),
        Commands::Report {
            kind,
            demo,
            format,
            config,
        } => commands::report::execute(kind, demo, format, config),
        Commands::Dashboard {
            demo,
            format,
            output,
            config,
        } => commands::dashboard::execute(demo, format, output, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
