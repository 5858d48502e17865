mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "veta",
    version,
    about = "Copper ore assay analysis: grade tiers and weighted summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify assay files into grade tiers and print weighted summaries
    Analyze {
        /// Sulfide assay file (CSV or XLSX)
        #[arg(long, value_name = "FILE")]
        sulfide: Option<PathBuf>,

        /// Mixed-ore assay file (CSV or XLSX)
        #[arg(long, value_name = "FILE")]
        mixed: Option<PathBuf>,

        /// Custom JSON scheme file(s), overriding the builtin preset
        /// for the same material
        #[arg(short, long = "scheme", value_name = "FILE")]
        scheme: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show the below-cutoff row in the tier tables
        #[arg(long)]
        unclassified: bool,
    },
    /// Load an assay file into structured records (without classifying)
    Parse {
        /// Path to CSV or XLSX file
        input_file: PathBuf,

        /// Material type of the file: sulfide or mixed
        #[arg(short, long)]
        material: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Manage and inspect grade schemes
    Schemes {
        #[command(subcommand)]
        action: SchemesAction,
    },
}

#[derive(Subcommand)]
enum SchemesAction {
    /// List builtin schemes
    List,
    /// Explain a scheme in plain language
    Explain {
        /// Preset name (e.g., "sulfide")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom scheme file
    Validate {
        /// Path to JSON scheme file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            sulfide,
            mixed,
            scheme,
            output,
            unclassified,
        } => commands::analyze::run(sulfide, mixed, scheme, &output, unclassified),
        Commands::Parse {
            input_file,
            material,
            output,
            out,
        } => commands::parse::run(input_file, &material, &output, out),
        Commands::Schemes { action } => match action {
            SchemesAction::List => commands::schemes::list(),
            SchemesAction::Explain { preset } => commands::schemes::explain(&preset),
            SchemesAction::Schema => commands::schemes::schema(),
            SchemesAction::Validate { file } => commands::schemes::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
