//! Stitch CLI - Command-line interface for crochet patterns

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, schema, validate};
use stitch_schema::Mode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stitch")]
#[command(about = "Validate and generate crochet patterns", long_about = None)]
#[command(version)]
struct Cli {
    /// Log pipeline stages and rule firings to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and check a pattern file
    Validate {
        /// Path to pattern JSON ("-" reads stdin)
        file: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,
    },

    /// Show the pattern contract
    Schema {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Generate a pattern from a photo
    Generate {
        /// Path to the image file
        #[arg(long, required_unless_present = "image_url", conflicts_with = "image_url")]
        image: Option<String>,

        /// URL to download the image from
        #[arg(long)]
        image_url: Option<String>,

        /// Generation mode (instant or exact)
        #[arg(long, default_value = "instant", value_parser = parse_mode)]
        mode: Mode,

        /// Provider to use (defaults to the configured provider)
        #[arg(long)]
        provider: Option<String>,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    Mode::from_wire(s).ok_or_else(|| {
        format!(
            "unknown mode '{}'; valid values: {}",
            s,
            Mode::ALL.join(", ")
        )
    })
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate {
            file,
            format,
            config,
        } => validate::run(validate::ValidateArgs {
            file,
            format,
            config,
        }),
        Commands::Schema { format } => schema::run(&format),
        Commands::Generate {
            image,
            image_url,
            mode,
            provider,
            config,
        } => generate::run(generate::GenerateArgs {
            image,
            image_url,
            mode,
            provider,
            config,
        }),
    }
}
