//! Vitrine command line
//!
//! Inspect facet counts for a product catalog, drive the filter session
//! against it, and outline the content blocks of a page.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use vitrine_facets::ProductOrder;
use vitrine_logging::{init_logging, LogConfig};

mod cli;

#[derive(Parser, Debug)]
#[command(name = "vitrine", about = "Faceted product filtering and content blocks")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute facet counts for a catalog under a selection
    Facets {
        /// Catalog JSON file (array of products)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Vocabulary TOML file (defaults to config, then the built-in vocabulary)
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Selected terms as Name=uid[,uid]. Can be specified multiple times.
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drive a filter session and print facets with the resulting page
    Browse {
        /// Catalog JSON file (array of products)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Vocabulary TOML file (defaults to config, then the built-in vocabulary)
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Selected terms as Name=uid[,uid]. Can be specified multiple times.
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// Page size (defaults to config `page_limit`)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Products to skip before the page starts
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Sort field: title, price, created_at, updated_at
        #[arg(long, default_value = "title")]
        order: ProductOrder,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the content-block outline of a page document
    Blocks {
        /// Page JSON file
        page: PathBuf,

        /// Output the typed blocks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved paths and configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli::config::VitrineConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:?}", err);
            return ExitCode::from(1);
        }
    };

    let mut log_config = LogConfig::new("vitrine");
    log_config.verbose = cli.verbose;
    log_config.default_filter = config.log_filter.as_deref();
    if let Err(err) = init_logging(log_config) {
        eprintln!("Warning: failed to initialize logging: {:?}", err);
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

fn run_command(cli: Cli, config: &cli::config::VitrineConfig) -> Result<()> {
    match cli.command {
        Commands::Facets {
            catalog,
            vocabulary,
            select,
            json,
        } => cli::facets::run(
            cli::facets::FacetsArgs {
                catalog,
                vocabulary,
                select,
                json,
            },
            config,
        ),

        Commands::Browse {
            catalog,
            vocabulary,
            select,
            limit,
            skip,
            order,
            desc,
            json,
        } => cli::browse::run(
            cli::browse::BrowseArgs {
                catalog,
                vocabulary,
                select,
                limit,
                skip,
                order,
                desc,
                json,
            },
            config,
        ),

        Commands::Blocks { page, json } => cli::blocks::run(cli::blocks::BlocksArgs { page, json }),

        Commands::Config { json } => cli::config::run(cli::config::ConfigArgs { json }, config),
    }
}
