use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use phyloxml::phyloxml::BranchLengthMode;

mod config;
mod convert;
mod info;
mod validate;

/// phyloxml - Inspect, convert and validate PhyloXML files
#[derive(Parser)]
#[command(name = "phyloxml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where branch lengths are written.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BranchLengthArg {
    /// `branch_length` attribute on `<clade>`
    Attribute,
    /// `<branch_length>` child element
    Element,
}

impl From<BranchLengthArg> for BranchLengthMode {
    fn from(arg: BranchLengthArg) -> Self {
        match arg {
            BranchLengthArg::Attribute => BranchLengthMode::Attribute,
            BranchLengthArg::Element => BranchLengthMode::Element,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the phylogenies in a PhyloXML file
    Info {
        /// Input PhyloXML file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-serialize a PhyloXML file
    Convert {
        /// Input PhyloXML file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PhyloXML file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Branch length representation (default: element)
        #[arg(long, value_enum)]
        branch_length: Option<BranchLengthArg>,

        /// Write without indentation
        #[arg(long)]
        compact: bool,

        /// Only write the phylogeny at this zero-based position
        #[arg(long, value_name = "N")]
        tree: Option<usize>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Run structural validation before parsing
        #[arg(long)]
        validate: bool,
    },

    /// Validate PhyloXML file structure and content
    Validate {
        /// Input PhyloXML file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, json } => info::run(file, json),
        Commands::Convert {
            input,
            output,
            branch_length,
            compact,
            tree,
            config,
            validate,
        } => convert::run(convert::ConvertOptions {
            input,
            output,
            branch_length: branch_length.map(BranchLengthMode::from),
            compact,
            tree,
            config,
            validate,
        }),
        Commands::Validate { file } => validate::run(file),
    }
}
