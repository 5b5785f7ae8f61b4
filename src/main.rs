//! # phyloxml
//!
//! Command-line tool for inspecting, converting and validating PhyloXML files.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize every phylogeny in a file
//! phyloxml info trees.xml
//!
//! # Rewrite with branch lengths as attributes
//! phyloxml convert trees.xml out.xml --branch-length attribute
//!
//! # Check structure and content
//! phyloxml validate trees.xml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
