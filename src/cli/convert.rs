use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use phyloxml::phyloxml::{BranchLengthMode, PhyloXmlParser, PhyloXmlWriter};
use phyloxml::validator::StructuralValidator;

use super::config::Config;

pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub branch_length: Option<BranchLengthMode>,
    pub compact: bool,
    pub tree: Option<usize>,
    pub config: Option<PathBuf>,
    pub validate: bool,
}

/// Re-serialize a PhyloXML file
pub fn run(options: ConvertOptions) -> Result<()> {
    let ConvertOptions {
        input,
        output,
        branch_length,
        compact,
        tree,
        config,
        validate,
    } = options;

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let file_config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    let mut writer_config = file_config.writer;
    if let Some(mode) = branch_length {
        writer_config.branch_length = mode;
    }
    if compact {
        writer_config.indent = 0;
    }
    let validate = validate || file_config.parser.validate.unwrap_or(false);

    info!("PhyloXML Converter");
    info!("==================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Branch lengths: {:?}", writer_config.branch_length);
    info!("Indent: {}", writer_config.indent);
    if validate {
        info!("Structural validation: enabled");
    }

    let mut parser = if validate {
        PhyloXmlParser::open_validated(&input, &StructuralValidator::new())
    } else {
        PhyloXmlParser::open(&input)
    }
    .with_context(|| format!("Failed to open {}", input.display()))?;

    let mut writer = PhyloXmlWriter::create(&output, writer_config)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    match tree {
        Some(index) => {
            let phylogeny = parser
                .tree_at(index)
                .context("Failed to parse input")?
                .with_context(|| format!("Input has no phylogeny at position {}", index))?;
            writer.write(&phylogeny).context("Failed to write phylogeny")?;
        }
        None => {
            while let Some(phylogeny) = parser.next_tree().context("Failed to parse input")? {
                writer
                    .write(&phylogeny)
                    .with_context(|| format!("Failed to write phylogeny {}", parser.trees_parsed() - 1))?;
            }
            writer
                .write_other(parser.other())
                .context("Failed to write trailing elements")?;
        }
    }

    let stats = writer.stats().clone();
    writer.finish().context("Failed to finalize output")?;

    info!("Conversion complete!");
    info!("  {}", stats);

    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        file_size,
        file_size as f64 / 1024.0 / 1024.0
    );

    Ok(())
}
