use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use phyloxml::phyloxml::{CollectingSink, Phylogeny, PhyloXmlParser};

#[derive(Debug, Serialize)]
struct FileSummary {
    file: String,
    phylogenies: Vec<TreeSummary>,
    other_elements: usize,
    warnings: usize,
}

#[derive(Debug, Serialize)]
struct TreeSummary {
    name: Option<String>,
    rooted: bool,
    clades: usize,
    leaves: usize,
    total_branch_length: f64,
}

impl From<&Phylogeny> for TreeSummary {
    fn from(tree: &Phylogeny) -> Self {
        Self {
            name: tree.name.clone(),
            rooted: tree.rooted,
            clades: tree.clade_count(),
            leaves: tree.tree.leaves().len(),
            total_branch_length: tree.total_distance(),
        }
    }
}

/// Display information about a PhyloXML file
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let handle = std::fs::File::open(&file).context("Failed to open file")?;
    let mut parser =
        PhyloXmlParser::with_sink(std::io::BufReader::new(handle), CollectingSink::new());

    let mut phylogenies = Vec::new();
    while let Some(tree) = parser
        .next_tree()
        .with_context(|| format!("Failed to parse {}", file.display()))?
    {
        phylogenies.push(TreeSummary::from(&tree));
    }

    let summary = FileSummary {
        file: file.display().to_string(),
        phylogenies,
        other_elements: parser.other().len(),
        warnings: parser.sink().warnings().len(),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
        return Ok(());
    }

    println!("PhyloXML File Information");
    println!("=========================");
    println!("File: {}", summary.file);
    println!();

    println!("Phylogenies: {}", summary.phylogenies.len());
    for (i, tree) in summary.phylogenies.iter().enumerate() {
        println!(
            "  {:3}. {} ({}, {} clades, {} leaves, total branch length {:.4})",
            i,
            tree.name.as_deref().unwrap_or("<unnamed>"),
            if tree.rooted { "rooted" } else { "unrooted" },
            tree.clades,
            tree.leaves,
            tree.total_branch_length
        );
    }
    println!();

    println!("Other elements: {}", summary.other_elements);
    println!("Warnings: {}", summary.warnings);
    if summary.warnings > 0 {
        for warning in parser.sink().warnings() {
            println!("  - {}", warning);
        }
    }

    Ok(())
}
