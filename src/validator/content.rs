use log::debug;

use super::{ValidationCheck, ValidationReport};
use crate::phyloxml::diagnostics::{CollectingSink, WarningKind};
use crate::phyloxml::writer::check_phylogeny;
use crate::phyloxml::PhyloXmlParser;

/// Parse every phylogeny in `document` and record what was found
///
/// Trees are checked as they stream past; only their indices are kept.
pub(super) fn check_content(document: &[u8], report: &mut ValidationReport) {
    let mut parser = PhyloXmlParser::with_sink(document, CollectingSink::new());
    let mut parsed = 0usize;
    let mut rootless: Vec<usize> = Vec::new();
    let mut unwritable: Vec<String> = Vec::new();

    loop {
        match parser.next_tree() {
            Ok(Some(tree)) => {
                if tree.root_clade().is_none() {
                    rootless.push(parsed);
                }
                if let Err(e) = check_phylogeny(&tree) {
                    unwritable.push(format!("phylogeny {}: {}", parsed, e));
                }
                parsed += 1;
            }
            Ok(None) => break,
            Err(e) => {
                report.add_check(ValidationCheck::failed(
                    "Phylogenies parsed",
                    format!("Parsing stopped after {} phylogenies: {}", parsed, e),
                ));
                return;
            }
        }
    }
    debug!("Parsed {} phylogenies for validation", parsed);

    if parsed == 0 {
        report.add_check(ValidationCheck::warning(
            "Phylogenies parsed",
            "Document contains no <phylogeny> elements",
        ));
    } else {
        report.add_check(ValidationCheck::ok(format!("Phylogenies parsed ({})", parsed)));
    }

    let sink = parser.sink();
    match sink.warnings().first() {
        None => report.add_check(ValidationCheck::ok("No recoverable problems")),
        Some(first) => report.add_check(ValidationCheck::warning(
            "No recoverable problems",
            format!(
                "{} malformed, {} unrecognized; first: {}",
                sink.count(WarningKind::MalformedStructure),
                sink.count(WarningKind::UnrecognizedElement),
                first
            ),
        )),
    }

    if parsed > 0 {
        if rootless.is_empty() {
            report.add_check(ValidationCheck::ok("Every phylogeny has a root clade"));
        } else {
            report.add_check(ValidationCheck::warning(
                "Every phylogeny has a root clade",
                format!("Phylogenies without clades: {:?}", rootless),
            ));
        }
    }

    if unwritable.is_empty() {
        report.add_check(ValidationCheck::ok("Phylogenies can be written back"));
    } else {
        report.add_check(ValidationCheck::warning(
            "Phylogenies can be written back",
            unwritable.join("; "),
        ));
    }
}
