#![no_main]

use libfuzzer_sys::fuzz_target;
use phyloxml::phyloxml::{CollectingSink, PhyloXmlParser, WriterConfig};
use phyloxml::validator::{SchemaValidator, StructuralValidator};

fuzz_target!(|data: &[u8]| {
    // Structural validation must reject or accept, never panic
    let _ = StructuralValidator::new().validate(data);

    let mut parser = PhyloXmlParser::with_sink(data, CollectingSink::new());
    let mut trees = Vec::new();

    // Bounded so pathological inputs cannot loop forever
    for _ in 0..100 {
        match parser.next_tree() {
            Ok(Some(tree)) => trees.push(tree),
            Ok(None) | Err(_) => break,
        }
    }

    // Whatever was parsed must either write out or be rejected cleanly
    let _ = phyloxml::phyloxml::writer::to_string(&trees, WriterConfig::compact());
});
