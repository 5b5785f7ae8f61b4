//! Property-based round trips through the writer and the parser
//!
//! Random trees are written in both branch length representations and read
//! back; the two documents must describe the same tree.

use phyloxml::phyloxml::models::{Clade, Confidence, Phylogeny};
use phyloxml::phyloxml::writer::to_string;
use phyloxml::phyloxml::{BranchLengthMode, PhyloXmlParser, WriterConfig};
use proptest::prelude::*;

/// One generated clade: parent selector, branch length, name, bootstrap
type CladeShape = (usize, Option<f64>, Option<String>, Option<f64>);

fn clade_strategy() -> impl Strategy<Value = CladeShape> {
    (
        any::<usize>(),
        prop::option::of(0.0f64..10.0),
        prop::option::of("[A-Za-z0-9_<>&'\"]{1,12}"),
        prop::option::of(0.0f64..100.0),
    )
}

/// Clade `i` hangs below clade `selector % i`, so every shape list is a tree
fn build_phylogeny(name: Option<String>, rooted: bool, shapes: &[CladeShape]) -> Phylogeny {
    let mut phylogeny = Phylogeny {
        name,
        rooted,
        ..Default::default()
    };

    for (i, (selector, distance, clade_name, bootstrap)) in shapes.iter().enumerate() {
        let clade = Clade {
            name: clade_name.clone(),
            confidences: bootstrap
                .map(|value| vec![Confidence::new("bootstrap", value)])
                .unwrap_or_default(),
            ..Default::default()
        };
        let index = phylogeny.tree.add_node(clade);
        if i == 0 {
            phylogeny.tree.set_root(index).unwrap();
        } else {
            phylogeny
                .tree
                .add_edge(selector % i, index, *distance)
                .unwrap();
        }
    }
    phylogeny
}

fn read_back(document: &str) -> Vec<Phylogeny> {
    PhyloXmlParser::from_str(document)
        .into_trees()
        .collect::<Result<_, _>>()
        .unwrap()
}

/// Compare two phylogenies clade by clade in preorder, ignoring arena layout
fn same_tree(expected: &Phylogeny, actual: &Phylogeny) -> Result<(), TestCaseError> {
    prop_assert_eq!(&expected.name, &actual.name);
    prop_assert_eq!(expected.rooted, actual.rooted);

    let expected_order = expected.tree.preorder();
    let actual_order = actual.tree.preorder();
    prop_assert_eq!(expected_order.len(), actual_order.len());
    for (&e, &a) in expected_order.iter().zip(&actual_order) {
        prop_assert_eq!(&expected.tree[e], &actual.tree[a]);
        prop_assert_eq!(
            expected.tree.parent_edge(e).and_then(|edge| edge.distance),
            actual.tree.parent_edge(a).and_then(|edge| edge.distance)
        );
        prop_assert_eq!(expected.tree.child_count(e), actual.tree.child_count(a));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Attribute and element branch lengths read back to the same tree
    #[test]
    fn prop_branch_length_representations_agree(
        shapes in prop::collection::vec(clade_strategy(), 1..40),
        rooted in any::<bool>(),
    ) {
        let original = build_phylogeny(Some("random".to_string()), rooted, &shapes);
        let trees = std::slice::from_ref(&original);

        let as_attribute = to_string(
            trees,
            WriterConfig::with_branch_length(BranchLengthMode::Attribute),
        ).unwrap();
        let as_element = to_string(
            trees,
            WriterConfig::with_branch_length(BranchLengthMode::Element),
        ).unwrap();

        prop_assert!(!as_attribute.contains("<branch_length>"));
        prop_assert!(!as_element.contains("branch_length=\""));

        let from_attribute = read_back(&as_attribute);
        let from_element = read_back(&as_element);
        prop_assert_eq!(from_attribute.len(), 1);
        prop_assert_eq!(from_element.len(), 1);
        same_tree(&original, &from_attribute[0])?;
        same_tree(&original, &from_element[0])?;
        prop_assert_eq!(
            from_attribute[0].total_distance().to_bits(),
            from_element[0].total_distance().to_bits()
        );
    }

    /// Writing a parsed document again reproduces it byte for byte
    #[test]
    fn prop_rewrite_is_stable(
        forest in prop::collection::vec(prop::collection::vec(clade_strategy(), 1..20), 0..4),
        compact in any::<bool>(),
    ) {
        let trees: Vec<Phylogeny> = forest
            .iter()
            .enumerate()
            .map(|(i, shapes)| build_phylogeny(Some(format!("tree {}", i)), i % 2 == 0, shapes))
            .collect();
        let config = if compact { WriterConfig::compact() } else { WriterConfig::default() };

        let first = to_string(&trees, config.clone()).unwrap();
        let parsed = read_back(&first);
        prop_assert_eq!(parsed.len(), trees.len());
        for (expected, actual) in trees.iter().zip(&parsed) {
            same_tree(expected, actual)?;
        }

        let second = to_string(&parsed, config).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Arbitrary bytes never panic the parser
    #[test]
    fn prop_parser_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let parser = PhyloXmlParser::new(bytes.as_slice());
        for tree in parser.into_trees().take(16) {
            if tree.is_err() {
                break;
            }
        }
    }
}
