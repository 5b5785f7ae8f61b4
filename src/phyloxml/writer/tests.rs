use super::*;
use crate::phyloxml::diagnostics::{CollectingSink, WarningKind};
use crate::phyloxml::models::{Accession, Confidence, Property, Sequence, Taxonomy};
use crate::phyloxml::PhyloXmlParser;

const FULL_FEATURED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<phyloxml xmlns="http://www.phyloxml.org">
  <phylogeny rooted="true" rerootable="false" branch_length_unit="substitutions" type="gene_tree">
    <name>full featured</name>
    <id provider="treebase">T1</id>
    <description>every element at least once</description>
    <date>2009-09-01</date>
    <confidence type="probability">0.9</confidence>
    <clade id_source="root">
      <name>root</name>
      <width>2.5</width>
      <color><red>255</red><green>0</green><blue>10</blue></color>
      <node_id provider="local">n0</node_id>
      <events>
        <type>speciation_or_duplication</type>
        <duplications>1</duplications>
        <speciations>2</speciations>
        <losses>0</losses>
        <confidence type="bootstrap">70</confidence>
      </events>
      <date unit="mya" range="30">
        <desc>Silurian</desc>
        <value>425</value>
        <minimum>416</minimum>
        <maximum>443.7</maximum>
      </date>
      <clade branch_length="0.25">
        <name>Octopus</name>
        <confidence type="bootstrap">89</confidence>
        <taxonomy id_source="tax0">
          <id provider="ncbi">6645</id>
          <code>OCTVU</code>
          <scientific_name>Octopus vulgaris</scientific_name>
          <authority>Cuvier, 1797</authority>
          <common_name>common octopus</common_name>
          <common_name>pulpo</common_name>
          <synonym>Octopus octopodia</synonym>
          <rank>species</rank>
          <uri desc="wiki" type="text/html">http://en.wikipedia.org/wiki/Octopus_vulgaris</uri>
        </taxonomy>
        <sequence type="protein" id_source="seq0">
          <symbol>ADHX</symbol>
          <accession source="UniProtKB">P81431</accession>
          <name>Alcohol dehydrogenase class-3</name>
          <location>chr1</location>
          <mol_seq is_aligned="true">TDATGKPIKCMAAIAWEAKKPLSIEEVEVAPPKSGEVRIKILHSGVCHTD</mol_seq>
          <uri>http://www.uniprot.org/uniprot/P81431</uri>
          <annotation ref="GO:0005829" source="GO" evidence="IEA" type="cellular component">
            <desc>cytosol</desc>
            <confidence type="probability">0.5</confidence>
            <property ref="NOAA:depth" datatype="xsd:integer" applies_to="annotation" unit="METRIC:m">1200</property>
            <uri>http://amigo.geneontology.org</uri>
          </annotation>
          <domain_architecture length="376">
            <domain from="6" to="90" confidence="7.0E-26" id="d1">Adh_N</domain>
            <domain from="109" to="231" confidence="3.0E-4">Adh_C</domain>
          </domain_architecture>
        </sequence>
        <binary_characters type="parsimony inferred" gained_count="2" lost_count="1" present_count="2">
          <gained><bc>Cofilin_ADF</bc><bc>Gelsolin</bc></gained>
          <lost><bc>Ets</bc></lost>
          <present><bc>Cofilin_ADF</bc><bc>Gelsolin</bc></present>
        </binary_characters>
        <distribution>
          <desc>Mediterranean</desc>
          <point geodetic_datum="WGS84" alt_unit="m"><lat>32.88</lat><long>-117.25</long><alt>-50</alt></point>
          <polygon>
            <point geodetic_datum="WGS84"><lat>1</lat><long>2</long></point>
            <point geodetic_datum="WGS84"><lat>3</lat><long>4</long></point>
            <point geodetic_datum="WGS84"><lat>5</lat><long>6</long></point>
          </polygon>
        </distribution>
        <reference doi="10.1093/bioinformatics/btp564"><desc>Han and Zmasek</desc></reference>
        <property ref="custom:note" datatype="xsd:string" applies_to="clade">A &amp; B</property>
      </clade>
      <clade branch_length="0.5">
        <name>Nautilus</name>
      </clade>
    </clade>
    <clade_relation id_ref_0="a" id_ref_1="b" distance="0.5" type="network_connection">
      <confidence type="bootstrap">50</confidence>
    </clade_relation>
    <sequence_relation id_ref_0="s1" id_ref_1="s2" type="orthology"/>
    <property ref="custom:count" datatype="xsd:integer" applies_to="phylogeny">7</property>
  </phylogeny>
</phyloxml>"#;

fn parse_all(document: &str) -> Vec<Phylogeny> {
    PhyloXmlParser::from_str(document)
        .into_trees()
        .collect::<Result<_, _>>()
        .unwrap()
}

/// root -> (A: 0.1, B: 0.2)
fn small_tree() -> Phylogeny {
    let mut phylogeny = Phylogeny::new();
    phylogeny.name = Some("example".to_string());
    phylogeny.rooted = true;
    let root = phylogeny.tree.add_node(Clade::default());
    phylogeny.tree.set_root(root).unwrap();
    let a = phylogeny.tree.add_node(Clade::named("A"));
    let b = phylogeny.tree.add_node(Clade::named("B"));
    phylogeny.tree.add_edge(root, a, Some(0.1)).unwrap();
    phylogeny.tree.add_edge(root, b, Some(0.2)).unwrap();
    phylogeny
}

fn assert_same_trees(expected: &Phylogeny, actual: &Phylogeny) {
    assert_eq!(expected.name, actual.name);
    assert_eq!(expected.id, actual.id);
    assert_eq!(expected.description, actual.description);
    assert_eq!(expected.date, actual.date);
    assert_eq!(expected.rooted, actual.rooted);
    assert_eq!(expected.rerootable, actual.rerootable);
    assert_eq!(expected.branch_length_unit, actual.branch_length_unit);
    assert_eq!(expected.phylogeny_type, actual.phylogeny_type);
    assert_eq!(expected.confidences, actual.confidences);
    assert_eq!(expected.properties, actual.properties);
    assert_eq!(expected.clade_relations, actual.clade_relations);
    assert_eq!(expected.sequence_relations, actual.sequence_relations);

    let expected_order = expected.tree.preorder();
    let actual_order = actual.tree.preorder();
    assert_eq!(expected_order.len(), actual_order.len());
    for (&e, &a) in expected_order.iter().zip(&actual_order) {
        assert_eq!(expected.tree[e], actual.tree[a]);
        assert_eq!(
            expected.tree.parent_edge(e).and_then(|edge| edge.distance),
            actual.tree.parent_edge(a).and_then(|edge| edge.distance)
        );
        assert_eq!(expected.tree.child_count(e), actual.tree.child_count(a));
    }
}

#[test]
fn test_document_layout() {
    let output = to_string(&[small_tree()], WriterConfig::default()).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    assert!(lines[1].starts_with("<phyloxml "));
    assert!(lines[1].contains(r#"xmlns="http://www.phyloxml.org""#));
    assert!(lines[1].contains("xsi:schemaLocation="));
    assert_eq!(lines[2], r#"  <phylogeny rooted="true">"#);
    assert_eq!(lines[3], "    <name>example</name>");
    assert_eq!(lines[4], "    <clade>");
    assert_eq!(lines[5], "      <clade>");
    assert_eq!(lines[6], "        <name>A</name>");
    assert_eq!(lines[7], "        <branch_length>0.1</branch_length>");
    assert_eq!(lines.last(), Some(&"</phyloxml>"));
}

#[test]
fn test_stats() {
    let mut writer = PhyloXmlWriter::new(Vec::new(), WriterConfig::default()).unwrap();
    writer.write(&small_tree()).unwrap();
    writer.write(&small_tree()).unwrap();

    assert_eq!(
        writer.stats(),
        &WriterStats {
            trees_written: 2,
            clades_written: 6,
            other_written: 0,
        }
    );
    let output = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert_eq!(output.matches("<phylogeny ").count(), 2);
}

#[test]
fn test_branch_length_as_attribute() {
    let config = WriterConfig::with_branch_length(BranchLengthMode::Attribute);
    let output = to_string(&[small_tree()], config).unwrap();

    assert!(output.contains(r#"<clade branch_length="0.1">"#));
    assert!(output.contains(r#"<clade branch_length="0.2">"#));
    assert!(!output.contains("<branch_length>"));

    let trees = parse_all(&output);
    assert!((trees[0].total_distance() - 0.3).abs() < 1e-12);
}

#[test]
fn test_branch_length_as_element() {
    let output = to_string(&[small_tree()], WriterConfig::default()).unwrap();

    assert!(output.contains("<branch_length>0.2</branch_length>"));
    assert!(!output.contains("branch_length=\""));

    let trees = parse_all(&output);
    assert!((trees[0].total_distance() - 0.3).abs() < 1e-12);
}

#[test]
fn test_compact_output_is_one_line() {
    let output = to_string(&[small_tree()], WriterConfig::compact()).unwrap();
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("<clade><clade><name>A</name>"));
}

#[test]
fn test_round_trip_preserves_every_field() {
    let original = parse_all(FULL_FEATURED);
    assert_eq!(original.len(), 1);

    for mode in [BranchLengthMode::Element, BranchLengthMode::Attribute] {
        let output = to_string(&original, WriterConfig::with_branch_length(mode)).unwrap();
        let reparsed = parse_all(&output);
        assert_eq!(reparsed.len(), 1);
        assert_same_trees(&original[0], &reparsed[0]);
    }
}

#[test]
fn test_round_trip_output_is_stable() {
    let first = to_string(&parse_all(FULL_FEATURED), WriterConfig::default()).unwrap();
    let second = to_string(&parse_all(&first), WriterConfig::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_escapes_text_and_attributes() {
    let mut phylogeny = small_tree();
    phylogeny.name = Some("A & B <x>".to_string());
    phylogeny.properties.push(Property {
        reference: Some("custom:\"quoted\"".to_string()),
        datatype: Some("xsd:string".to_string()),
        applies_to: Some("phylogeny".to_string()),
        value: "1 < 2".to_string(),
        ..Default::default()
    });

    let output = to_string(&[phylogeny], WriterConfig::default()).unwrap();
    assert!(output.contains("<name>A &amp; B &lt;x&gt;</name>"));
    assert!(output.contains("1 &lt; 2"));

    let trees = parse_all(&output);
    assert_eq!(trees[0].name.as_deref(), Some("A & B <x>"));
    assert_eq!(trees[0].properties[0].value, "1 < 2");
    assert_eq!(
        trees[0].properties[0].reference.as_deref(),
        Some("custom:\"quoted\"")
    );
}

#[test]
fn test_content_less_elements_are_empty_tags() {
    let mut phylogeny = small_tree();
    phylogeny.properties.push(Property {
        reference: Some("custom:flag".to_string()),
        datatype: Some("xsd:string".to_string()),
        applies_to: Some("phylogeny".to_string()),
        ..Default::default()
    });
    let leaf = phylogeny.clade_by_name("B").unwrap();
    phylogeny.tree[leaf].name = None;

    let output = to_string(&[phylogeny], WriterConfig::default()).unwrap();
    assert!(output
        .contains(r#"<property ref="custom:flag" datatype="xsd:string" applies_to="phylogeny"/>"#));
    assert!(!output.contains("<clade/>"));
    assert!(output.contains("<branch_length>0.2</branch_length>"));
}

#[test]
fn test_phylogeny_without_clades() {
    let mut phylogeny = Phylogeny::new();
    phylogeny.rooted = false;
    let output = to_string(&[phylogeny], WriterConfig::default()).unwrap();
    assert!(output.contains(r#"<phylogeny rooted="false"/>"#));

    let trees = parse_all(&output);
    assert_eq!(trees.len(), 1);
    assert!(trees[0].root_clade().is_none());
}

#[test]
fn test_missing_required_field_writes_nothing() {
    let mut bad = small_tree();
    let a = bad.clade_by_name("A").unwrap();
    bad.tree[a].sequences.push(Sequence {
        accession: Some(Accession {
            source: None,
            value: "P81431".to_string(),
        }),
        ..Default::default()
    });

    let mut writer = PhyloXmlWriter::new(Vec::new(), WriterConfig::default()).unwrap();
    let err = writer.write(&bad).unwrap_err();
    assert!(matches!(
        err,
        WriteError::RequiredFieldMissing {
            element: "accession",
            field: "source"
        }
    ));

    writer.write(&small_tree()).unwrap();
    assert_eq!(writer.stats().trees_written, 1);

    let output = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert!(!output.contains("<accession"));
    assert_eq!(output.matches("<phylogeny").count(), 1);
    assert_eq!(parse_all(&output).len(), 1);
}

#[test]
fn test_missing_confidence_type() {
    let mut bad = small_tree();
    bad.confidences.push(Confidence {
        confidence_type: None,
        value: 1.0,
    });
    let err = check_phylogeny(&bad).unwrap_err();
    assert!(matches!(
        err,
        WriteError::RequiredFieldMissing {
            element: "confidence",
            field: "type"
        }
    ));
}

#[test]
fn test_pattern_violations() {
    let mut bad_symbol = small_tree();
    let a = bad_symbol.clade_by_name("A").unwrap();
    bad_symbol.tree[a].sequences.push(Sequence {
        symbol: Some("far too long symbol".to_string()),
        ..Default::default()
    });
    match check_phylogeny(&bad_symbol) {
        Err(WriteError::PatternViolation { element, value, .. }) => {
            assert_eq!(element, "symbol");
            assert_eq!(value, "far too long symbol");
        }
        other => panic!("expected a pattern violation, got {:?}", other),
    }

    let mut bad_code = small_tree();
    let b = bad_code.clade_by_name("B").unwrap();
    let mut taxonomy = Taxonomy::with_scientific_name("Octopus vulgaris");
    taxonomy.names.code = Some("OCT VU".to_string());
    bad_code.tree[b].taxonomies.push(taxonomy);
    assert!(matches!(
        check_phylogeny(&bad_code),
        Err(WriteError::PatternViolation { element: "code", .. })
    ));

    let mut bad_mol_seq = small_tree();
    bad_mol_seq.tree[a].sequences.push(Sequence {
        mol_seq: Some("ACGT 1234".to_string()),
        ..Default::default()
    });
    assert!(matches!(
        check_phylogeny(&bad_mol_seq),
        Err(WriteError::PatternViolation { element: "mol_seq", .. })
    ));
}

#[test]
fn test_out_of_set_values_are_written_with_warning() {
    let mut phylogeny = small_tree();
    let a = phylogeny.clade_by_name("A").unwrap();
    let mut taxonomy = Taxonomy::with_scientific_name("Octopus vulgaris");
    taxonomy.names.rank = Some("tribe-ish".to_string());
    phylogeny.tree[a].taxonomies.push(taxonomy);
    phylogeny.tree[a].sequences.push(Sequence {
        seq_type: Some("peptide".to_string()),
        ..Default::default()
    });

    let mut writer =
        PhyloXmlWriter::with_sink(Vec::new(), WriterConfig::default(), CollectingSink::new())
            .unwrap();
    writer.write(&phylogeny).unwrap();

    assert_eq!(writer.sink().count(WarningKind::MalformedStructure), 2);
    let output = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert!(output.contains("<rank>tribe-ish</rank>"));
    assert!(output.contains(r#"<sequence type="peptide"/>"#));
}

#[test]
fn test_write_other_elements() {
    let document = r#"<phyloxml xmlns="http://www.phyloxml.org">
  <phylogeny rooted="true"><clade><name>A</name></clade></phylogeny>
  <align:alignment xmlns:align="http://example.org/align">
    <seq name="A">acgtcgcggcccgtggaagtcctctcct</seq>
    <seq name="B">aggtcgcggcctgtggaagtcctctcct</seq>
  </align:alignment>
  <marker/>
</phyloxml>"#;

    let mut parser = PhyloXmlParser::from_str(document);
    let trees: Vec<Phylogeny> = parser.trees().collect::<Result<_, _>>().unwrap();
    assert_eq!(parser.other().len(), 2);

    let mut writer = PhyloXmlWriter::new(Vec::new(), WriterConfig::default()).unwrap();
    writer.write_all(&trees).unwrap();
    writer.write_other(parser.other()).unwrap();
    assert_eq!(writer.stats().other_written, 2);

    let output = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert!(output.contains(r#"xmlns:align="http://example.org/align""#));
    assert!(output.contains(r#"<seq name="A">acgtcgcggcccgtggaagtcctctcct</seq>"#));
    assert!(output.contains("<marker/>"));

    let mut reparsed = PhyloXmlParser::from_str(&output);
    assert_eq!(reparsed.trees().count(), 1);
    assert_eq!(reparsed.other(), parser.other());
}

#[test]
fn test_mixed_content_round_trips_in_order() {
    let document = r#"<phyloxml xmlns="http://www.phyloxml.org">
  <ext:note xmlns:ext="urn:vendor">first <ext:b>bold &amp; bright</ext:b> last</ext:note>
</phyloxml>"#;
    let mut parser = PhyloXmlParser::from_str(document);
    assert!(parser.next_tree().unwrap().is_none());

    for config in [WriterConfig::default(), WriterConfig::compact()] {
        let mut writer = PhyloXmlWriter::new(Vec::new(), config).unwrap();
        writer.write_other(parser.other()).unwrap();
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(output.contains(
            r#"<ext:note xmlns:ext="urn:vendor">first <ext:b>bold &amp; bright</ext:b> last</ext:note>"#
        ));

        let mut reparsed = PhyloXmlParser::from_str(&output);
        assert!(reparsed.next_tree().unwrap().is_none());
        assert_eq!(reparsed.other(), parser.other());
    }
}

#[test]
fn test_deep_tree_does_not_recurse() {
    const DEPTH: usize = 50_000;

    let mut phylogeny = Phylogeny::new();
    phylogeny.rooted = true;
    let mut parent = phylogeny.tree.add_node(Clade::named("0"));
    phylogeny.tree.set_root(parent).unwrap();
    for i in 1..DEPTH {
        let child = phylogeny.tree.add_node(Clade::named(i.to_string()));
        phylogeny.tree.add_edge(parent, child, Some(1.0)).unwrap();
        parent = child;
    }

    let output = to_string(&[phylogeny], WriterConfig::compact()).unwrap();
    let trees = parse_all(&output);
    assert_eq!(trees[0].clade_count(), DEPTH);
    assert_eq!(trees[0].total_distance(), (DEPTH - 1) as f64);
}
