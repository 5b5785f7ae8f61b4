use std::io::{BufReader, Cursor};
use std::sync::Arc;

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use phyloxml::phyloxml::{PhyloXmlParser, PhyloXmlWriter, WriterConfig};

/// Balanced binary clade of the given depth with taxonomy on every leaf
fn push_clade(xml: &mut String, depth: usize, label: &mut usize) {
    xml.push_str("<clade>");
    if depth == 0 {
        *label += 1;
        xml.push_str(&format!(
            r#"<name>leaf_{0}</name><branch_length>0.{0}</branch_length><confidence type="bootstrap">{1}</confidence><taxonomy><code>TAX{0}</code><scientific_name>Species {0}</scientific_name></taxonomy>"#,
            label,
            *label % 100
        ));
    } else {
        xml.push_str("<branch_length>0.05</branch_length>");
        push_clade(xml, depth - 1, label);
        push_clade(xml, depth - 1, label);
    }
    xml.push_str("</clade>");
}

fn generate_test_forest(num_trees: usize, depth: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<phyloxml xmlns="http://www.phyloxml.org">"#,
    );

    for i in 0..num_trees {
        xml.push_str(&format!(
            r#"
  <phylogeny rooted="true"><name>tree_{}</name>"#,
            i
        ));
        let mut label = 0;
        push_clade(&mut xml, depth, &mut label);
        xml.push_str("</phylogeny>");
    }

    xml.push_str("\n</phyloxml>");
    xml.into_bytes()
}

fn bench_next_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("phyloxml_next_tree");
    let depth = 8;
    let clades_per_tree = (1usize << (depth + 1)) - 1;

    for num_trees in [10, 50, 100] {
        let xml_bytes = Arc::new(generate_test_forest(num_trees, depth));

        group.throughput(Throughput::Elements((num_trees * clades_per_tree) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_trees),
            &xml_bytes,
            |b, bytes| {
                b.iter_batched(
                    || PhyloXmlParser::new(BufReader::new(Cursor::new(bytes.to_vec()))),
                    |mut parser| {
                        let mut count = 0usize;
                        while let Some(tree) = parser.next_tree().unwrap() {
                            count += tree.clade_count();
                        }
                        black_box(count);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_write_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("phyloxml_write");
    let depth = 8;

    for num_trees in [10, 50] {
        let trees: Vec<_> = PhyloXmlParser::new(Cursor::new(generate_test_forest(num_trees, depth)))
            .into_trees()
            .collect::<Result<_, _>>()
            .unwrap();
        let clades: usize = trees.iter().map(|tree| tree.clade_count()).sum();

        group.throughput(Throughput::Elements(clades as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_trees), &trees, |b, trees| {
            b.iter(|| {
                let mut writer =
                    PhyloXmlWriter::new(Vec::with_capacity(1 << 20), WriterConfig::default())
                        .unwrap();
                writer.write_all(trees).unwrap();
                black_box(writer.finish().unwrap().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_next_tree, bench_write_forest);
criterion_main!(benches);
