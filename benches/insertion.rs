//! Benchmarks for the frame extraction pass
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use framesaver_rs::extraction::{ExtractionOptions, FrameExtractionInserter};
use framesaver_rs::workflow::{InputValue, Node, WorkflowGraph};

/// Chain of `size` nodes with a decode every 50 nodes and the reserved ids
/// partly occupied.
fn large_graph(size: usize) -> WorkflowGraph {
    let mut graph = WorkflowGraph::new();
    graph.add_node(Node::new(1u32, "KSampler")).unwrap();
    for i in 2..=size as u32 {
        let class = if i % 50 == 0 { "VAEDecode" } else { "ImageScaleBy" };
        graph
            .add_node(Node::new(i, class).with_input("image", InputValue::link(i - 1, 0)))
            .unwrap();
    }
    for id in 50000u32..50010 {
        graph.add_node(Node::new(id, "PrimitiveNode")).unwrap();
    }
    graph
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_extraction_insert");
    let inserter = FrameExtractionInserter::default();
    let options = ExtractionOptions::new().with_first().with_last().with_range(4, 12);

    for size in [100, 1_000, 10_000].iter() {
        let graph = large_graph(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                inserter.insert(black_box(&mut graph), black_box(&options)).unwrap();
                graph
            })
        });
    }

    group.finish();
}

fn bench_load_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("workflow_parse");

    for size in [100, 1_000, 10_000].iter() {
        let json = large_graph(*size).to_json_string_pretty().unwrap();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| WorkflowGraph::from_json_str(black_box(json)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_load_validate);
criterion_main!(benches);
