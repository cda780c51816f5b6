//! Benchmarks for rendering large hierarchies.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use navtree_model::{Forest, Node};
use navtree_renderer::{HtmlBackend, Renderer, TextBackend, parse_html};

/// Create a forest with specified depth and breadth.
fn create_forest(depth: usize, breadth: usize) -> Forest {
    fn create_level(
        prefix: &str,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) -> Vec<Node> {
        if current_depth > max_depth {
            return Vec::new();
        }
        (0..breadth)
            .map(|i| {
                let label = format!("{prefix}::Class{i}");
                let link = format!("class_{}.html", label.to_lowercase().replace("::", "_1_1_"));
                Node::new(label.clone())
                    .with_link(link)
                    .with_children(create_level(&label, current_depth + 1, max_depth, breadth))
            })
            .collect()
    }

    Forest::new(create_level("Root", 0, depth, breadth)).unwrap()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for (depth, breadth) in [(2, 10), (4, 5), (6, 3)] {
        let forest = create_forest(depth, breadth);
        let renderer = Renderer::new();

        group.bench_with_input(
            BenchmarkId::new("tree", format!("{depth}x{breadth}")),
            &forest,
            |b, forest| b.iter(|| renderer.render(black_box(forest))),
        );

        let tree = renderer.render(&forest).tree;
        group.bench_with_input(
            BenchmarkId::new("html", format!("{depth}x{breadth}")),
            &tree,
            |b, tree| b.iter(|| renderer.write::<HtmlBackend>(black_box(tree))),
        );
        group.bench_with_input(
            BenchmarkId::new("text", format!("{depth}x{breadth}")),
            &tree,
            |b, tree| b.iter(|| renderer.write::<TextBackend>(black_box(tree))),
        );
    }

    group.finish();
}

fn bench_parse_html(c: &mut Criterion) {
    let forest = create_forest(4, 5);
    let renderer = Renderer::new();
    let html = renderer.write::<HtmlBackend>(&renderer.render(&forest).tree);

    c.bench_function("parse_html_4x5", |b| b.iter(|| parse_html(black_box(&html))));
}

criterion_group!(benches, bench_render, bench_parse_html);
criterion_main!(benches);
