use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgexpr::{Node, QueryBuilder, RendererConfig, Table, render};

/// Build a predicate with `n` conjuncts:
/// "t"."col0" = 0 AND ("t"."col1" IS NULL OR "t"."col1" <= 'x') AND ...
fn build_predicate(n: usize) -> Node {
    let qb = QueryBuilder::new(Table::new("t"));
    let mut node = qb.attr("col0").eq(0);
    for i in 1..n {
        let col = format!("col{i}");
        let clause = if i % 2 == 0 {
            qb.attr(col.as_str()).in_list([1, 2, 3])
        } else {
            qb.date_null_or_before(col.as_str(), "2024-01-01")
        };
        node = node.and(clause);
    }
    node
}

fn bench_render(c: &mut Criterion) {
    let cfg = RendererConfig::postgres();
    let mut group = c.benchmark_group("render/predicate");

    for n in [1, 5, 10, 50, 100] {
        let node = build_predicate(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &node, |b, node| {
            b.iter(|| black_box(render(node, &cfg)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let cfg = RendererConfig::postgres();
    let mut group = c.benchmark_group("render/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let node = build_predicate(n);
                black_box(render(&node, &cfg));
            });
        });
    }

    group.finish();
}

fn bench_extension_dispatch(c: &mut Criterion) {
    let cfg = RendererConfig::postgres();
    let path: Vec<String> = (0..16).map(|i| format!("k{i}")).collect();
    let node = {
        use pgexpr::JsonPredications;
        Node::column("t", "doc")
            .json_get_by_path(&cfg, path)
            .unwrap_or_else(|_| Node::raw("NULL"))
    };

    c.bench_function("render/json_path_16", |b| {
        b.iter(|| black_box(render(&node, &cfg)));
    });
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_extension_dispatch
);
criterion_main!(benches);
