//! Benchmarks for the reconcile and validation hot paths.
//!
//! Run with: cargo bench -p formwork

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use formwork::{FormController, Group, Node, Rule, SelectField, TextField};
use std::hint::black_box;

/// Build a form with `n` sections, each holding a text field and a
/// three-way multi-select group.
fn make_tree(n: usize) -> Vec<Node> {
    (0..n)
        .map(|i| {
            let mut group = Group::new().child(Node::from(
                TextField::new(format!("text{i}"))
                    .with_value(format!("value {i}"))
                    .with_required(true)
                    .with_rule(Rule::named("min:3")),
            ));
            for v in 0..3 {
                group = group.child(Node::from(
                    SelectField::checkbox(format!("tags{i}"), format!("v{v}"))
                        .with_multiselect(true)
                        .with_active(v == i % 3),
                ));
            }
            Node::from(group)
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("form/reconcile");

    for n in [5, 20, 100] {
        let tree = make_tree(n);
        group.bench_with_input(BenchmarkId::new("set_tree", n), &tree, |b, tree| {
            let mut form = FormController::new(tree.clone());
            b.iter(|| {
                form.set_tree(black_box(tree.clone()));
            });
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("form/validate");

    for n in [5, 20, 100] {
        let mut form = FormController::new(make_tree(n));
        group.bench_function(BenchmarkId::new("required", n), |b| {
            b.iter(|| black_box(form.validate()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile, bench_validate);
criterion_main!(benches);
