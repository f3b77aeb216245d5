//! Benchmarks for generation counting.
//!
//! Measures `classify` on synthetic trees where every couple has several
//! children and every child marries into the next generation, so descendants
//! are shared heavily between ancestors.

// Benchmark code - performance of the benchmark setup is not critical
#![allow(missing_docs)]
#![allow(clippy::cast_possible_wrap)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use elders::{
    ChildRow, FamilyId, FamilyRow, PersonId, PersonRow, SourceRows, Thresholds,
    UnknownMemberPolicy, classify,
};

const THRESHOLDS: Thresholds = Thresholds {
    max_generations: 4,
    max_age: 110,
    current_year: 2024,
};

/// `generations` layers of `width` persons each. Person `i` of a layer and
/// person `i + 1` form a couple whose children are three persons of the next
/// layer, wrapping around.
fn generate_tree(generations: usize, width: usize) -> SourceRows {
    let mut rows = SourceRows::default();
    let id = |layer: usize, i: usize| (layer * width + i) as i64;

    for layer in 0..generations {
        for i in 0..width {
            rows.persons.push(PersonRow {
                id: PersonId(id(layer, i)),
                living: true,
            });
        }
    }

    for layer in 0..generations.saturating_sub(1) {
        for i in 0..width {
            let family = FamilyId(id(layer, i));
            rows.families.push(FamilyRow {
                id: family,
                father: Some(PersonId(id(layer, i))),
                mother: Some(PersonId(id(layer, (i + 1) % width))),
            });
            for k in 0..3 {
                rows.children.push(ChildRow {
                    family,
                    child: PersonId(id(layer + 1, (i + k) % width)),
                });
            }
        }
    }

    rows
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for &(generations, width) in &[(10, 100), (50, 200), (200, 500)] {
        let rows = generate_tree(generations, width);
        group.throughput(Throughput::Elements(rows.persons.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{generations}x{width}")),
            &rows,
            |b, rows| {
                b.iter(|| {
                    classify(black_box(rows), &THRESHOLDS, UnknownMemberPolicy::Skip)
                        .expect("synthetic tree is acyclic")
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
