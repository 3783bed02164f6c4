// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Benchmarks for group lookup and navigation

use configurator_nav::lookup::{find_group_by_id, find_parent_group, flatten_groups};
use configurator_nav::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

/// `width` top-level groups, each with `width` children
fn make_configuration(width: usize) -> Configuration {
    let groups = (0..width)
        .map(|i| {
            let children = (0..width)
                .map(|j| Group::new(format!("g{i}-{j}"), format!("Group {i}.{j}")))
                .collect();
            Group::new(format!("g{i}"), format!("Group {i}")).with_sub_groups(children)
        })
        .collect();
    Configuration::new(Owner::product("BENCH"), groups)
}

// ============================================================================
// Benchmark: Tree Lookup
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for width in [4, 16, 64] {
        let configuration = make_configuration(width);
        let last = format!("g{}-{}", width - 1, width - 1);

        group.bench_with_input(BenchmarkId::new("find_last", width), &last, |b, id| {
            b.iter(|| black_box(find_group_by_id(&configuration.groups, Some(id))));
        });
        group.bench_with_input(BenchmarkId::new("parent_of_last", width), &last, |b, id| {
            b.iter(|| black_box(find_parent_group(&configuration.groups, id)));
        });
        group.bench_function(BenchmarkId::new("flatten", width), |b| {
            b.iter(|| black_box(flatten_groups(&configuration.groups)));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Navigation Through The Store
// ============================================================================

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    let rt = tokio::runtime::Runtime::new().unwrap();

    let configuration = make_configuration(16);
    let owner = configuration.owner.clone();
    let store = Arc::new(MemoryStore::with_configurations([configuration.clone()]));
    let nav = ConfiguratorGroups::new(Arc::clone(&store));
    let targets: Vec<String> = configuration
        .flat_groups
        .iter()
        .map(|g| g.id.clone())
        .collect();

    group.bench_function("next_group_id", |b| {
        b.iter(|| black_box(nav.get_next_group_id(&owner).latest()));
    });

    group.bench_function("navigate_to_group", |b| {
        let (nav, configuration, targets) = (&nav, &configuration, &targets);
        let mut index = 0;
        b.to_async(&rt).iter(move || {
            index = (index + 1) % targets.len();
            let target = targets[index].as_str();
            async move {
                nav.navigate_to_group(configuration, target, true)
                    .await
                    .unwrap();
            }
        });
    });

    group.bench_function("first_incomplete", |b| {
        b.iter(|| {
            black_box(
                store
                    .snapshot(&owner)
                    .and_then(|c| nav.status().get_first_incomplete_group(&c).map(|g| g.id.clone())),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_navigation);
criterion_main!(benches);
