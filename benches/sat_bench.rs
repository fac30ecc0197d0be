//! Criterion benchmarks for the SAT genetic algorithm.
//!
//! Uses random 3-SAT instances with a planted solution at clause/variable
//! ratio 4.26 to measure engine and local-search throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::seq::index;
use rand::Rng;
use sat_ga::ga::{CrossoverKind, GaConfig, GaRunner, MutationKind};
use sat_ga::local_search::{LocalSearchKind, LocalSearchStrategy};
use sat_ga::model::{Candidate, Clause, Instance};
use sat_ga::random::create_rng;
use std::sync::Arc;

// ===========================================================================
// Planted random 3-SAT
// ===========================================================================

fn planted_3sat(variables: usize, seed: u64) -> Arc<Instance> {
    let clauses = (variables as f64 * 4.26).round() as usize;
    let mut rng = create_rng(seed);
    let planted: Vec<bool> = (0..variables).map(|_| rng.random_bool(0.5)).collect();
    let mut out = Vec::with_capacity(clauses);
    while out.len() < clauses {
        let literals: Vec<i32> = index::sample(&mut rng, variables, 3)
            .into_iter()
            .map(|v| if rng.random_bool(0.5) { v as i32 + 1 } else { -(v as i32 + 1) })
            .collect();
        let clause = Clause::new(literals);
        if clause.is_satisfied(&planted) {
            out.push(clause);
        }
    }
    Arc::new(Instance::new(variables, out))
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_3sat(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_3sat");
    group.sample_size(10);

    for (vars, pop, gen) in [(20usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
        let instance = planted_3sat(vars, 42);
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_crossover(CrossoverKind::ClauseBiased)
            .with_mutation(MutationKind::Guided)
            .with_local_search(LocalSearchKind::tabu(5))
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("v{vars}_p{pop}_g{gen}"), vars),
            &(instance, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(i.clone()), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    group.sample_size(10);

    let instance = planted_3sat(100, 7);
    let start: Vec<bool> = {
        let mut rng = create_rng(1);
        (0..100).map(|_| rng.random_bool(0.5)).collect()
    };

    for kind in [
        LocalSearchKind::HillClimbing,
        LocalSearchKind::tabu(5),
        LocalSearchKind::variable_neighborhood(),
        LocalSearchKind::guided(),
        LocalSearchKind::ClauseRepair,
    ] {
        group.bench_function(BenchmarkId::from_parameter(kind.name()), |b| {
            b.iter(|| {
                let mut search = kind.build();
                let mut candidate = Candidate::new(instance.clone(), start.clone());
                search.improve(&mut candidate, 100, &mut create_rng(3));
                black_box(candidate.satisfied_count())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ga_3sat, bench_local_search);
criterion_main!(benches);
