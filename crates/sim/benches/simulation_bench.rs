use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;
use wfsim_sim::evolution::{MatingScheme, RecombinationConfig, Recombinator, SexMode};
use wfsim_sim::simulation::{InitGenotype, Population, SimulatorBuilder};
use wfsim_sim::statistics::StatRequest;
use wfsim_sim::GenomeLayout;

fn bench_mating(c: &mut Criterion) {
    let mut group = c.benchmark_group("mating");

    for &size in &[100usize, 1000, 10_000] {
        let layout = Arc::new(GenomeLayout::new(vec![2]).unwrap());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let population =
            Population::initialize("bench", size, Arc::clone(&layout), &InitGenotype::biallelic(0.5), &mut rng)
                .unwrap();
        let scheme = MatingScheme::new(
            SexMode::Random,
            Recombinator::new(&layout, &RecombinationConfig::Uniform { rate: 0.01 }).unwrap(),
        );

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("advance_population", size), &size, |b, _| {
            b.iter(|| black_box(scheme.advance_population(&population, &mut rng).unwrap()))
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let layout = Arc::new(GenomeLayout::new(vec![2]).unwrap());
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
    let population =
        Population::initialize("bench", 1000, layout, &InitGenotype::biallelic(0.5), &mut rng).unwrap();
    let request = StatRequest::allele_freq([0, 1]).with_ld(0, 1).with_hetero_freq([0]);

    c.bench_function("snapshot_compute", |b| {
        b.iter(|| black_box(request.compute(black_box(&population)).unwrap()))
    });
}

fn bench_simulation_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");
    let pop_size = 100;
    let generations = 100;

    for &replicates in &[1usize, 8] {
        group.throughput(Throughput::Elements((pop_size * generations * replicates) as u64));
        group.bench_with_input(BenchmarkId::new("drift", replicates), &replicates, |b, &reps| {
            b.iter_batched(
                || {
                    SimulatorBuilder::new()
                        .population_size(pop_size)
                        .allele_frequency(0.2)
                        .generations(generations)
                        .replicates(reps)
                        .statistics(StatRequest::allele_freq([0]))
                        .seed(42)
                        .build()
                        .unwrap()
                },
                |mut sim| black_box(sim.run().unwrap()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mating, bench_statistics, bench_simulation_run);
criterion_main!(benches);
