//! Performance benchmarks for rating calculations

use alliance_rating::rating::{
    build_signed_system, compute_ratings, OutcomePolicy, RatingModel, RatingRequest, TeamIndex,
};
use alliance_rating::synth::{generate_matches, linspace_truth, SyntheticConfig};
use alliance_rating::types::{MatchRecord, TeamKey};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn event_fixture(teams: usize, matches: usize) -> (Vec<TeamKey>, Vec<MatchRecord>) {
    let truth = linspace_truth(teams, 0.0, 100.0);
    let config = SyntheticConfig {
        noise: 5.0,
        seed: 1,
        ..Default::default()
    };
    let records = generate_matches(&truth, matches, &config).unwrap();
    (truth.into_iter().map(|(key, _)| key).collect(), records)
}

fn bench_full_pipeline(c: &mut Criterion) {
    // A large district event: 60 teams, 10 matches per team
    let (universe, matches) = event_fixture(60, 600);

    c.bench_function("match_result_pipeline_60_teams", |b| {
        let request = RatingRequest::match_result(
            universe.clone(),
            matches.clone(),
            OutcomePolicy::MarginRatio,
        );
        b.iter(|| compute_ratings(black_box(&request)).unwrap());
    });

    c.bench_function("offense_pipeline_60_teams", |b| {
        let request = RatingRequest {
            universe: universe.clone(),
            matches: matches.clone(),
            model: RatingModel::Offense,
            normalize: true,
            scale: None,
        };
        b.iter(|| compute_ratings(black_box(&request)).unwrap());
    });
}

fn bench_matrix_build(c: &mut Criterion) {
    let (universe, matches) = event_fixture(60, 600);
    let index = TeamIndex::new(universe).unwrap();

    c.bench_function("signed_matrix_build_600_matches", |b| {
        b.iter(|| {
            build_signed_system(
                black_box(&index),
                black_box(&matches),
                OutcomePolicy::MarginRatio,
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_full_pipeline, bench_matrix_build);
criterion_main!(benches);
