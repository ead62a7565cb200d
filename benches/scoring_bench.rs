use careerpath::bank::{select, QuestionBank};
use careerpath::scorer::distribution::distribute;
use careerpath::scorer::{Scorer, ScoringProfile, TraitKey, TraitVector};
use careerpath::taxonomy::Taxonomy;
use criterion::{criterion_group, criterion_main, Criterion};
use fnv::FnvHashSet;
use std::hint::black_box;

fn profile() -> TraitVector {
    TraitVector::filled(0.5)
        .with(TraitKey::Investigative, 0.82)
        .with(TraitKey::Aptitude, 0.71)
        .with(TraitKey::Artistic, 0.33)
        .with(TraitKey::Extraversion, 0.41)
}

fn criterion_benchmark(c: &mut Criterion) {
    let bank = QuestionBank::embedded().expect("Failed to load bank");
    let taxonomy = Taxonomy::embedded().expect("Failed to load taxonomy");
    let traits = profile();

    let staged = Scorer::new(ScoringProfile::STAGED);
    c.bench_function("rank fields", |b| {
        b.iter(|| staged.rank(black_box(&taxonomy.fields), black_box(&traits)))
    });

    let cluster = Scorer::new(ScoringProfile::CLUSTER);
    c.bench_function("rank career clusters", |b| {
        b.iter(|| cluster.rank(black_box(&taxonomy.career_clusters), black_box(&traits)))
    });

    let activations: Vec<f64> = (0..64).map(|i| (i as f64 * 0.37).fract()).collect();
    c.bench_function("distribute (64)", |b| {
        b.iter(|| distribute(black_box(&activations), black_box(4.0)))
    });

    let used = FnvHashSet::default();
    c.bench_function("select stage 1 adaptive", |b| {
        let mut rng = fastrand::Rng::with_seed(1);
        b.iter(|| select(black_box(&bank.stage1), 18, &used, Some(&traits), &mut rng).len())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
