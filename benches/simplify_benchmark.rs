use criterion::{black_box, criterion_group, criterion_main, Criterion};
use settlement_engine::core::currency::CurrencyCode;
use settlement_engine::optimization::simplifier::Simplifier;
use settlement_engine::simulation::generator::{generate_balances, NetworkConfig};

fn bench_group(c: &mut Criterion, name: &str, member_count: usize, currencies: &[&str]) {
    let config = NetworkConfig {
        member_count,
        currencies: currencies.iter().map(|c| CurrencyCode::new(*c)).collect(),
        density: 0.6,
        seed: Some(member_count as u64),
        ..Default::default()
    };
    let edges = generate_balances(&config);
    let simplifier = Simplifier::default();

    c.bench_function(name, |b| {
        b.iter(|| simplifier.simplify(black_box(&edges)))
    });
}

fn bench_simplify_10_members(c: &mut Criterion) {
    bench_group(c, "simplify_10_members", 10, &["USD"]);
}

fn bench_simplify_50_members(c: &mut Criterion) {
    bench_group(c, "simplify_50_members", 50, &["USD"]);
}

fn bench_simplify_150_members_3_currencies(c: &mut Criterion) {
    bench_group(c, "simplify_150_members_3_currencies", 150, &["USD", "EUR", "JPY"]);
}

criterion_group!(
    benches,
    bench_simplify_10_members,
    bench_simplify_50_members,
    bench_simplify_150_members_3_currencies
);
criterion_main!(benches);
