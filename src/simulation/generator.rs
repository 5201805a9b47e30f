//! Random balance networks for benchmarks, demos and the CLI.
//!
//! Generated groups are already in the shape the simplifier expects: every
//! ordered member pair is present in every currency, and each row has its
//! exact mirror.

use crate::core::amount::Amount;
use crate::core::balance::BalanceEdge;
use crate::core::currency::CurrencyCode;
use crate::core::member::{GroupId, MemberId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for generating a random group.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub group_id: GroupId,
    /// Members are numbered `1..=member_count`.
    pub member_count: usize,
    pub currencies: Vec<CurrencyCode>,
    /// Probability that a member pair carries a nonzero balance.
    pub density: f64,
    /// Smallest nonzero balance, in minor units.
    pub min_amount: Amount,
    /// Largest nonzero balance, in minor units.
    pub max_amount: Amount,
    /// Fixed seed for reproducible output; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            group_id: GroupId::new("generated"),
            member_count: 10,
            currencies: vec![CurrencyCode::new("USD")],
            density: 0.5,
            min_amount: 100,
            max_amount: 100_000,
            seed: None,
        }
    }
}

/// Generate a symmetric, complete balance graph for one group.
pub fn generate_balances(config: &NetworkConfig) -> Vec<BalanceEdge> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // NaN counts as no balances at all
    let density = if config.density.is_nan() {
        0.0
    } else {
        config.density.clamp(0.0, 1.0)
    };
    let low = config.min_amount.max(1);
    let high = config.max_amount.max(low);

    let members: Vec<MemberId> = (1..=config.member_count as i64).map(MemberId::new).collect();
    let pairs = members.len() * members.len().saturating_sub(1);
    let mut edges = Vec::with_capacity(pairs * config.currencies.len());

    for currency in &config.currencies {
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                let amount = if rng.gen_bool(density) {
                    let magnitude = rng.gen_range(low..=high);
                    if rng.gen_bool(0.5) {
                        magnitude
                    } else {
                        -magnitude
                    }
                } else {
                    0
                };
                let row = BalanceEdge::new(config.group_id.clone(), currency.clone(), a, b, amount);
                edges.push(row.mirror());
                edges.push(row);
            }
        }
    }

    edges
}
