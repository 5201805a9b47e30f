//! Multi-currency simplification example.
//!
//! A random travel group with balances in three currencies. Each currency
//! is simplified on its own; nothing is converted.

use settlement_engine::core::currency::CurrencyCode;
use settlement_engine::core::member::GroupId;
use settlement_engine::optimization::simplifier::Simplifier;
use settlement_engine::simulation::generator::{generate_balances, NetworkConfig};

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  settlement-engine: Multi-Currency Example   ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let config = NetworkConfig {
        group_id: GroupId::new("interrail-2026"),
        member_count: 6,
        currencies: vec![
            CurrencyCode::new("EUR"),
            CurrencyCode::new("CHF"),
            CurrencyCode::new("JPY"),
        ],
        density: 0.7,
        seed: Some(2026),
        ..Default::default()
    };
    let input = generate_balances(&config);
    println!(
        "Generated {} balance rows for {} members.\n",
        input.len(),
        config.member_count
    );

    let result = match Simplifier::default().simplify_with_report(&input) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("simplification failed: {}", e);
            std::process::exit(1);
        }
    };

    for currency in &config.currencies {
        println!("━━━ {} ━━━\n", currency);
        for settlement in result
            .settlements()
            .iter()
            .filter(|s| &s.currency == currency)
        {
            println!("  {}", settlement);
        }
        println!();
    }

    println!("{}", result.report());
}
