//! Basic debt simplification example.
//!
//! Three flatmates owe each other money in a cycle; the engine finds the
//! two payments that settle everything.

use settlement_engine::core::balance::BalanceEdge;
use settlement_engine::core::currency::CurrencyCode;
use settlement_engine::core::member::{GroupId, MemberId};
use settlement_engine::graph::complete::{pad_to_complete, with_mirrors};
use settlement_engine::optimization::simplifier::Simplifier;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  settlement-engine: Basic Simplify Example   ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let group = GroupId::new("flat-42");
    let usd = CurrencyCode::new("USD");
    let debt = |paid_by: i64, borrowed_by: i64, amount: i64| {
        BalanceEdge::new(
            group.clone(),
            usd.clone(),
            MemberId::new(paid_by),
            MemberId::new(borrowed_by),
            amount,
        )
    };

    println!("Balances:");
    println!("  1 owes 0:  $10.00");
    println!("  2 owes 1:  $50.00");
    println!("  0 owes 2:  $20.00\n");

    let rows = match with_mirrors(&[debt(0, 1, 1000), debt(1, 2, 5000), debt(2, 0, 2000)]) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("invalid balances: {}", e);
            std::process::exit(1);
        }
    };
    let input = pad_to_complete(&rows, &[]);

    let result = match Simplifier::default().simplify_with_report(&input) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("simplification failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("━━━ Suggested Payments ━━━\n");
    for settlement in result.settlements() {
        println!("  {}", settlement);
    }
    println!();

    println!("━━━ Full Balance Rows ━━━\n");
    for edge in result.edges() {
        println!("  {}", edge);
    }
    println!();

    println!("{}", result.report());
}
