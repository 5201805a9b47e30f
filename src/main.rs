//! settlement-engine CLI
//!
//! Simplify a group's pairwise balances from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Suggest payments for a balance file
//! settlement-engine simplify --input balances.json
//!
//! # Full simplified edge list and report as JSON
//! settlement-engine simplify --input balances.json --format json
//!
//! # Generate a random group for testing
//! settlement-engine generate --members 8 --currencies USD,EUR
//! ```
//!
//! Set `RUST_LOG=debug` to see per-currency progress.

use log::{error, info};
use settlement_engine::core::balance::BalanceEdge;
use settlement_engine::core::currency::CurrencyCode;
use settlement_engine::graph::complete::pad_to_complete;
use settlement_engine::optimization::simplifier::{Simplifier, SimplifierConfig};
use settlement_engine::simulation::generator::{generate_balances, NetworkConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"settlement-engine: multi-currency debt simplification

USAGE:
    settlement-engine <COMMAND> [OPTIONS]

COMMANDS:
    simplify    Compute the fewest payments settling a balance file
    generate    Generate a random symmetric balance file (for testing)
    help        Show this message

OPTIONS (simplify):
    --input <FILE>      Path to JSON balances file
    --format <FORMAT>   Output format: text (default) or json
    --pad               Add zero rows for every missing member pair first
    --no-verify         Skip symmetry and conservation checks

OPTIONS (generate):
    --members <N>       Number of members (default: 10)
    --currencies <LIST> Comma-separated currency codes (default: USD)
    --density <P>       Share of member pairs with a balance (default: 0.5)
    --seed <N>          Seed for reproducible output
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    settlement-engine simplify --input balances.json
    settlement-engine simplify --input balances.json --format json --pad
    settlement-engine generate --members 20 --seed 7
    settlement-engine generate --members 5 --currencies USD,EUR,JPY --output test.json"#
    );
}

/// JSON schema for balance files.
#[derive(serde::Deserialize, serde::Serialize)]
struct BalancesFile {
    balances: Vec<BalanceEdge>,
}

fn fail(message: impl std::fmt::Display) -> ! {
    error!("{}", message);
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn load_balances(path: &str) -> Vec<BalanceEdge> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    let file: BalancesFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "balances": [
    {{ "groupId": "trip", "currency": "USD", "paidBy": 1, "borrowedBy": 2, "amount": 2500 }},
    {{ "groupId": "trip", "currency": "USD", "paidBy": 2, "borrowedBy": 1, "amount": -2500 }}
  ]
}}"#
        );
        fail(format!("parsing JSON: {}", e))
    });
    file.balances
}

fn next_value(args: &[String], i: &mut usize, flag: &str, expects: &str) -> String {
    *i += 1;
    args.get(*i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, expects)))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(format!("encoding JSON: {}", e)))
}

fn cmd_simplify(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut pad = false;
    let mut config = SimplifierConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => input_path = Some(next_value(args, &mut i, "--input", "a file path")),
            "--format" => format = next_value(args, &mut i, "--format", "'text' or 'json'"),
            "--pad" => pad = true,
            "--no-verify" => {
                config.verify_symmetry = false;
                config.verify_conservation = false;
            }
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    let mut balances = load_balances(&path);
    info!("loaded {} balance rows from {}", balances.len(), path);
    if pad {
        balances = pad_to_complete(&balances, &[]);
        info!("padded to {} rows", balances.len());
    }

    let result = Simplifier::new(config)
        .simplify_with_report(&balances)
        .unwrap_or_else(|e| fail(e));

    if format == "json" {
        println!("{}", to_json(&result));
    } else {
        let settlements = result.settlements();
        if settlements.is_empty() {
            println!("Everyone is settled up.");
        } else {
            println!("=== Suggested Payments ===");
            for settlement in &settlements {
                println!("  {}", settlement);
            }
        }
        println!();
        println!("{}", result.report());
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = NetworkConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                config.member_count = next_value(args, &mut i, "--members", "a number")
                    .parse()
                    .unwrap_or_else(|_| fail("--members requires a number"));
            }
            "--currencies" => {
                config.currencies = next_value(args, &mut i, "--currencies", "a comma-separated list")
                    .split(',')
                    .map(|s| CurrencyCode::new(s.trim()))
                    .collect();
            }
            "--density" => {
                config.density = next_value(args, &mut i, "--density", "a number between 0 and 1")
                    .parse::<f64>()
                    .ok()
                    .filter(|d| (0.0..=1.0).contains(d))
                    .unwrap_or_else(|| fail("--density requires a number between 0 and 1"));
            }
            "--seed" => {
                config.seed = Some(
                    next_value(args, &mut i, "--seed", "a number")
                        .parse()
                        .unwrap_or_else(|_| fail("--seed requires a number")),
                );
            }
            "--output" => output_path = Some(next_value(args, &mut i, "--output", "a file path")),
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let balances = generate_balances(&config);
    let row_count = balances.len();
    let json = to_json(&BalancesFile { balances });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} balance rows across {} members → {}",
            row_count, config.member_count, path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simplify" => cmd_simplify(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
