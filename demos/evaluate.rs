//! Evaluate Example
//!
//! Evaluates fixture promotions against a fixture cart and prints a receipt for each.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to evaluate a single promotion, `-c` to pick the cart
//! Use `-s` to stack every matching schema instead of stopping at the first
//!
//! Run with: `RUST_LOG=rebate=debug cargo run --example evaluate -- -c mid`

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rebate::{
    engine::MatchPolicy, fixtures::Fixture, receipt::Receipt, utils::ExampleArgs,
};

/// Evaluate Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExampleArgs::parse();
    let fixture = Fixture::from_set(&args.fixture)?;
    let cart = fixture.cart(&args.cart)?;

    let policy = if args.stack {
        MatchPolicy::Stack
    } else {
        MatchPolicy::FirstMatch
    };

    let keys = match &args.promotion {
        Some(key) => vec![key.as_str()],
        None => fixture.promotion_keys(),
    };

    for key in keys {
        let promotion = fixture.promotion(key)?;

        match promotion.calculate_with_policy(cart, policy) {
            Ok(calculation) => {
                Receipt::new(&promotion.name, cart, &calculation).write_to(io::stdout())?;
            }
            Err(err) => println!("\n {}: {err}", promotion.name),
        }
    }

    Ok(())
}
