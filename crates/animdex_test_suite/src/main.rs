//! Scenario Runner
//!
//! Runs the headless navigation scenarios.
//!
//! Usage:
//!   animdex-scenarios              # Run all scenarios
//!   animdex-scenarios --filter foo # Run scenarios matching "foo"
//!   animdex-scenarios --list       # List all scenarios

use animdex_test_suite::{all_scenarios, ScenarioRunner};
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--list") {
        println!("Available scenarios:");
        for scenario in all_scenarios() {
            println!("  {}::{}", scenario.category, scenario.name);
        }
        return Ok(());
    }

    let filter = args
        .iter()
        .position(|a| a == "--filter")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let mut runner = ScenarioRunner::new();
    for scenario in all_scenarios() {
        runner.add(scenario);
    }

    if let Some(ref pattern) = filter {
        println!("Running scenarios matching: {}", pattern);
        runner.filter(pattern);
    }

    let summary = runner.run();
    summary.print_summary();

    if summary.all_passed() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
