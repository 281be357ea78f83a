//! Scenario runner
//!
//! Runs named scenarios, collects failures and prints a summary.

use anyhow::Result;
use std::time::{Duration, Instant};

/// A named end-to-end scenario
pub struct Scenario {
    pub name: &'static str,
    pub category: &'static str,
    pub run: fn() -> Result<()>,
}

impl Scenario {
    pub const fn new(name: &'static str, category: &'static str, run: fn() -> Result<()>) -> Self {
        Self {
            name,
            category,
            run,
        }
    }
}

/// Outcome of one scenario
#[derive(Debug)]
pub struct ScenarioRun {
    pub name: &'static str,
    pub category: &'static str,
    /// `None` when it passed
    pub error: Option<String>,
    pub duration: Duration,
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub runs: Vec<ScenarioRun>,
    pub duration: Duration,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.runs.iter().filter(|r| r.error.is_none()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScenarioRun> {
        self.runs.iter().filter(|r| r.error.is_some())
    }

    pub fn all_passed(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn print_summary(&self) {
        println!();
        for run in &self.runs {
            let mark = if run.error.is_none() { "ok" } else { "FAILED" };
            println!("  [{mark}] {}::{} ({:?})", run.category, run.name, run.duration);
        }
        for run in self.failed() {
            println!(
                "\n{}::{}:\n  {}",
                run.category,
                run.name,
                run.error.as_deref().unwrap_or_default()
            );
        }
        println!(
            "\n{} passed, {} failed in {:?}",
            self.passed(),
            self.runs.len() - self.passed(),
            self.duration
        );
    }
}

/// Collects and runs scenarios
#[derive(Default)]
pub struct ScenarioRunner {
    scenarios: Vec<Scenario>,
    filter: Option<String>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// Only run scenarios whose name or category contains `pattern`
    pub fn filter(&mut self, pattern: &str) {
        self.filter = Some(pattern.to_string());
    }

    pub fn run(&self) -> RunSummary {
        let started = Instant::now();
        let runs = self
            .scenarios
            .iter()
            .filter(|s| self.matches(s))
            .map(|scenario| {
                let start = Instant::now();
                let error = (scenario.run)().err().map(|e| format!("{e:#}"));
                if let Some(error) = &error {
                    tracing::error!(scenario = scenario.name, %error, "scenario failed");
                }
                ScenarioRun {
                    name: scenario.name,
                    category: scenario.category,
                    error,
                    duration: start.elapsed(),
                }
            })
            .collect();

        RunSummary {
            runs,
            duration: started.elapsed(),
        }
    }

    fn matches(&self, scenario: &Scenario) -> bool {
        self.filter.as_deref().map_or(true, |pattern| {
            scenario.name.contains(pattern) || scenario.category.contains(pattern)
        })
    }
}
