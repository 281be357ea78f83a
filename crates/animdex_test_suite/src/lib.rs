//! Animdex Scenario Suite
//!
//! Headless, end-to-end coverage of the catalog and navigation crates:
//!
//! - **Harness**: catalog service, in-memory host and a started controller
//! - **Scenarios**: named flows (initialize, navigate, drawer, scroll) run by
//!   the `animdex-scenarios` binary and by the integration tests
//! - **Runner**: filtering, failure collection and the printed summary

pub mod harness;
pub mod runner;
pub mod scenarios;

pub use harness::{init_tracing, NavHarness};
pub use runner::{RunSummary, Scenario, ScenarioRunner};
pub use scenarios::all_scenarios;
