//! Booker E2E Scenarios and Runner
//!
//! Scenarios are plain async functions over a per-scenario
//! [`booker_common::Fixtures`] graph. The runner selects them by tag or
//! name, runs them with CI-aware bounded parallelism and a per-scenario
//! timeout, then writes JSON and HTML reports.
//!
//! ```text
//! TestRunner
//!   ├── run_all() / run_tagged(tag) / run_named(name)
//!   ├── run_scenario(&Scenario) -> TestResult     (fresh Fixtures each)
//!   └── write_results(&TestSuiteResult)           (test-results.json, report.html)
//! ```

pub mod cli;
pub mod error;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod scenarios;

pub use error::{E2eError, E2eResult, FailureKind};
pub use runner::{RunnerConfig, TestResult, TestRunner, TestSuiteResult};
pub use scenario::{catalogue, Scenario};
