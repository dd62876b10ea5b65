//! Scenario runner: filtering, bounded parallelism, timeouts and results

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use booker_common::{Env, Fixtures};

use crate::error::{E2eError, E2eResult, FailureKind};
use crate::report;
use crate::scenario::{catalogue, Scenario};

/// Workers used under CI
pub const CI_WORKERS: usize = 2;

/// Default per-scenario timeout
pub const DEFAULT_SCENARIO_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub tags: Vec<String>,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub failure: Option<FailureKind>,
}

/// Result of running a set of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub harness_version: String,
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub workers: usize,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub env: Env,

    /// Concurrent scenarios; `None` applies the CI-aware default
    pub workers: Option<usize>,

    pub scenario_timeout: Duration,

    /// Output directory for results
    pub output_dir: PathBuf,
}

impl RunnerConfig {
    pub fn new(env: Env) -> Self {
        Self {
            env,
            workers: None,
            scenario_timeout: DEFAULT_SCENARIO_TIMEOUT,
            output_dir: PathBuf::from("test-results"),
        }
    }

    pub fn effective_workers(&self) -> usize {
        worker_count(self.workers, self.env.ci)
    }
}

/// Explicit worker counts win; CI gets [`CI_WORKERS`]; otherwise one per core
pub fn worker_count(explicit: Option<usize>, ci: bool) -> usize {
    match explicit.filter(|n| *n > 0) {
        Some(n) => n,
        None if ci => CI_WORKERS,
        None => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
    }
}

/// Main E2E runner
pub struct TestRunner {
    config: RunnerConfig,
    scenarios: Vec<Scenario>,
}

impl TestRunner {
    /// Runner over the built-in catalogue
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_scenarios(config, catalogue())
    }

    pub fn with_scenarios(config: RunnerConfig, scenarios: Vec<Scenario>) -> Self {
        Self { config, scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Run every scenario
    pub async fn run_all(&self) -> TestSuiteResult {
        let selected: Vec<&Scenario> = self.scenarios.iter().collect();
        self.run_scenarios(&selected).await
    }

    /// Run scenarios carrying a tag
    pub async fn run_tagged(&self, tag: &str) -> TestSuiteResult {
        let selected = Scenario::filter_by_tag(&self.scenarios, tag);
        self.run_scenarios(&selected).await
    }

    /// Run a single scenario by name
    pub async fn run_named(&self, name: &str) -> E2eResult<TestSuiteResult> {
        let scenario = Scenario::find(&self.scenarios, name)
            .ok_or_else(|| E2eError::ScenarioNotFound(name.to_string()))?;
        Ok(self.run_scenarios(&[scenario]).await)
    }

    /// Run the given scenarios with bounded concurrency, keeping their order
    pub async fn run_scenarios(&self, selected: &[&Scenario]) -> TestSuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();
        let workers = self.config.effective_workers();

        info!(
            "Running {} scenario(s) against {} with {} worker(s)...",
            selected.len(),
            self.config.env.base_url,
            workers
        );

        let results: Vec<TestResult> = stream::iter(selected.iter().copied())
            .map(|scenario| self.run_scenario(scenario))
            .buffered(workers)
            .collect()
            .await;

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let skipped = self.scenarios.len().saturating_sub(selected.len());
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        TestSuiteResult {
            harness_version: booker_common::VERSION.to_string(),
            started_at,
            base_url: self.config.env.base_url.clone(),
            workers,
            total: results.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }

    /// Run one scenario over a freshly built fixture graph
    pub async fn run_scenario(&self, scenario: &Scenario) -> TestResult {
        let start = Instant::now();
        debug!("Running scenario: {}", scenario.name);

        let fixtures = Fixtures::new(self.config.env.clone());
        let timeout = self.config.scenario_timeout;

        let outcome = match tokio::time::timeout(timeout, (scenario.run)(&fixtures)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(E2eError::from(e)),
            Err(_) => Err(E2eError::Timeout {
                name: scenario.name.to_string(),
                seconds: timeout.as_secs(),
            }),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let (error, failure) = match outcome {
            Ok(()) => {
                info!("✓ {} ({} ms)", scenario.name, duration_ms);
                (None, None)
            }
            Err(e) => {
                error!("✗ {} - {}", scenario.name, e);
                (Some(e.to_string()), Some(e.failure_kind()))
            }
        };

        TestResult {
            name: scenario.name.to_string(),
            tags: scenario.tags.iter().map(|t| t.to_string()).collect(),
            success: error.is_none(),
            duration_ms,
            error,
            failure,
        }
    }

    /// Write `test-results.json` and `report.html` to the output directory
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        let html_path = self.config.output_dir.join("report.html");
        std::fs::write(&html_path, report::render_html(results))?;

        info!("Results written to: {}", path.display());
        info!("Report written to: {}", html_path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booker_common::{Error, Result};
    use futures::future::{BoxFuture, FutureExt};

    fn passes(_: &Fixtures) -> BoxFuture<'_, Result<()>> {
        async { Ok(()) }.boxed()
    }

    fn fails(_: &Fixtures) -> BoxFuture<'_, Result<()>> {
        async { Err(Error::Assertion("Expected status 201 but got 500".to_string())) }.boxed()
    }

    fn hangs(_: &Fixtures) -> BoxFuture<'_, Result<()>> {
        async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
        .boxed()
    }

    fn scenario(name: &'static str, tags: &'static [&'static str], run: crate::scenario::ScenarioFn) -> Scenario {
        Scenario {
            name,
            description: "",
            tags,
            run,
        }
    }

    fn runner(output_dir: PathBuf) -> TestRunner {
        let config = RunnerConfig {
            workers: Some(2),
            scenario_timeout: Duration::from_millis(100),
            output_dir,
            ..RunnerConfig::new(Env::default())
        };
        TestRunner::with_scenarios(
            config,
            vec![
                scenario("passes", &["smoke"], passes),
                scenario("fails", &["regression"], fails),
                scenario("hangs", &["regression"], hangs),
            ],
        )
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(Some(4), true), 4);
        assert_eq!(worker_count(None, true), CI_WORKERS);
        assert_eq!(worker_count(Some(0), true), CI_WORKERS);
        assert!(worker_count(None, false) >= 1);
    }

    #[tokio::test]
    async fn test_run_all_reports_each_outcome_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let suite = runner(dir.path().to_path_buf()).run_all().await;

        assert_eq!(suite.total, 3);
        assert_eq!(suite.passed, 1);
        assert_eq!(suite.failed, 2);
        assert_eq!(suite.skipped, 0);
        assert!(!suite.all_passed());

        let names: Vec<_> = suite.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["passes", "fails", "hangs"]);
        assert!(suite.results[1]
            .error
            .as_deref()
            .unwrap()
            .contains("Expected status 201 but got 500"));
        assert!(suite.results[2].error.as_deref().unwrap().contains("timed out"));

        let kinds: Vec<_> = suite.results.iter().map(|r| r.failure).collect();
        assert_eq!(
            kinds,
            vec![None, Some(FailureKind::Assertion), Some(FailureKind::Timeout)]
        );
        assert_eq!(suite.harness_version, booker_common::VERSION);
    }

    #[tokio::test]
    async fn test_run_tagged_counts_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let suite = runner(dir.path().to_path_buf()).run_tagged("smoke").await;

        assert_eq!(suite.total, 1);
        assert_eq!(suite.skipped, 2);
        assert!(suite.all_passed());
    }

    #[tokio::test]
    async fn test_run_named_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let err = runner(dir.path().to_path_buf())
            .run_named("nope")
            .await
            .unwrap_err();
        assert!(matches!(err, E2eError::ScenarioNotFound(_)));
    }

    #[tokio::test]
    async fn test_write_results() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path().join("out"));
        let suite = runner.run_named("passes").await.unwrap();

        let path = runner.write_results(&suite).unwrap();
        let written: TestSuiteResult =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.passed, 1);
        assert!(dir.path().join("out/report.html").exists());
    }
}
