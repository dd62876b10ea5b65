//! Command-line arguments of the runner binary

use std::path::PathBuf;

use clap::Parser;

/// Flags `cargo test -- <flags>` forwards to every test binary. The runner
/// has no use for them.
const LIBTEST_FLAGS: &[&str] = &[
    "--nocapture",
    "--ignored",
    "--include-ignored",
    "--show-output",
    "--quiet",
    "-q",
    "--exact",
];

#[derive(Parser, Debug)]
#[command(name = "booker-e2e")]
#[command(about = "E2E scenario runner for the Restful Booker API")]
pub struct RunnerArgs {
    /// Run only scenarios with this tag (e.g. smoke, auth, regression)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Run only the scenario with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Concurrent scenarios (default: 2 under CI, one per core otherwise)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-scenario timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    pub output: PathBuf,

    /// List scenarios and exit
    #[arg(long)]
    pub list: bool,
}

impl RunnerArgs {
    /// Parse process arguments, ignoring libtest flags
    pub fn from_env() -> Self {
        Self::parse_from(strip_libtest_args(std::env::args()))
    }
}

/// Drop libtest flags so clap only sees runner arguments
pub fn strip_libtest_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .filter(|arg| !LIBTEST_FLAGS.contains(&arg.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_libtest_flags_are_ignored() {
        let args = strip_libtest_args(["e2e", "--ignored", "--tag", "smoke", "--nocapture"]);
        let parsed = RunnerArgs::try_parse_from(args).unwrap();

        assert_eq!(parsed.tag.as_deref(), Some("smoke"));
        assert_eq!(parsed.timeout_secs, 30);
        assert!(!parsed.list);
    }

    #[test]
    fn test_unknown_flags_still_rejected() {
        let args = strip_libtest_args(["e2e", "--bogus"]);
        assert!(RunnerArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_runner_options() {
        let args = strip_libtest_args([
            "e2e", "--name", "booking-lifecycle", "--workers", "4", "--timeout-secs", "5", "-o",
            "out",
        ]);
        let parsed = RunnerArgs::try_parse_from(args).unwrap();

        assert_eq!(parsed.name.as_deref(), Some("booking-lifecycle"));
        assert_eq!(parsed.workers, Some(4));
        assert_eq!(parsed.timeout_secs, 5);
        assert_eq!(parsed.output, PathBuf::from("out"));
    }
}
