//! Browsable HTML report

use crate::error::FailureKind;
use crate::runner::TestSuiteResult;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render a self-contained HTML page for a suite run
pub fn render_html(suite: &TestSuiteResult) -> String {
    let mut rows = String::new();
    for result in &suite.results {
        let (class, status) = match result.failure {
            None => ("pass", "passed"),
            Some(FailureKind::Assertion) => ("fail", "failed"),
            Some(FailureKind::Error) => ("fail", "error"),
            Some(FailureKind::Timeout) => ("fail", "timed out"),
        };
        rows.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{} ms</td><td><pre>{}</pre></td></tr>\n",
            class,
            escape(&result.name),
            escape(&result.tags.join(", ")),
            status,
            result.duration_ms,
            escape(result.error.as_deref().unwrap_or("")),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Booker E2E Report</title>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border: 1px solid #ccc; padding: 4px 8px; text-align: left; vertical-align: top; }}
tr.pass td:nth-child(4) {{ color: #1a7f37; }}
tr.fail td:nth-child(4) {{ color: #cf222e; font-weight: bold; }}
pre {{ margin: 0; white-space: pre-wrap; }}
</style>
</head>
<body>
<h1>Booker E2E Report</h1>
<p>booker-harness {version} &middot; {started} &middot; {base_url} &middot; {workers} worker(s)</p>
<p>{passed} passed, {failed} failed, {skipped} skipped ({duration} ms)</p>
<table>
<tr><th>Scenario</th><th>Tags</th><th>Status</th><th>Duration</th><th>Error</th></tr>
{rows}</table>
</body>
</html>
"#,
        version = escape(&suite.harness_version),
        started = suite.started_at.to_rfc3339(),
        base_url = escape(&suite.base_url),
        workers = suite.workers,
        passed = suite.passed,
        failed = suite.failed,
        skipped = suite.skipped,
        duration = suite.duration_ms,
        rows = rows,
    )
}
