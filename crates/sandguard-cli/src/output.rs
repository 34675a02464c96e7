//! Plain-text rendering for reports and the check catalog.

use sandguard_core::{catalog, CheckInfo, Report};
use std::fmt::Write as _;

pub const PASS_MESSAGE: &str = "PASS: all sandbox hardening guardrails satisfied";

/// One `FAIL:` line per violation, or the single pass line.
pub fn render_text(report: &Report) -> String {
    if report.passed {
        return format!("{PASS_MESSAGE}\n");
    }

    let mut out = String::new();
    for violation in &report.violations {
        let _ = writeln!(out, "FAIL: {violation}");
    }
    out
}

pub fn render_check_list() -> String {
    let width = catalog()
        .iter()
        .map(|info| info.id.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for info in catalog() {
        let _ = writeln!(out, "{:<width$}  {}", info.id.as_str(), info.requirement);
    }
    out
}

pub fn render_explain(info: &CheckInfo) -> String {
    let scope = if info.id.is_per_service() {
        "each service"
    } else {
        "the whole document"
    };
    format!(
        "{}\n\nApplies to: {}\nRequirement: {}\nRemediation: {}\n",
        info.id, scope, info.requirement, info.remediation
    )
}
