//! skillbook validate - Check tier stores and the manifest

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::catalog::{ensure_passed, validate_all};
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::core::validation::{Finding, ValidationReport};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ValidateArgs {}

#[derive(Serialize)]
struct ValidateOutput<'a> {
    passed: bool,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

pub fn run(ctx: &AppContext, _args: &ValidateArgs) -> Result<()> {
    let report = validate_all(&ctx.layout)?;

    if ctx.output_format.is_machine_readable() {
        emit_json(&ValidateOutput {
            passed: report.passed(),
            report: &report,
        })?;
    } else if !ctx.quiet || !report.passed() {
        emit_human(render(ctx, &report));
    }

    ensure_passed(&report)
}

fn render(ctx: &AppContext, report: &ValidationReport) -> HumanLayout {
    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout.title("Validation");
    for check in &report.tiers {
        layout.kv(check.tier.as_str(), &format!("{} entries checked", check.entries));
    }

    list(&mut layout, "Errors", &report.errors);
    list(&mut layout, "Warnings", &report.warnings);

    layout.blank();
    if !report.passed() {
        layout.push_line(format!("Validation failed with {} error(s).", report.errors.len()));
    } else if report.warnings.is_empty() {
        layout.push_line("All validations passed. No errors or warnings.");
    } else {
        layout.push_line(format!(
            "No errors found, {} warning(s) to review.",
            report.warnings.len()
        ));
    }
    layout
}

fn list(layout: &mut HumanLayout, heading: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    layout.blank().section(&format!("{heading} ({})", findings.len()));
    for finding in findings {
        layout.bullet(&finding.to_string());
    }
}
