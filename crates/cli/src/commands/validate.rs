//! oversight validate command

use crate::context::Context;
use clap::Args;
use console::style;
use integrity::{IntegrityChecker, StaticContent};

#[derive(Debug, Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Returns whether the store is clean
    pub async fn run(&self, ctx: &Context) -> anyhow::Result<bool> {
        let content = StaticContent::load(ctx.fetcher(), &ctx.config.base_path).await?;
        let report = IntegrityChecker::new(ctx.config.phase_ids()).check(&content);

        if ctx.json {
            ctx.print_json(&report)?;
            return Ok(report.is_clean());
        }

        if report.is_clean() {
            println!("{} No integrity issues", style("✓").green());
            return Ok(true);
        }

        for issue in &report.issues {
            println!(
                "{} [{}] {}: {}",
                style("✗").red(),
                issue.resource,
                style(&issue.subject).bold(),
                issue.detail
            );
        }
        println!();
        for (kind, count) in report.by_kind() {
            println!("  {:?}: {}", kind, count);
        }
        println!("{} issue(s) found", report.len());
        Ok(false)
    }
}
