//! Compare command implementation.

use super::verdict_exit_code;
use crate::cli::CompareArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::reconcile_report;
use rolecheck_reconciler::Reconciler;
use rolecheck_sources::extract_roles;
use std::process::ExitCode;

/// Execute the compare command.
///
/// Needs no credentials: the candidate roles come from the command line.
pub fn execute_compare(
    args: CompareArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<ExitCode> {
    let authoritative = extract_roles(&args.xml, &config.role_path()?);
    let reconciler = Reconciler::new(config.reconciler.clone());

    let report = reconcile_report(&reconciler, &authoritative, &args.roles);

    println!("{}", formatter.format_report(&report)?);
    Ok(verdict_exit_code(&report, args.fail_on_mismatch))
}
