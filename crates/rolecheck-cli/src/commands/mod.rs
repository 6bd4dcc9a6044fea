//! Command implementations.

pub mod ask;
pub mod check;
pub mod clear;
pub mod compare;
pub mod index;
pub mod roles;
pub mod wipe;

pub use self::ask::execute_ask;
pub use self::check::execute_check;
pub use self::clear::execute_clear;
pub use self::compare::execute_compare;
pub use self::index::execute_index;
pub use self::roles::execute_roles;
pub use self::wipe::execute_wipe_index;

use rolecheck_reconciler::RoleReport;
use std::process::ExitCode;

/// Exit status for a finished comparison.
pub(crate) fn verdict_exit_code(report: &RoleReport, fail_on_mismatch: bool) -> ExitCode {
    if fail_on_mismatch && report.is_incorrect {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
