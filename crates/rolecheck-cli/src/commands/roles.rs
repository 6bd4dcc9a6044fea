//! Roles command implementation.

use crate::cli::RolesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rolecheck_sources::try_extract_roles;

/// Execute the roles command.
pub fn execute_roles(args: RolesArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let roles = try_extract_roles(&args.xml, &config.role_path()?)?;
    println!("{}", formatter.format_roles(&roles)?);
    Ok(())
}
