//! `docsnap components` command implementation.

use docsnap_config::ComponentType;

use crate::error::CliError;
use crate::output::Output;

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn execute() -> Result<(), CliError> {
    let output = Output::new();
    for name in ComponentType::names() {
        output.line(name);
    }
    Ok(())
}
