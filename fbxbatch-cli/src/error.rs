// ============================================================================
// fbxbatch-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and terminal error reporting
//
// Commands return fbxbatch-core's CoreError directly; main() prints it and
// exits with status 1.

use fbxbatch_core::{CoreError, CoreResult};

use std::io;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Wraps a JSON serialization failure in the core error type.
pub fn json_error(err: serde_json::Error) -> CoreError {
    CoreError::Io(io::Error::from(err))
}

/// Formats an error the way it is printed on stderr.
pub fn render_error(err: &CoreError) -> String {
    format!("{} {}", console::style("Error:").red().bold(), err)
}
