//! Implementation of the 'convert' subcommand.
//!
//! Writes the batch file and hands it to the converter backend, which reads it
//! on its own. There is no further interaction with the backend.

use super::Context;
use crate::cli::ConvertArgs;
use crate::error::CliResult;

use console::style;
use fbxbatch_core::{FsOracle, Notification, Notifier, Severity, convert};

pub fn run_convert(ctx: &Context, args: &ConvertArgs) -> CliResult<()> {
    let batch = ctx.load()?;
    let outcome = convert(&ctx.config, &batch, &FsOracle, &ctx.notifier, !args.no_launch)?;

    println!(
        "{} {} file(s) to {}",
        style("Wrote").green().bold(),
        outcome.summary.written.len(),
        ctx.config.batch_file.display()
    );
    if !outcome.summary.skipped.is_empty() {
        println!(
            "{} {} missing file(s) skipped",
            style("!").yellow().bold(),
            outcome.summary.skipped.len()
        );
    }

    if let Some(pid) = outcome.backend_pid {
        println!(
            "{} converter backend (pid {})",
            style("Started").green().bold(),
            pid
        );
        ctx.notifier.notify(&Notification::Custom {
            title: "Conversion Started".to_string(),
            message: format!(
                "Converting {} file(s) into {}",
                outcome.summary.written.len(),
                batch.output_dir
            ),
            severity: Severity::Info,
        });
    }
    Ok(())
}
