//! Implementation of the 'show' subcommand.

use super::Context;
use crate::cli::ShowArgs;
use crate::error::{CliResult, json_error};

use console::style;
use fbxbatch_core::BatchDescriptor;

pub fn run_show(ctx: &Context, args: &ShowArgs) -> CliResult<()> {
    let batch = ctx.load()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&batch).map_err(json_error)?);
    } else {
        print!("{}", render_batch(&batch));
    }
    Ok(())
}

/// Human-readable listing of a batch.
pub fn render_batch(batch: &BatchDescriptor) -> String {
    let mut out = String::new();
    let output = if batch.output_dir.is_empty() {
        style("(not set)").dim().to_string()
    } else {
        batch.output_dir.clone()
    };
    out.push_str(&format!("{} {}\n", style("Output:").bold(), output));

    if batch.files.is_empty() {
        out.push_str("No files in batch\n");
        return out;
    }

    for (path, entry) in batch.files.iter() {
        out.push_str(&format!(
            "{} [collision: {}]\n",
            style(path).cyan(),
            entry.collision_type
        ));
        for (name, clip) in entry.clips.iter() {
            out.push_str(&format!(
                "  {}: frames {} to {} at {} fps\n",
                name, clip.begin_frame, clip.end_frame, clip.fps
            ));
        }
    }
    out
}
