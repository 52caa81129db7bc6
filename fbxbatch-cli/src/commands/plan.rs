//! Implementation of the 'plan' subcommand: a preview of what the converter
//! backend will do with the current batch.

use super::Context;
use crate::cli::PlanArgs;
use crate::error::{CliResult, json_error};

use console::style;
use fbxbatch_core::plan::{CollisionStrategy, ConversionJob};

pub fn run_plan(ctx: &Context, args: &PlanArgs) -> CliResult<()> {
    let batch = ctx.load()?;
    let jobs = fbxbatch_core::plan(&batch);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&jobs).map_err(json_error)?);
    } else {
        print!("{}", render_jobs(&jobs));
    }
    Ok(())
}

pub fn render_jobs(jobs: &[ConversionJob]) -> String {
    if jobs.is_empty() {
        return "Nothing to convert\n".to_string();
    }

    let mut out = String::new();
    for (i, job) in jobs.iter().enumerate() {
        let collision = match job.collision {
            CollisionStrategy::None => "no collision mesh",
            CollisionStrategy::Convex => "convex collision mesh",
            CollisionStrategy::Concave => "concave collision mesh",
        };
        out.push_str(&format!(
            "{}. {} -> {} ({})\n",
            i + 1,
            style(&job.input).cyan(),
            job.output_path,
            collision
        ));
        for clip in &job.clips {
            match clip.sample_interval {
                Some(interval) => out.push_str(&format!(
                    "   {}: frames {} to {}, sampled every {:.4}s\n",
                    clip.name, clip.begin_frame, clip.end_frame, interval
                )),
                None => out.push_str(&format!(
                    "   {}: frames {} to {}, not sampled (fps {})\n",
                    clip.name, clip.begin_frame, clip.end_frame, clip.fps
                )),
            }
        }
    }
    out
}
