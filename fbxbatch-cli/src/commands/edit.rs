//! Implementation of the batch editing subcommands.
//!
//! Each command loads the batch, applies one change and saves it again. The
//! save goes through the encoder, so entries whose input file has disappeared
//! are dropped with a notification.

use super::Context;
use crate::cli::{AddClipArgs, AddFileArgs, RemoveClipArgs, RemoveFileArgs, SetOutputArgs};
use crate::error::CliResult;

use console::style;
use fbxbatch_core::{
    BatchDescriptor, ClipDescriptor, CollisionType, CoreError, ExistenceOracle, FileEntry, FsOracle,
};

use log::info;

pub fn run_set_output(ctx: &Context, args: &SetOutputArgs) -> CliResult<()> {
    let mut batch = ctx.load()?;
    batch.output_dir = args.output_dir.clone();
    save(ctx, &batch)?;
    info!("Output directory set to {}", args.output_dir);
    Ok(())
}

pub fn run_add_file(ctx: &Context, args: &AddFileArgs) -> CliResult<()> {
    if !FsOracle.exists(&args.path) {
        return Err(CoreError::FileNotFound(args.path.clone()));
    }

    let mut batch = ctx.load()?;
    batch.add_file(args.path.clone(), FileEntry::new(CollisionType::from(args.collision)))?;
    save(ctx, &batch)?;
    info!("Added {}", args.path);
    Ok(())
}

pub fn run_remove_file(ctx: &Context, args: &RemoveFileArgs) -> CliResult<()> {
    let mut batch = ctx.load()?;
    batch
        .remove_file(&args.path)
        .ok_or_else(|| CoreError::FileNotFound(args.path.clone()))?;
    save(ctx, &batch)?;
    info!("Removed {}", args.path);
    Ok(())
}

pub fn run_add_clip(ctx: &Context, args: &AddClipArgs) -> CliResult<()> {
    if args.name.trim().is_empty() {
        return Err(CoreError::InvalidClip("clip name must not be empty".to_string()));
    }
    let clip = ClipDescriptor::new(args.begin, args.end, args.fps);
    clip.check()?;

    let mut batch = ctx.load()?;
    batch
        .file_mut(&args.file)
        .ok_or_else(|| CoreError::FileNotFound(args.file.clone()))?
        .add_clip(&args.file, args.name.clone(), clip)?;
    save(ctx, &batch)?;
    info!("Added clip {} to {}", args.name, args.file);
    Ok(())
}

pub fn run_remove_clip(ctx: &Context, args: &RemoveClipArgs) -> CliResult<()> {
    let mut batch = ctx.load()?;
    batch
        .file_mut(&args.file)
        .ok_or_else(|| CoreError::FileNotFound(args.file.clone()))?
        .remove_clip(&args.name)
        .ok_or_else(|| {
            CoreError::InvalidClip(format!("no clip named '{}' in '{}'", args.name, args.file))
        })?;
    save(ctx, &batch)?;
    info!("Removed clip {} from {}", args.name, args.file);
    Ok(())
}

fn save(ctx: &Context, batch: &BatchDescriptor) -> CliResult<()> {
    let summary = ctx.save(batch)?;
    println!(
        "{} {} ({} file(s))",
        style("Saved").green().bold(),
        ctx.config.batch_file.display(),
        summary.written.len()
    );
    Ok(())
}
