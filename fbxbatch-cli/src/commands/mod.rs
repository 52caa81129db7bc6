//! Command implementations for the CLI.
//!
//! Every command loads the batch file, works on the in-memory batch and, for
//! editing commands, writes it back through the encoder.

pub mod convert;
pub mod edit;
pub mod plan;
pub mod show;

use crate::cli::{Cli, Commands};
use crate::error::CliResult;

use fbxbatch_core::notifications::{CompositeNotifier, LogNotifier, NtfyNotifier};
use fbxbatch_core::{BatchDescriptor, CoreConfig, EncodeSummary, FsOracle, load_batch, save_batch};

use log::debug;

/// What every command needs: the resolved configuration and where
/// notifications go.
pub struct Context {
    pub config: CoreConfig,
    pub notifier: CompositeNotifier,
}

impl Context {
    /// Builds the configuration from the global flags and validates it.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let mut config = CoreConfig::new(cli.batch_file.clone());
        if let Some(backend) = &cli.backend {
            config.backend_executable = backend.clone();
        }
        config.backend_working_dir = cli.backend_dir.clone();
        config.ntfy_topic = cli.ntfy.clone();
        config.validate()?;

        let mut notifier = CompositeNotifier::new().with(LogNotifier);
        if let Some(topic) = &config.ntfy_topic {
            debug!("Sending notifications to {}", topic);
            notifier.push(Box::new(NtfyNotifier::new(topic)?));
        }

        Ok(Self { config, notifier })
    }

    pub fn load(&self) -> CliResult<BatchDescriptor> {
        load_batch(&self.config.batch_file, &self.notifier)
    }

    pub fn save(&self, batch: &BatchDescriptor) -> CliResult<EncodeSummary> {
        save_batch(&self.config.batch_file, batch, &FsOracle, &self.notifier)
    }
}

/// Runs the parsed command.
pub fn run(cli: &Cli) -> CliResult<()> {
    let ctx = Context::from_cli(cli)?;
    match &cli.command {
        Commands::Show(args) => show::run_show(&ctx, args),
        Commands::SetOutput(args) => edit::run_set_output(&ctx, args),
        Commands::AddFile(args) => edit::run_add_file(&ctx, args),
        Commands::RemoveFile(args) => edit::run_remove_file(&ctx, args),
        Commands::AddClip(args) => edit::run_add_clip(&ctx, args),
        Commands::RemoveClip(args) => edit::run_remove_clip(&ctx, args),
        Commands::Plan(args) => plan::run_plan(&ctx, args),
        Commands::Convert(args) => convert::run_convert(&ctx, args),
    }
}
