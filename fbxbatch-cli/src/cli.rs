// fbxbatch-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use fbxbatch_core::CollisionType;
use fbxbatch_core::config::DEFAULT_BATCH_FILE;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "fbxbatch: FBX conversion batch editor",
    long_about = "Edits batch.xml and launches the FBX converter backend via the fbxbatch-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Batch document to read and write
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "FBXBATCH_BATCH_FILE",
        default_value = DEFAULT_BATCH_FILE
    )]
    pub batch_file: PathBuf,

    /// Converter backend executable started by `convert`
    #[arg(long, global = true, value_name = "EXECUTABLE", env = "FBXBATCH_BACKEND")]
    pub backend: Option<PathBuf>,

    /// Directory the backend is started in (defaults to the batch file's directory)
    #[arg(long, global = true, value_name = "DIR", env = "FBXBATCH_BACKEND_DIR")]
    pub backend_dir: Option<PathBuf>,

    /// Optional: ntfy.sh topic URL for push notifications (e.g., https://ntfy.sh/your_topic)
    /// Can also be set via the FBXBATCH_NTFY_TOPIC environment variable.
    #[arg(long, global = true, value_name = "TOPIC_URL", env = "FBXBATCH_NTFY_TOPIC")]
    pub ntfy: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the current batch
    Show(ShowArgs),
    /// Sets the directory converted meshes are written to
    SetOutput(SetOutputArgs),
    /// Adds an FBX file to the batch
    AddFile(AddFileArgs),
    /// Removes an FBX file from the batch
    RemoveFile(RemoveFileArgs),
    /// Adds a named animation clip to a file of the batch
    AddClip(AddClipArgs),
    /// Removes an animation clip from a file of the batch
    RemoveClip(RemoveClipArgs),
    /// Prints the conversion jobs the backend will run
    Plan(PlanArgs),
    /// Writes the batch file and starts the converter backend
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print the batch as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SetOutputArgs {
    /// Output directory, stored verbatim (include the trailing separator)
    #[arg(value_name = "DIR")]
    pub output_dir: String,
}

/// Collision mesh choices offered on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum CollisionArg {
    None,
    Convex,
    Concave,
}

impl From<CollisionArg> for CollisionType {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::None => CollisionType::None,
            CollisionArg::Convex => CollisionType::Convex,
            CollisionArg::Concave => CollisionType::Concave,
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddFileArgs {
    /// FBX file to convert; it must exist
    #[arg(value_name = "FBX_FILE")]
    pub path: String,

    /// Collision mesh to generate
    #[arg(short, long, value_enum, value_name = "TYPE")]
    pub collision: CollisionArg,
}

#[derive(Parser, Debug)]
pub struct RemoveFileArgs {
    #[arg(value_name = "FBX_FILE")]
    pub path: String,
}

#[derive(Parser, Debug)]
pub struct AddClipArgs {
    /// File of the batch the clip belongs to
    #[arg(value_name = "FBX_FILE")]
    pub file: String,

    /// Clip name, unique within the file
    #[arg(value_name = "NAME")]
    pub name: String,

    /// First frame of the clip
    #[arg(long, value_name = "FRAME", allow_negative_numbers = true)]
    pub begin: f64,

    /// Last frame of the clip
    #[arg(long, value_name = "FRAME", allow_negative_numbers = true)]
    pub end: f64,

    /// Playback rate in frames per second
    #[arg(long, value_name = "FPS")]
    pub fps: f64,
}

#[derive(Parser, Debug)]
pub struct RemoveClipArgs {
    #[arg(value_name = "FBX_FILE")]
    pub file: String,

    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Print the jobs as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Only write the batch file, do not start the backend
    #[arg(long, default_value_t = false)]
    pub no_launch: bool,
}
