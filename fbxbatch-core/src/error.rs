// ============================================================================
// fbxbatch-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the fbxbatch core library
//
// KEY COMPONENTS:
// - DecodeError: structural problems found while walking a batch document.
//   These never reach callers of `decode`, which falls back to an empty batch.
// - CoreError: everything a caller can actually observe (sink/source failures,
//   editing conflicts, configuration and backend launch problems).

use thiserror::Error;

/// A mismatch between a batch document and the expected element grammar.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed XML: {0}")]
    Syntax(String),

    #[error("document ended before the batch was complete")]
    UnexpectedEof,

    #[error("missing <{name}> element inside <{parent}>")]
    MissingElement { name: String, parent: String },

    #[error("expected {expected}, found {found}")]
    UnexpectedElement { expected: String, found: String },

    #[error("unexpected text inside <{element}>")]
    UnexpectedText { element: String },

    #[error("<{element}> is missing the {attribute} attribute")]
    MissingAttribute { element: String, attribute: String },

    #[error("{attribute}=\"{value}\" is not a decimal number")]
    InvalidNumber { attribute: String, value: String },

    #[error("file '{0}' appears more than once")]
    DuplicateFile(String),

    #[error("clip '{clip}' appears more than once in '{file}'")]
    DuplicateClip { file: String, clip: String },
}

/// Custom error types for fbxbatch
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to write batch document: {0}")]
    Sink(#[source] std::io::Error),

    #[error("Unable to read batch document: {0}")]
    Source(#[source] std::io::Error),

    #[error("Invalid batch document: {0}")]
    Decode(#[from] DecodeError),

    #[error("File '{0}' is already part of the batch")]
    DuplicateFile(String),

    #[error("An animation clip named '{clip}' already exists for '{file}'")]
    DuplicateClip { file: String, clip: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid animation clip: {0}")]
    InvalidClip(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Add .fbx files to the batch before converting")]
    EmptyBatch,

    #[error("Please provide an output directory")]
    MissingOutputDir,

    #[error("Failed to launch converter backend '{path}': {source}")]
    Backend {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fbxbatch operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
