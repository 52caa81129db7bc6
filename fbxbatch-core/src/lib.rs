//! Core library for building and exchanging FBX conversion batches.
//!
//! A batch lists input files, their collision generation setting and named
//! animation clips, plus a shared output directory. Hosts edit a
//! [`BatchDescriptor`], write it to `batch.xml` with [`codec::encode`] and start
//! the converter backend, which reads the same file on its own.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use fbxbatch_core::{BatchDescriptor, ClipDescriptor, CollisionType, FileEntry};
//! use fbxbatch_core::notifications::LogNotifier;
//! use fbxbatch_core::oracle::FsOracle;
//! use std::fs::File;
//!
//! let mut batch = BatchDescriptor::new("C:/out/");
//! batch.add_file(
//!     "C:/assets/hero.fbx",
//!     FileEntry::new(CollisionType::Convex)
//!         .with_clip("Walk", ClipDescriptor::new(0.0, 30.0, 24.0)),
//! )?;
//!
//! let mut file = File::create("batch.xml")?;
//! let summary = fbxbatch_core::codec::encode(&batch, &mut file, &FsOracle, &LogNotifier)?;
//! println!("{} written, {} skipped", summary.written.len(), summary.skipped.len());
//!
//! let _reloaded = fbxbatch_core::codec::decode(File::open("batch.xml")?, &LogNotifier);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod notifications;
pub mod oracle;
pub mod plan;
pub mod session;

// Re-exports for public API
pub use codec::{EncodeSummary, decode, encode, try_decode};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult, DecodeError};
pub use model::{BatchDescriptor, ClipDescriptor, CollisionType, FileEntry, OrderedMap};
pub use notifications::{Notification, Notifier, Severity};
pub use oracle::{ExistenceOracle, FsOracle};
pub use plan::{ConversionJob, plan};
pub use session::{ConvertOutcome, convert, load_batch, save_batch};
