// ============================================================================
// fbxbatch-core/src/session.rs
// ============================================================================
//
// SESSION: Loading, saving and handing off the batch file
//
// KEY COMPONENTS:
// - load_batch: read the batch file at startup (missing file = first run)
// - save_batch: encode into a temporary file and atomically replace the target
// - convert: the "convert" action of the host: checks, save, start the backend
//
// Every file handle opened here is closed before the function returns, on the
// success path as well as on every error path.

use crate::codec::{EncodeSummary, decode, encode};
use crate::config::{CoreConfig, DEFAULT_BATCH_FILE};
use crate::error::{CoreError, CoreResult};
use crate::model::BatchDescriptor;
use crate::notifications::Notifier;
use crate::oracle::ExistenceOracle;

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

/// Result of a successful [`convert`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutcome {
    pub summary: EncodeSummary,
    /// Process id of the started backend, if one was started
    pub backend_pid: Option<u32>,
}

/// Reads the batch file at `path`.
///
/// A missing file yields an empty batch without any notification. Unreadable
/// contents also yield an empty batch, reported through `notifier`.
///
/// # Errors
///
/// * `CoreError::Source` - if the file exists but cannot be opened
pub fn load_batch(path: &Path, notifier: &dyn Notifier) -> CoreResult<BatchDescriptor> {
    match File::open(path) {
        Ok(file) => {
            debug!("Loading batch file {}", path.display());
            Ok(decode(file, notifier))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No batch file at {}, starting empty", path.display());
            Ok(BatchDescriptor::default())
        }
        Err(e) => Err(CoreError::Source(e)),
    }
}

/// Writes `batch` to `path`, replacing any previous batch file.
///
/// The document is encoded into a temporary file next to `path` and renamed
/// over it only after the encode succeeded, so a failure leaves the previous
/// file untouched and no partial document behind.
pub fn save_batch(
    path: &Path,
    batch: &BatchDescriptor,
    oracle: &dyn ExistenceOracle,
    notifier: &dyn Notifier,
) -> CoreResult<EncodeSummary> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(CoreError::Sink)?;
    let summary = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        encode(batch, &mut writer, oracle, notifier)?
    };
    temp.as_file().sync_all().map_err(CoreError::Sink)?;
    temp.persist(path).map_err(|e| CoreError::Sink(e.error))?;

    info!(
        "Saved {} file(s) to {}",
        summary.written.len(),
        path.display()
    );
    Ok(summary)
}

/// Writes the batch file and optionally starts the converter backend.
///
/// # Errors
///
/// * `CoreError::EmptyBatch` - if the batch has no files
/// * `CoreError::MissingOutputDir` - if no output directory is set
/// * `CoreError::Sink` - if the batch file cannot be written
/// * `CoreError::Backend` - if the backend cannot be started
pub fn convert(
    config: &CoreConfig,
    batch: &BatchDescriptor,
    oracle: &dyn ExistenceOracle,
    notifier: &dyn Notifier,
    launch: bool,
) -> CoreResult<ConvertOutcome> {
    if batch.files.is_empty() {
        return Err(CoreError::EmptyBatch);
    }
    if batch.output_dir.is_empty() {
        return Err(CoreError::MissingOutputDir);
    }

    let summary = save_batch(&config.batch_file, batch, oracle, notifier)?;

    let backend_pid = if launch {
        Some(launch_backend(config)?)
    } else {
        None
    };

    Ok(ConvertOutcome {
        summary,
        backend_pid,
    })
}

/// Starts the converter backend in the configured working directory and
/// returns its process id. The backend is not waited for.
pub fn launch_backend(config: &CoreConfig) -> CoreResult<u32> {
    let working_dir = config.working_dir();
    let executable = resolve_executable(&config.backend_executable);

    if config.batch_file.file_name().is_some_and(|name| name != DEFAULT_BATCH_FILE) {
        warn!(
            "The backend reads {} from its working directory, but the batch was written to {}",
            DEFAULT_BATCH_FILE,
            config.batch_file.display()
        );
    }

    info!(
        "Starting converter backend {} in {}",
        executable.display(),
        working_dir.display()
    );
    let child = Command::new(&executable)
        .current_dir(&working_dir)
        .spawn()
        .map_err(|source| CoreError::Backend {
            path: executable.display().to_string(),
            source,
        })?;

    debug!("Backend started with pid {}", child.id());
    Ok(child.id())
}

// A relative path with directories would otherwise be resolved against the
// backend's working directory on some platforms.
fn resolve_executable(executable: &Path) -> PathBuf {
    let has_dirs = executable
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty());
    if executable.is_relative() && has_dirs {
        if let Ok(cwd) = std::env::current_dir() {
            return cwd.join(executable);
        }
    }
    executable.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_executable() {
        assert_eq!(resolve_executable(Path::new("TTconverterBackend")), PathBuf::from("TTconverterBackend"));
        let resolved = resolve_executable(Path::new("bin/TTconverterBackend"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("bin/TTconverterBackend"));
    }
}
