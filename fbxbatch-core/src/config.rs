// ============================================================================
// fbxbatch-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// KEY COMPONENTS:
// - CoreConfig: where the batch file lives, which backend to start and where
// - Default constants: the names the converter backend expects
//
// USAGE:
// Instances of CoreConfig are created by hosts (like fbxbatch-cli) from their
// own arguments and passed to the session functions.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// File name the converter backend reads from its working directory.
pub const DEFAULT_BATCH_FILE: &str = "batch.xml";

/// Converter backend executable started after the batch file is written.
#[cfg(windows)]
pub const DEFAULT_BACKEND_EXECUTABLE: &str = "TTconverterBackend.exe";
#[cfg(not(windows))]
pub const DEFAULT_BACKEND_EXECUTABLE: &str = "TTconverterBackend";

/// Extension of the mesh files the backend produces.
pub const OUTPUT_EXTENSION: &str = "ttmesh";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the fbxbatch-core library.
///
/// # Examples
///
/// ```rust
/// use fbxbatch_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(PathBuf::from("jobs/batch.xml"));
/// config.ntfy_topic = Some("https://ntfy.sh/my-topic".to_string());
/// assert_eq!(config.working_dir(), PathBuf::from("jobs"));
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----

    /// Batch document read at startup and written before conversion
    pub batch_file: PathBuf,

    /// Converter backend started by `convert`
    pub backend_executable: PathBuf,

    /// Directory the backend is started in. Defaults to the batch file's
    /// directory, since the backend looks for `batch.xml` there.
    pub backend_working_dir: Option<PathBuf>,

    // ---- Notification Settings ----

    /// Optional ntfy.sh topic URL for push notifications
    pub ntfy_topic: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_BATCH_FILE))
    }
}

impl CoreConfig {
    pub fn new(batch_file: PathBuf) -> Self {
        Self {
            batch_file,
            backend_executable: PathBuf::from(DEFAULT_BACKEND_EXECUTABLE),
            backend_working_dir: None,
            ntfy_topic: None,
        }
    }

    /// Directory the backend runs in.
    pub fn working_dir(&self) -> PathBuf {
        if let Some(dir) = &self.backend_working_dir {
            return dir.clone();
        }
        match self.batch_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.batch_file.as_os_str().is_empty() {
            return Err(CoreError::Config("batch file path must not be empty".to_string()));
        }
        if self.batch_file.file_name().is_none() {
            return Err(CoreError::Config(format!(
                "batch file path '{}' does not name a file",
                self.batch_file.display()
            )));
        }
        if self.backend_executable.as_os_str().is_empty() {
            return Err(CoreError::Config(
                "backend executable must not be empty".to_string(),
            ));
        }
        if let Some(dir) = &self.backend_working_dir {
            if !Path::new(dir).is_dir() {
                return Err(CoreError::Config(format!(
                    "backend working directory '{}' does not exist",
                    dir.display()
                )));
            }
        }
        if let Some(topic) = &self.ntfy_topic {
            if !topic.starts_with("https://") {
                return Err(CoreError::Config(format!(
                    "ntfy topic '{}' must be an https:// URL",
                    topic
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.batch_file, PathBuf::from("batch.xml"));
        assert_eq!(config.backend_executable, PathBuf::from(DEFAULT_BACKEND_EXECUTABLE));
        assert_eq!(config.working_dir(), PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_working_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CoreConfig::new(PathBuf::from("jobs/batch.xml"));
        assert_eq!(config.working_dir(), PathBuf::from("jobs"));

        config.backend_working_dir = Some(dir.path().to_path_buf());
        assert_eq!(config.working_dir(), dir.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CoreConfig::new(PathBuf::new());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config = CoreConfig::default();
        config.backend_executable = PathBuf::new();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config = CoreConfig::default();
        config.ntfy_topic = Some("ntfy.sh/topic".to_string());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config = CoreConfig::default();
        config.backend_working_dir = Some(PathBuf::from("surely/this/does/not/exist"));
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
