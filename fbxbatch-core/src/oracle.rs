//! Existence checks for the input files referenced by a batch.
//!
//! The encoder asks an [`ExistenceOracle`] about every file before writing it,
//! so hosts (and tests) decide what "exists" means.

use std::path::Path;

/// Answers whether a referenced input file is currently present.
pub trait ExistenceOracle {
    fn exists(&self, path: &str) -> bool;
}

/// Checks the local filesystem. Only regular files count; a directory with the
/// same name does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOracle;

impl ExistenceOracle for FsOracle {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }
}

impl<F> ExistenceOracle for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_fs_oracle_only_accepts_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hero.fbx");
        File::create(&file).unwrap();

        assert!(FsOracle.exists(file.to_str().unwrap()));
        assert!(!FsOracle.exists(dir.path().to_str().unwrap()));
        assert!(!FsOracle.exists(dir.path().join("missing.fbx").to_str().unwrap()));
    }

    #[test]
    fn test_closure_oracle() {
        let oracle = |path: &str| path.ends_with(".fbx");
        assert!(oracle.exists("a.fbx"));
        assert!(!oracle.exists("a.obj"));
    }
}
