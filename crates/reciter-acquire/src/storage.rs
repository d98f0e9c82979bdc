use anyhow::{Context, Result};
use reciter_model::Reciter;
use std::fs;
use std::path::{Path, PathBuf};

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create images directory {}", dir.display()))
}

/// The images directory. A file's presence is the only record that a
/// reciter has been handled.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Provision the directory and return a handle to it.
    pub fn provision(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<id>.jpg`
    pub fn path_for(&self, reciter: &Reciter) -> PathBuf {
        self.dir.join(reciter.image_file_name())
    }

    pub fn is_satisfied(&self, reciter: &Reciter) -> bool {
        self.path_for(reciter).exists()
    }
}
