use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Data directory shared by the file-based storage backends
#[derive(Debug, Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a connection, creating the base directory on first run
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {:?}", base_path))?;
            info!("Created data directory: {:?}", base_path);
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Read a whole file. Returns None when the file does not exist yet.
    pub fn read_if_exists(&self, path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            debug!("{:?} does not exist yet", path);
            return Ok(None);
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Some(content))
    }

    /// `users.json` -> `users.json.tmp`, so each data file gets its own temp file
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Replace a file's contents by writing a temp file and renaming it over
    /// the target, so readers never see a half-written file.
    pub fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = Self::temp_path(path);
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move {:?} into place", temp_path))?;
        debug!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }
}
