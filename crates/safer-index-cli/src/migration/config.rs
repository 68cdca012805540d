use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for migration operations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// Path to the migrations folder
    pub migrations_path: PathBuf,
}

impl MigrationConfig {
    /// Create a new MigrationConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the migrations path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.migrations_path = path.into();
        self
    }

    /// Migration files (`*.toml`) in the migrations folder, sorted by name.
    /// A missing folder holds no migrations.
    pub fn migration_files(&self) -> std::io::Result<Vec<PathBuf>> {
        if !self.migrations_path.exists() {
            return Ok(vec![]);
        }

        let mut files = vec![];
        for entry in std::fs::read_dir(&self.migrations_path)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            migrations_path: "migrations".into(),
        }
    }
}
