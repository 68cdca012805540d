use crate::migration::MigrationConfig;

use anyhow::{Context, Result};
use safer_index::{router::OnlyDatabases, Routers};
use serde::Deserialize;
use std::path::Path;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "SaferIndex.toml";

/// Configuration for safer-index CLI operations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: Option<String>,

    /// Name routers see for the database
    pub database_alias: String,

    /// Aliases directives may run on. Empty allows every database.
    pub allowed_databases: Vec<String>,

    /// Migration-related configuration
    pub migration: MigrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            database_alias: "default".to_string(),
            allowed_databases: Vec::new(),
            migration: MigrationConfig::default(),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, or `SaferIndex.toml` when no path is given and that file
    /// exists. Falls back to the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the database alias
    pub fn database_alias(mut self, alias: impl Into<String>) -> Self {
        self.database_alias = alias.into();
        self
    }

    /// Restrict directives to the given database aliases
    pub fn allowed_databases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_databases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the migration configuration
    pub fn migration(mut self, migration: MigrationConfig) -> Self {
        self.migration = migration;
        self
    }
}

impl Config {
    /// The router chain directives consult before touching the database.
    pub fn routers(&self) -> Routers {
        if self.allowed_databases.is_empty() {
            Routers::new()
        } else {
            Routers::new().with(OnlyDatabases::new(self.allowed_databases.iter().cloned()))
        }
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use safer_index::Hints;
    use std::path::PathBuf;

    const HINTS: Hints<'static> = Hints {
        model_name: "IntModel",
        table: "example_app_intmodel",
        index: "int_field_idx",
        directive: "AddIndexConcurrently",
    };

    #[test]
    fn defaults() {
        let config = Config::new();

        assert_eq!(config.database_url, None);
        assert_eq!(config.database_alias, "default");
        assert!(config.allowed_databases.is_empty());
        assert_eq!(config.migration.migrations_path, PathBuf::from("migrations"));
    }

    #[test]
    fn parses_file() {
        let config: Config = r#"
            database_url = "postgresql://app@localhost/orders"
            database_alias = "primary"
            allowed_databases = ["primary", "analytics"]

            [migration]
            migrations_path = "db/migrations"
        "#
        .parse()
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgresql://app@localhost/orders")
        );
        assert_eq!(config.database_alias, "primary");
        assert_eq!(config.allowed_databases, ["primary", "analytics"]);
        assert_eq!(
            config.migration.migrations_path,
            PathBuf::from("db/migrations")
        );
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config: Config = "database_alias = \"replica\"".parse().unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.migration.migrations_path, PathBuf::from("migrations"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!("database = \"x\"".parse::<Config>().is_err());
    }

    #[test]
    fn builder_overrides() {
        let config = Config::new()
            .database_url("postgresql://localhost/orders")
            .database_alias("primary")
            .migration(MigrationConfig::new().path("db"));

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgresql://localhost/orders")
        );
        assert_eq!(config.database_alias, "primary");
        assert_eq!(config.migration.migrations_path, PathBuf::from("db"));
    }

    #[test]
    fn routers_allow_everything_by_default() {
        let routers = Config::new().routers();

        assert!(routers.is_empty());
        assert!(routers.allow_migrate("replica", "example_app", &HINTS));
    }

    #[test]
    fn allowed_databases_gate_the_routers() {
        let routers = Config::new()
            .allowed_databases(["primary"])
            .routers();

        assert!(routers.allow_migrate("primary", "example_app", &HINTS));
        assert!(!routers.allow_migrate("replica", "example_app", &HINTS));
    }
}
