mod apply;
pub use apply::*;

mod config;
pub use config::*;

mod describe;
pub use describe::*;

mod revert;
pub use revert::*;

use crate::{theme::dialoguer_theme, Config};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use console::style;
use dialoguer::Select;
use safer_index::{driver, Connection, MigrationFile};
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum MigrationCommand {
    /// Print what each directive of a migration file does
    Describe(DescribeCommand),

    /// Run a migration file forwards
    Apply(ApplyCommand),

    /// Run a migration file backwards
    Revert(RevertCommand),
}

impl MigrationCommand {
    pub(crate) async fn run(self, config: &Config) -> Result<()> {
        match self {
            Self::Describe(cmd) => cmd.run(config),
            Self::Apply(cmd) => cmd.run(config).await,
            Self::Revert(cmd) => cmd.run(config).await,
        }
    }
}

/// Loads `file`, or lets the user pick one from the migrations folder.
fn load_migration(file: Option<&Path>, config: &Config) -> Result<(PathBuf, MigrationFile)> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => pick_migration(config)?,
    };

    let migration = MigrationFile::load(&path)
        .with_context(|| format!("loading migration {}", path.display()))?;
    Ok((path, migration))
}

fn pick_migration(config: &Config) -> Result<PathBuf> {
    let files = config.migration.migration_files()?;

    if files.is_empty() {
        eprintln!(
            "{}",
            style(format!(
                "No migration files found in {}",
                config.migration.migrations_path.display()
            ))
            .red()
            .bold()
        );
        bail!("no migration files found");
    }

    let names: Vec<String> = files
        .iter()
        .map(|path| format!("  {}", path.display()))
        .collect();

    println!();
    let selected = Select::with_theme(&dialoguer_theme())
        .with_prompt("  Select migration")
        .items(&names)
        .default(names.len() - 1)
        .interact()?;

    Ok(files[selected].clone())
}

async fn connect(config: &Config) -> Result<Box<dyn Connection>> {
    let Some(url) = &config.database_url else {
        bail!("no database URL configured; pass --database-url or set DATABASE_URL");
    };

    println!(
        "  {} Connecting to {}",
        style("→").cyan(),
        style(driver::redact_url_password(url)).dim()
    );

    Ok(driver::connect(url, &config.database_alias).await?)
}
