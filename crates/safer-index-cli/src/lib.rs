mod config;
mod migration;
mod theme;

pub use config::*;
pub use migration::*;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Entry point of the `safer-index` command
pub struct SaferIndexCli;

impl SaferIndexCli {
    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run() -> Result<()> {
        let cli = Cli::parse();
        cli.run().await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        cli.run().await
    }
}

#[derive(Parser, Debug)]
#[command(name = "safer-index")]
#[command(about = "Apply and revert concurrent PostgreSQL index migrations")]
#[command(version)]
struct Cli {
    /// Configuration file [default: SaferIndex.toml, when present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database connection URL
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Name routers see for the database
    #[arg(long, global = true)]
    database_alias: Option<String>,

    /// Only run directives on this database alias (repeatable)
    #[arg(long = "only-database", global = true, value_name = "ALIAS")]
    only_databases: Vec<String>,

    #[command(subcommand)]
    command: MigrationCommand,
}

impl Cli {
    async fn run(self) -> Result<()> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(url) = self.database_url {
            config = config.database_url(url);
        }
        if let Some(alias) = self.database_alias {
            config = config.database_alias(alias);
        }
        if !self.only_databases.is_empty() {
            config = config.allowed_databases(self.only_databases);
        }

        self.command.run(&config).await
    }
}
