use crate::Config;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use safer_index::{migration::Step, Connection, SchemaEditor};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ApplyCommand {
    /// Migration file (if not provided, will prompt)
    file: Option<PathBuf>,
}

impl ApplyCommand {
    pub(crate) async fn run(self, config: &Config) -> Result<()> {
        let (_, migration) = super::load_migration(self.file.as_deref(), config)?;
        let steps = migration.steps()?;

        println!();
        println!(
            "  {} Applying migration: {}",
            style("→").cyan(),
            style(&migration.name).bold()
        );

        let mut conn = super::connect(config).await?;
        apply_steps(conn.as_mut(), config, &migration.app_label, &steps).await?;

        println!();
        println!(
            "  {}",
            style(format!("Successfully applied {}", migration.name))
                .green()
                .bold()
        );
        println!();

        Ok(())
    }
}

/// Runs each step forwards on `conn`, with the routers `config` describes.
pub async fn apply_steps(
    conn: &mut dyn Connection,
    config: &Config,
    app_label: &str,
    steps: &[Step<'_>],
) -> Result<()> {
    let routers = config.routers();
    let mut editor = SchemaEditor::new(conn, &routers);

    for step in steps {
        step.directive
            .database_forwards(app_label, &mut editor, &step.before, &step.after)
            .await
            .with_context(|| step.directive.describe())?;

        println!(
            "  {} {}",
            style("✓").green().bold(),
            style(step.directive.describe()).dim()
        );
    }

    Ok(())
}
