use crate::{theme::dialoguer_theme, Config};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use dialoguer::Confirm;
use safer_index::{migration::Step, Connection, SchemaEditor};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct RevertCommand {
    /// Migration file (if not provided, will prompt)
    file: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl RevertCommand {
    pub(crate) async fn run(self, config: &Config) -> Result<()> {
        let (_, migration) = super::load_migration(self.file.as_deref(), config)?;
        let steps = migration.steps()?;

        if let Some(step) = steps.iter().find(|step| !step.directive.reversible()) {
            anyhow::bail!("{} is not reversible", step.directive.describe());
        }

        if !self.yes {
            let confirmed = Confirm::with_theme(&dialoguer_theme())
                .with_prompt(format!("  Revert migration {}?", migration.name))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("  {}", style("Revert cancelled").dim());
                return Ok(());
            }
        }

        println!();
        println!(
            "  {} Reverting migration: {}",
            style("→").cyan(),
            style(&migration.name).bold()
        );

        let mut conn = super::connect(config).await?;
        revert_steps(conn.as_mut(), config, &migration.app_label, &steps).await?;

        println!();
        println!(
            "  {}",
            style(format!("Successfully reverted {}", migration.name))
                .green()
                .bold()
        );
        println!();

        Ok(())
    }
}

/// Runs the steps backwards, last first, on `conn`.
pub async fn revert_steps(
    conn: &mut dyn Connection,
    config: &Config,
    app_label: &str,
    steps: &[Step<'_>],
) -> Result<()> {
    let routers = config.routers();
    let mut editor = SchemaEditor::new(conn, &routers);

    for step in steps.iter().rev() {
        step.directive
            .database_backwards(app_label, &mut editor, &step.after, &step.before)
            .await
            .with_context(|| format!("reverting: {}", step.directive.describe()))?;

        println!(
            "  {} {}",
            style("↩").yellow().bold(),
            style(step.directive.describe()).dim()
        );
    }

    Ok(())
}
