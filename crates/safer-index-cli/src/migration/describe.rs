use crate::Config;

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct DescribeCommand {
    /// Migration file (if not provided, will prompt)
    file: Option<PathBuf>,
}

impl DescribeCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        let (path, migration) = super::load_migration(self.file.as_deref(), config)?;

        println!();
        println!(
            "  {} {}",
            style(&migration.name).cyan().bold(),
            style(format!("({})", path.display())).dim()
        );
        println!();

        if migration.directives.is_empty() {
            println!("  {}", style("No directives").dim());
        }

        for directive in migration.directives() {
            println!("  {} {}", style("•").cyan(), directive.describe());
        }

        println!();
        Ok(())
    }
}
