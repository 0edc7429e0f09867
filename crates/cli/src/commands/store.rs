//! oversight store command

use crate::context::Context;
use clap::{Args, Subcommand};
use console::style;
use std::path::PathBuf;
use store::{AdminRepository, FileStore};

#[derive(Debug, Args)]
pub struct StoreCommand {
    /// Storage file holding the admin entries
    #[arg(short, long, default_value = "ai-oversight-storage.json")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum StoreSubcommand {
    /// Write the admin state as JSON (stdout when no output is given)
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the admin state with an exported document
    Import {
        input: PathBuf,
    },
    /// Remove every ai-oversight entry from the storage file
    Clear,
}

impl StoreCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let repo = AdminRepository::new(FileStore::new(&self.file));

        match &self.command {
            StoreSubcommand::Export { output } => {
                let exported = repo.export_json()?;
                match output {
                    Some(path) => {
                        std::fs::write(path, exported)?;
                        println!("{} Exported admin state to {:?}", style("✓").green(), path);
                    }
                    None => println!("{}", exported),
                }
            }
            StoreSubcommand::Import { input } => {
                let raw = std::fs::read_to_string(input)?;
                let state = repo.import_json(&raw)?;
                if ctx.json {
                    return ctx.print_json(&state);
                }
                println!(
                    "{} Imported {} questions, {} risks, {} links (schema v{})",
                    style("✓").green(),
                    state.questions.len(),
                    state.risks.len(),
                    state.links.len(),
                    state.version
                );
            }
            StoreSubcommand::Clear => {
                let removed = repo.clear()?;
                println!("{} Removed {} entries", style("✓").green(), removed);
            }
        }
        Ok(())
    }
}
