//! CLI commands for Focusview
//!
//! This module contains all subcommand implementations for the fv CLI.

pub mod render;
pub mod tagged;

pub use render::RenderCommand;
pub use tagged::TaggedCommand;

use clap::Subcommand;
use focusview_core::QueryEngine;

use crate::error::AppResult;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a query block (project:, list-projects: or tag:)
    Render(RenderCommand),
    /// List tasks by tag, optionally limited to folders
    Tagged(TaggedCommand),
}

impl Command {
    /// Execute the command once and return its formatted output.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if input cannot be read or output cannot be encoded.
    pub async fn execute(&self, engine: &QueryEngine) -> AppResult<String> {
        match self {
            Command::Render(cmd) => {
                let block = cmd.execute(engine).await?;
                cmd.format(&block)
            }
            Command::Tagged(cmd) => {
                let rows = cmd.execute(engine).await;
                cmd.format(&rows)
            }
        }
    }
}
