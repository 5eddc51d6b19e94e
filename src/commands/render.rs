//! Render command for query blocks
//!
//! Implements `fv render` to resolve a block of selector text and print
//! its rows, optionally re-running it on an interval.

use std::future::Future;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use focusview_core::{QueryEngine, RenderedBlock};

use crate::error::{AppError, AppResult};
use crate::output::format_block;

/// Render a query block
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Block text, e.g. "project: Billing" (read from stdin when omitted or "-")
    #[arg(conflicts_with = "file")]
    pub block: Option<String>,

    /// Read the block text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the rendered block as JSON
    #[arg(long)]
    pub json: bool,

    /// Re-run the block every N seconds until interrupted
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,
}

impl RenderCommand {
    /// Execute the render command once.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the block text cannot be read. Query failures
    /// never surface here; they render as zero rows.
    pub async fn execute(&self, engine: &QueryEngine) -> AppResult<RenderedBlock> {
        let text = self.read_block()?;
        Ok(engine.render_block(&text).await)
    }

    /// Format a rendered block according to the output flags
    pub fn format(&self, block: &RenderedBlock) -> AppResult<String> {
        if self.json {
            Ok(serde_json::to_string_pretty(block)?)
        } else {
            Ok(format_block(block))
        }
    }

    /// Render, then keep re-running the block until Ctrl-C.
    pub async fn watch(
        &self,
        engine: &QueryEngine,
        interval: Duration,
        emit: impl FnMut(String),
    ) -> AppResult<()> {
        let ctrl_c = async {
            let _ = tokio::signal::ctrl_c().await;
        };
        self.watch_until(engine, interval, ctrl_c, emit).await
    }

    /// Render, then keep re-running the block until `shutdown` resolves.
    ///
    /// Each refresh goes through the engine's rerun path with the original
    /// block text. `emit` receives every formatted result. Shutdown is
    /// raced against the wait and against every fetch, so a hung data
    /// source does not keep the loop alive.
    pub async fn watch_until(
        &self,
        engine: &QueryEngine,
        interval: Duration,
        shutdown: impl Future<Output = ()>,
        mut emit: impl FnMut(String),
    ) -> AppResult<()> {
        tokio::pin!(shutdown);

        let mut block = tokio::select! {
            _ = &mut shutdown => return Ok(()),
            block = self.execute(engine) => block?,
        };

        loop {
            emit(self.format(&block)?);

            tokio::select! {
                _ = &mut shutdown => return Ok(()),
                _ = tokio::time::sleep(interval) => {}
            }

            let next = tokio::select! {
                _ = &mut shutdown => return Ok(()),
                next = engine.rerun(&block) => next,
            };
            block = next;
        }
    }

    /// Resolve the block text from the argument, a file, or stdin
    fn read_block(&self) -> AppResult<String> {
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path).map_err(|e| AppError::ReadFile {
                path: path.clone(),
                source: e,
            });
        }

        match self.block.as_deref() {
            Some(text) if text != "-" => Ok(text.to_string()),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(AppError::ReadStdin)?;
                Ok(text)
            }
        }
    }
}
