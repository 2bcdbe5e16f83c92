//! Everything a command needs: configuration, the board and output settings

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::Printer;
use leadboard_config::{LeadboardConfig, RetrySettings, StoreConfig};
use leadboard_kanban::board::LoadBoard;
use leadboard_kanban::{
    BoardContext, BoardError, BoardOperationProcessor, Execute, FileLeadStore, LeadStore,
    MemoryLeadStore, OperationProcessor, RestLeadStore, RetryPolicy,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct CliContext {
    pub config: LeadboardConfig,
    printer: Printer,
    board: BoardContext,
    processor: BoardOperationProcessor,
}

impl CliContext {
    pub fn new(
        config: LeadboardConfig,
        format: OutputFormat,
        quiet: bool,
        actor: Option<String>,
    ) -> CliResult<Self> {
        let store = build_store(&config)?;
        debug!(
            store = config.store.kind(),
            data_dir = %config.data_dir.display(),
            "opening board"
        );
        let board = BoardContext::new(store)
            .with_root(config.data_dir.clone())
            .with_retry_policy(retry_policy(&config.retry));
        let processor = match actor {
            Some(actor) => BoardOperationProcessor::with_actor(actor),
            None => BoardOperationProcessor::new(),
        };
        Ok(Self {
            config,
            printer: Printer::new(format, quiet),
            board,
            processor,
        })
    }

    pub fn board(&self) -> &BoardContext {
        &self.board
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    /// Run an operation through the processor so mutations reach the activity log
    pub async fn execute<O>(&self, operation: &O) -> CliResult<Value>
    where
        O: Execute<BoardContext, BoardError> + 'static,
    {
        Ok(self.processor.process(operation, &self.board).await?)
    }

    /// Rebuild the board from board.yaml and the lead store
    pub async fn load(&self) -> CliResult<()> {
        self.execute(&LoadBoard).await?;
        Ok(())
    }
}

fn build_store(config: &LeadboardConfig) -> CliResult<Arc<dyn LeadStore>> {
    Ok(match &config.store {
        StoreConfig::Memory => Arc::new(MemoryLeadStore::new()),
        StoreConfig::File { .. } => Arc::new(FileLeadStore::new(config.leads_dir())),
        StoreConfig::Rest {
            url,
            api_key,
            table,
            timeout_secs,
        } => Arc::new(
            RestLeadStore::new(url, api_key, Duration::from_secs(*timeout_secs))
                .map_err(BoardError::from)?
                .with_table(table),
        ),
    })
}

fn retry_policy(settings: &RetrySettings) -> RetryPolicy {
    RetryPolicy {
        max_retries: settings.max_retries,
        initial_delay: Duration::from_millis(settings.initial_delay_ms),
        backoff_multiplier: settings.backoff_multiplier,
        max_delay: Duration::from_millis(settings.max_delay_ms),
    }
}
