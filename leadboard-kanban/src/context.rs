//! BoardContext - state and I/O primitives for board operations
//!
//! The context holds the live board, the lead store and the retry policy. It
//! offers access, not logic: commands decide what to do and call back into
//! `transition` to apply reducer messages.

use crate::error::{BoardError, Result};
use crate::reducer::{self, BoardOp};
use crate::retry::RetryPolicy;
use crate::store::LeadStore;
use crate::types::{Board, BoardLayout};
use fs2::FileExt;
use leadboard_operations::LogEntry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Context passed to every command
pub struct BoardContext {
    board: RwLock<Board>,
    store: Arc<dyn LeadStore>,
    retry: RetryPolicy,
    /// Directory holding `board.yaml` and `activity.jsonl`; memory only when absent
    root: Option<PathBuf>,
    activity: Mutex<Vec<LogEntry>>,
}

impl BoardContext {
    /// An in-memory context over `store`, starting from an empty board
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self {
            board: RwLock::new(Board::new()),
            store,
            retry: RetryPolicy::default(),
            root: None,
            activity: Mutex::new(Vec::new()),
        }
    }

    /// Persist layout and activity under `root`
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Start from an existing board instead of an empty one
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = RwLock::new(board);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn store(&self) -> &dyn LeadStore {
        self.store.as_ref()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Path to board.yaml
    pub fn layout_path(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join("board.yaml"))
    }

    /// Path to the activity log
    pub fn activity_path(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join("activity.jsonl"))
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(".lock"))
    }

    /// A layout file exists on disk
    pub fn is_initialized(&self) -> bool {
        self.layout_path().is_some_and(|p| p.exists())
    }

    // =========================================================================
    // Board state
    // =========================================================================

    /// Snapshot of the current board
    pub async fn read_board(&self) -> Board {
        self.board.read().await.clone()
    }

    /// Swap in a whole board after checking it, persisting its layout
    pub async fn replace_board(&self, board: Board) -> Result<()> {
        board.validate()?;
        let mut current = self.board.write().await;
        self.write_layout(&board.layout()).await?;
        *current = board;
        Ok(())
    }

    /// Apply one reducer message to the live board
    pub async fn transition(&self, op: &BoardOp) -> Result<Board> {
        self.transition_all(std::slice::from_ref(op)).await
    }

    /// Apply several messages as one step: all of them or none
    pub async fn transition_all(&self, ops: &[BoardOp]) -> Result<Board> {
        let (next, ()) = self
            .transition_with(|_| Ok((ops.to_vec(), ())))
            .await?;
        Ok(next)
    }

    /// Decide the messages from the board as it is at commit time.
    ///
    /// `plan` runs under the write lock, so no other transition can land
    /// between reading the board and applying its messages.
    pub async fn transition_with<T: Send>(
        &self,
        plan: impl FnOnce(&Board) -> Result<(Vec<BoardOp>, T)> + Send,
    ) -> Result<(Board, T)> {
        let mut current = self.board.write().await;
        let (ops, extra) = plan(&current)?;
        let next = reducer::apply_all(&current, &ops)?;
        if next != *current {
            self.write_layout(&next.layout()).await?;
            *current = next.clone();
            debug!(ops = ops.len(), "board transitioned");
        }
        Ok((next, extra))
    }

    // =========================================================================
    // Layout I/O
    // =========================================================================

    /// Read board.yaml
    pub async fn read_layout(&self) -> Result<BoardLayout> {
        let path = self.layout_path().filter(|p| p.exists()).ok_or_else(|| {
            BoardError::NotInitialized {
                path: self.root.clone().unwrap_or_default(),
            }
        })?;
        let content = fs::read_to_string(&path).await?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Write board.yaml (atomic write via temp file); no-op without a root
    pub async fn write_layout(&self, layout: &BoardLayout) -> Result<()> {
        let Some(path) = self.layout_path() else {
            return Ok(());
        };
        let content = serde_yaml_ng::to_string(layout)?;
        atomic_write(&path, content.as_bytes()).await?;
        Ok(())
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let Some(path) = self.activity_path() else {
            self.activity.lock().await.push(entry.clone());
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Read activity entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let mut entries = match self.activity_path() {
            None => self.activity.lock().await.clone(),
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path).await?;
                content
                    .lines()
                    .filter(|line| !line.is_empty())
                    .filter_map(|line| serde_json::from_str(line).ok())
                    .collect()
            }
            Some(_) => Vec::new(),
        };

        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire an exclusive cross-process lock (non-blocking).
    ///
    /// Returns `None` for in-memory contexts, which the board's RwLock already
    /// serializes.
    pub async fn lock(&self) -> Result<Option<BoardLock>> {
        let Some(lock_path) = self.lock_path() else {
            return Ok(None);
        };

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(BoardLock { file })),
            Err(_) => Err(BoardError::LockBusy),
        }
    }
}

/// RAII lock guard - releases on drop
pub struct BoardLock {
    file: std::fs::File,
}

impl Drop for BoardLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomic write via temp file and rename
pub(crate) async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}
