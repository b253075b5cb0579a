//! Deferred printing.
//!
//! Switching templates and printing happen in two steps: the caller commits
//! the new [`PrintDocument`] first, then asks the [`PrintScheduler`] to print
//! it. The scheduler waits a fixed delay on a tokio task before handing the
//! document to a [`Printer`]. Dropping the returned [`PrintHandle`] (the view
//! going away) cancels a print that has not started yet.

use std::path::PathBuf;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::{Result, StatementError};
use crate::pdf::PrintDocument;

/// Pause between committing a template and printing it
pub const PRINT_DELAY: Duration = Duration::from_millis(150);

/// The host's print facility
pub trait Printer: Send + 'static {
    /// Print the document, returning where the output went
    fn print(&self, document: &PrintDocument) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Copy)]
pub struct PrintScheduler {
    delay: Duration,
}

impl Default for PrintScheduler {
    fn default() -> Self {
        Self::new(PRINT_DELAY)
    }
}

impl PrintScheduler {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Spawn the print request. Must be called from within a tokio runtime.
    pub fn schedule<P: Printer>(&self, printer: P, document: PrintDocument) -> PrintHandle {
        let delay = self.delay;
        tracing::debug!(mode = %document.mode(), delay_ms = delay.as_millis() as u64, "print scheduled");

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(mode = %document.mode(), pages = document.page_count(), "printing");
            // printers shell out, keep them off the runtime thread
            match tokio::task::spawn_blocking(move || printer.print(&document)).await {
                Ok(result) => result,
                Err(e) => Err(StatementError::PdfGeneration(format!("print task failed: {e}"))),
            }
        });

        PrintHandle { task: Some(task) }
    }
}

/// A pending print request
#[derive(Debug)]
pub struct PrintHandle {
    task: Option<JoinHandle<Result<PathBuf>>>,
}

impl PrintHandle {
    /// Wait for the print to run and return its output location
    pub async fn wait(mut self) -> Result<PathBuf> {
        let task = self.task.take().ok_or(StatementError::PrintCancelled)?;
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(StatementError::PrintCancelled),
            Err(e) => Err(StatementError::PdfGeneration(format!("print task failed: {e}"))),
        }
    }

    /// Cancel the print if it has not started yet
    pub fn cancel(mut self) {
        self.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("pending print cancelled");
            }
            task.abort();
        }
    }
}

impl Drop for PrintHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
