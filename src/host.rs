//! Terminal host for the `calc` binary.
//!
//! Fills a [`MemoryPage`] from command-line text, fires the operator callback
//! and prints the `result` element on success.

use crate::{
    OperatorCallback, Outcome, Result,
    ui::{INPUT_A, INPUT_B, MemoryPage, Notifier, RESULT_ELEMENT},
};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

pub const MALFORMED_LINE_NOTICE: &str = "Expected: A B OP";

/// Tally of an interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub resolved: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SessionSummary {
    /// 0 when no submitted line failed. Skipped lines do not count as failures.
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 { 0 } else { 1 }
    }
}

pub fn exit_code(outcome: &Outcome) -> i32 {
    if outcome.is_resolved() { 0 } else { 1 }
}

pub struct TerminalHost<W> {
    page: Arc<MemoryPage>,
    callback: OperatorCallback,
    notifier: Arc<dyn Notifier>,
    out: W,
}

impl<W: AsyncWrite + Unpin> TerminalHost<W> {
    pub fn new(
        page: Arc<MemoryPage>,
        callback: OperatorCallback,
        notifier: Arc<dyn Notifier>,
        out: W,
    ) -> Self {
        Self {
            page,
            callback,
            notifier,
            out,
        }
    }

    pub fn page(&self) -> &MemoryPage {
        &self.page
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Submits one calculation. On success the `result` element is printed.
    pub async fn fire(&mut self, a: &str, b: &str, op: &str) -> Result<Outcome> {
        self.page.set_input(INPUT_A, a);
        self.page.set_input(INPUT_B, b);

        let outcome = (self.callback)(op.to_string()).await?;
        if outcome.is_resolved() {
            let text = self.page.text_content(RESULT_ELEMENT).unwrap_or_default();
            self.out.write_all(text.as_bytes()).await?;
            self.out.write_all(b"\n").await?;
            self.out.flush().await?;
        }
        Ok(outcome)
    }

    /// Reads `A B OP` lines until EOF, `quit` or `exit`.
    pub async fn run_lines<R: AsyncBufRead + Unpin>(&mut self, reader: R) -> Result<SessionSummary> {
        let mut lines = reader.lines();
        let mut summary = SessionSummary::default();

        while let Some(raw) = lines.next_line().await? {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "quit" || line == "exit" {
                debug!("Session ended by {:?}", line);
                break;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let [a, b, op] = fields.as_slice() else {
                warn!("Skipping malformed line: {:?}", line);
                self.notifier.notify(MALFORMED_LINE_NOTICE);
                summary.skipped += 1;
                continue;
            };

            if self.fire(a, b, op).await?.is_resolved() {
                summary.resolved += 1;
            } else {
                summary.failed += 1;
            }
        }

        Ok(summary)
    }
}
