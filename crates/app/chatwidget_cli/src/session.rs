//! Interactive session: each stdin line is one form submission.

use chatwidget_core::view::memory::MemoryInput;
use chatwidget_core::view::{Alerter, ChatLog, InputField};
use chatwidget_core::{ChatInputHandler, ChatTransport, SubmitError};
use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Submission counts for one session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub rendered: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Submit lines from `reader` until EOF.
///
/// A failed exchange leaves its text in the input; an empty line then
/// resubmits it instead of submitting nothing.
pub async fn run<T, L, A, R>(
    handler: &ChatInputHandler<T, MemoryInput, L, A>,
    reader: R,
) -> crate::Result<SessionSummary>
where
    T: ChatTransport,
    L: ChatLog,
    A: Alerter,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = SessionSummary::default();

    while let Some(line) = lines.next_line().await? {
        let input = handler.input();
        if !line.is_empty() || input.value().is_empty() {
            input.set(line);
        }

        match handler.submit().await {
            Ok(_) => summary.rendered += 1,
            Err(SubmitError::EmptyInput) => summary.rejected += 1,
            Err(e @ SubmitError::View(_)) => return Err(e.into()),
            Err(_) => summary.failed += 1,
        }
    }

    info!(
        "Session ended: {} rendered, {} rejected, {} failed",
        summary.rendered, summary.rejected, summary.failed
    );
    Ok(summary)
}
