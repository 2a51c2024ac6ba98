// Confirmation prompts for destructive commands

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{oneshot, Notify};
use tracing::warn;

use client_domain::ports::ConfirmPrompt;

use crate::input::is_affirmative;

/// Asks on stdin. Anything but `y`/`yes` (or EOF) declines.
pub struct StdinConfirm;

#[async_trait]
impl ConfirmPrompt for StdinConfirm {
    async fn confirm(&self, question: &str) -> bool {
        let mut stdout = io::stdout();
        let prompt = format!("{} [y/N] ", question);
        if let Err(err) = stdout.write_all(prompt.as_bytes()).await {
            warn!(error = %err, "failed to write prompt");
            return false;
        }
        let _ = stdout.flush().await;
        let mut answer = String::new();
        match BufReader::new(io::stdin()).read_line(&mut answer).await {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&answer),
        }
    }
}

/// `clear --yes`.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmPrompt for AutoConfirm {
    async fn confirm(&self, _question: &str) -> bool {
        true
    }
}

/// Confirmation inside the watch REPL: the question waits until the REPL
/// hands it the next input line.
#[derive(Default)]
pub struct ReplConfirm {
    pending: Mutex<Option<Pending>>,
    asked: Notify,
}

struct Pending {
    question: String,
    answer: oneshot::Sender<bool>,
}

impl ReplConfirm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves once a new question is waiting.
    pub async fn question_asked(&self) {
        self.asked.notified().await
    }

    pub fn pending_question(&self) -> Option<String> {
        self.slot().as_ref().map(|pending| pending.question.clone())
    }

    /// Returns `false` when no question is waiting and the line should be
    /// handled as a command.
    pub fn answer(&self, line: &str) -> bool {
        match self.slot().take() {
            Some(pending) => {
                let _ = pending.answer.send(is_affirmative(line));
                true
            }
            None => false,
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Pending>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ConfirmPrompt for ReplConfirm {
    async fn confirm(&self, question: &str) -> bool {
        let (tx, rx) = oneshot::channel();
        *self.slot() = Some(Pending {
            question: question.to_string(),
            answer: tx,
        });
        self.asked.notify_one();
        // a dropped sender (REPL gone) declines
        rx.await.unwrap_or(false)
    }
}
