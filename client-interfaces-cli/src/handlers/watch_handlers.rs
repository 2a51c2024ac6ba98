use std::future::Future;
use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use client_application::{AppState, EventStreamClient};

use crate::error::CliError;
use crate::input::{parse_line, Input, HELP};
use crate::prompt::ReplConfirm;
use crate::render::render_view;

/// Live dashboard with a line-oriented REPL. Returns after `/quit`, EOF
/// on stdin, or `shutdown` resolving; the client is torn down first.
pub async fn run_watch<F>(state: AppState, shutdown: F) -> Result<(), CliError>
where
    F: Future<Output = ()>,
{
    let prompt = Arc::new(ReplConfirm::new());
    let state = AppState {
        confirm: prompt.clone(),
        ..state
    };
    let (handle, task) = EventStreamClient::spawn(state);
    let mut view = handle.view();
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break Ok(());
            }
            changed = view.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let frame = render_view(&view.borrow_and_update(), prompt.pending_question().as_deref());
                if let Err(err) = write_flush(&mut stdout, &frame).await {
                    break Err(err);
                }
            }
            _ = prompt.question_asked() => {
                let frame = render_view(&view.borrow(), prompt.pending_question().as_deref());
                if let Err(err) = write_flush(&mut stdout, &frame).await {
                    break Err(err);
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break Ok(()),
                    Err(err) => break Err(err.into()),
                };
                if prompt.answer(&line) {
                    continue;
                }
                match parse_line(&line) {
                    Ok(Input::Commands(commands)) => {
                        for command in commands {
                            if let Err(err) = handle.send(command).await {
                                warn!(error = %err, "client stopped accepting commands");
                            }
                        }
                    }
                    Ok(Input::Help) => {
                        if let Err(err) = write_flush(&mut stdout, &format!("{}\n> ", HELP)).await {
                            break Err(err);
                        }
                    }
                    Ok(Input::Quit) => break Ok(()),
                    Ok(Input::Empty) => {}
                    Err(message) => {
                        if let Err(err) = write_flush(&mut stdout, &format!("{}\n> ", message)).await {
                            break Err(err);
                        }
                    }
                }
            }
        }
    };

    handle.shutdown();
    if let Err(err) = task.await {
        warn!(error = %err, "client task ended abnormally");
    }
    let _ = write_flush(&mut stdout, "\n").await;
    result
}

async fn write_flush(stdout: &mut io::Stdout, text: &str) -> Result<(), CliError> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
