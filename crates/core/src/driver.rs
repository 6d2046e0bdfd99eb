//! Tokio driver: runs one controller on its own task and owns its timer.
//!
//! Events arrive over an unbounded channel and are applied in order. The single
//! pending timer is a `sleep_until` branch in the same `select!`, so an edit and
//! a timer can never interleave. Dropping every handle (or calling
//! [`SearchBoxHandle::shutdown`]) disposes the controller; nothing commits after that.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::controller::{CommitSink, SearchController};
use crate::error::SearchBoxClosed;
use crate::types::SearchBoxConfig;

/// Point-in-time view of the controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub display_text: String,
    pub authoritative_text: String,
    pub pending: bool,
}

enum Command {
    Edit(String),
    Confirm,
    Clear,
    ExternalTextChanged(String),
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown,
}

pub struct SearchBoxHandle {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

/// Spawn a controller onto the current tokio runtime.
///
/// # Panics
///
/// Panics when called outside a tokio runtime, like `tokio::spawn`.
pub fn spawn_search_box<C>(config: &SearchBoxConfig, authoritative: impl Into<String>, sink: C) -> SearchBoxHandle
where
    C: CommitSink + Send + 'static,
{
    let controller = SearchController::new(config, authoritative, sink);
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(controller, rx));
    SearchBoxHandle { tx, task }
}

impl SearchBoxHandle {
    pub fn edit(&self, text: impl Into<String>) -> Result<(), SearchBoxClosed> {
        self.send(Command::Edit(text.into()))
    }

    pub fn confirm(&self) -> Result<(), SearchBoxClosed> {
        self.send(Command::Confirm)
    }

    pub fn clear(&self) -> Result<(), SearchBoxClosed> {
        self.send(Command::Clear)
    }

    pub fn external_text_changed(&self, text: impl Into<String>) -> Result<(), SearchBoxClosed> {
        self.send(Command::ExternalTextChanged(text.into()))
    }

    /// Read the controller state after every previously sent event was applied.
    pub async fn snapshot(&self) -> Result<Snapshot, SearchBoxClosed> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        rx.await.map_err(|_| SearchBoxClosed)
    }

    /// Dispose the controller and wait for the driver task to finish.
    pub async fn shutdown(self) {
        let _ = self.tx.send(Command::Shutdown);
        let _ = self.task.await;
    }

    fn send(&self, command: Command) -> Result<(), SearchBoxClosed> {
        self.tx.send(command).map_err(|_| SearchBoxClosed)
    }
}

async fn run<C: CommitSink>(mut controller: SearchController<C>, mut rx: mpsc::UnboundedReceiver<Command>) {
    loop {
        let deadline = controller.next_deadline().map(Instant::from_std);

        tokio::select! {
            biased;

            command = rx.recv() => {
                let Some(command) = command else {
                    debug!("All handles dropped");
                    break;
                };
                match command {
                    Command::Edit(text) => {
                        controller.edit(text, Instant::now().into_std());
                    }
                    Command::Confirm => {
                        controller.confirm();
                    }
                    Command::Clear => controller.clear(),
                    Command::ExternalTextChanged(text) => {
                        controller.external_text_changed(&text);
                    }
                    Command::Snapshot(reply) => {
                        let _ = reply.send(Snapshot {
                            display_text: controller.display_text().to_string(),
                            authoritative_text: controller.authoritative_text().to_string(),
                            pending: controller.pending().is_some(),
                        });
                    }
                    Command::Shutdown => break,
                }
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                controller.advance(Instant::now().into_std());
            }
        }
    }

    controller.dispose();
    debug!("Search box driver stopped");
}
