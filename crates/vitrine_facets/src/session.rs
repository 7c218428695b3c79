//! Async driver for a [`FilterController`].
//!
//! One task owns the controller. Toggles arrive as commands, facet snapshots
//! are published immediately, and page fetches run on their own tasks whose
//! results come back to the owner tagged with their request sequence. Issuing
//! a request aborts the fetch it supersedes.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{AbortHandle, JoinHandle, JoinSet};
use vitrine_ids::TermUid;

use crate::controller::{FilterController, FilterSnapshot, PageOutcome, PageRequest, RequestSeq};
use crate::error::{PageSourceError, SessionError};
use crate::source::{ItemPage, PageOptions, PageSource};

const COMMAND_BUFFER: usize = 64;

#[derive(Debug)]
enum FilterCommand {
    SetTerm {
        category: String,
        term: TermUid,
        selected: bool,
    },
    Reset,
    SetPageOptions(PageOptions),
    Sync(oneshot::Sender<()>),
    Shutdown,
}

/// Cloneable handle used to drive a running session.
#[derive(Clone)]
pub struct FilterHandle {
    commands: mpsc::Sender<FilterCommand>,
    snapshots: watch::Receiver<FilterSnapshot>,
}

impl FilterHandle {
    async fn send(&self, command: FilterCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub async fn set_term(
        &self,
        category: impl Into<String>,
        term: TermUid,
        selected: bool,
    ) -> Result<(), SessionError> {
        self.send(FilterCommand::SetTerm {
            category: category.into(),
            term,
            selected,
        })
        .await
    }

    pub async fn reset(&self) -> Result<(), SessionError> {
        self.send(FilterCommand::Reset).await
    }

    pub async fn set_page_options(&self, options: PageOptions) -> Result<(), SessionError> {
        self.send(FilterCommand::SetPageOptions(options)).await
    }

    /// Change notifications. The receiver always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FilterSnapshot> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait until every command sent so far is processed and the latest page
    /// request has resolved.
    pub async fn wait_until_settled(&self) -> Result<FilterSnapshot, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.send(FilterCommand::Sync(tx)).await?;
        rx.await.map_err(|_| SessionError::Closed)?;

        let mut snapshots = self.snapshots.clone();
        let settled = snapshots
            .wait_for(|snapshot| !snapshot.loading)
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(settled.clone())
    }
}

/// A running filter session.
pub struct FilterSession {
    handle: FilterHandle,
    task: JoinHandle<FilterController>,
}

impl FilterSession {
    /// Spawn the owner task on the current tokio runtime.
    pub fn spawn(controller: FilterController, source: Arc<dyn PageSource>) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshots_tx, snapshots_rx) = watch::channel(controller.snapshot());
        let task = tokio::spawn(run(controller, source, commands_rx, snapshots_tx));
        Self {
            handle: FilterHandle {
                commands: commands_tx,
                snapshots: snapshots_rx,
            },
            task,
        }
    }

    pub fn handle(&self) -> FilterHandle {
        self.handle.clone()
    }

    /// Stop the session, abandon in-flight fetches and return the controller.
    pub async fn shutdown(self) -> Result<FilterController, SessionError> {
        // A closed channel means the task already stopped; join it anyway.
        let _ = self.handle.commands.send(FilterCommand::Shutdown).await;
        self.task
            .await
            .map_err(|err| SessionError::Join(err.to_string()))
    }
}

type FetchResult = (RequestSeq, Result<ItemPage, PageSourceError>);

async fn run(
    mut controller: FilterController,
    source: Arc<dyn PageSource>,
    mut commands: mpsc::Receiver<FilterCommand>,
    snapshots: watch::Sender<FilterSnapshot>,
) -> FilterController {
    let mut fetches: JoinSet<FetchResult> = JoinSet::new();
    let mut in_flight: Option<AbortHandle> = None;
    tracing::debug!(candidates = controller.candidate_count(), "Filter session started");

    loop {
        tokio::select! {
            command = commands.recv() => {
                let request = match command {
                    Some(FilterCommand::SetTerm { category, term, selected }) => {
                        controller.set_term(&category, &term, selected)
                    }
                    Some(FilterCommand::Reset) => controller.reset(),
                    Some(FilterCommand::SetPageOptions(options)) => {
                        Some(controller.set_page_options(options))
                    }
                    Some(FilterCommand::Sync(reply)) => {
                        let _ = reply.send(());
                        continue;
                    }
                    Some(FilterCommand::Shutdown) | None => break,
                };

                if let Some(request) = request {
                    // The previous fetch can only come back stale now.
                    if let Some(previous) = in_flight.take() {
                        previous.abort();
                    }
                    in_flight = Some(spawn_fetch(&mut fetches, Arc::clone(&source), request));
                    snapshots.send_replace(controller.snapshot());
                }
            }
            Some(joined) = fetches.join_next(), if !fetches.is_empty() => {
                let mut publish = match joined {
                    Ok((seq, result)) => {
                        !matches!(controller.apply_page(seq, result), PageOutcome::Stale { .. })
                    }
                    Err(err) if err.is_cancelled() => false,
                    Err(err) => {
                        tracing::warn!(error = %err, "Page fetch task failed");
                        false
                    }
                };
                // Nothing left in flight can answer the latest request.
                if fetches.is_empty() && controller.is_loading() {
                    let latest = controller.latest_seq();
                    controller.apply_page(
                        latest,
                        Err(PageSourceError::Unavailable(
                            "page fetch ended without a result".to_string(),
                        )),
                    );
                    publish = true;
                }
                if publish {
                    snapshots.send_replace(controller.snapshot());
                }
            }
        }
    }

    fetches.abort_all();
    tracing::debug!(issued = controller.latest_seq(), "Filter session stopped");
    controller
}

fn spawn_fetch(
    fetches: &mut JoinSet<FetchResult>,
    source: Arc<dyn PageSource>,
    request: PageRequest,
) -> AbortHandle {
    let PageRequest { seq, query } = request;
    fetches.spawn(async move {
        let result = source.fetch_page(&query).await;
        (seq, result)
    })
}
