//! Channel-backed update stream.

use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tgkit_core::error::TgError;
use tgkit_core::update::Update;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use super::{ConnectionState, Poller};

/// Updates from a [`Poller`] running in its own task.
///
/// The task pulls an update only when the consumer asks for one, so the
/// cursor moves past a batch only once the update after its last item is
/// requested. Receiving the last item does not acknowledge the batch.
/// Dropping the stream stops the task, also while a long poll is in flight.
#[derive(Debug)]
pub struct UpdateStream {
    rx: mpsc::Receiver<Update>,
    demand: mpsc::Sender<()>,
    /// A request is outstanding and its update not yet received.
    requested: bool,
    state: watch::Receiver<ConnectionState>,
    task: JoinHandle<Poller>,
}

impl UpdateStream {
    pub(super) fn new(
        rx: mpsc::Receiver<Update>,
        demand: mpsc::Sender<()>,
        state: watch::Receiver<ConnectionState>,
        task: JoinHandle<Poller>,
    ) -> Self {
        Self {
            rx,
            demand,
            requested: false,
            state,
            task,
        }
    }

    /// Next update. `None` only if the loop task died.
    ///
    /// Cancel safe: a dropped call leaves its request in place and the
    /// update is returned by the next call.
    pub async fn next(&mut self) -> Option<Update> {
        std::future::poll_fn(|cx| self.poll_update(cx)).await
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Stop the loop and take back the poller with its committed cursor.
    /// A partly received batch is dropped and will be fetched again.
    pub async fn into_poller(self) -> Result<Poller, TgError> {
        let Self {
            rx, demand, task, ..
        } = self;
        drop(demand);
        drop(rx);
        task.await
            .map_err(|e| TgError::Transport(format!("update loop task failed: {e}")))
    }

    fn poll_update(&mut self, cx: &mut Context<'_>) -> Poll<Option<Update>> {
        if !self.requested {
            // At most one request is in flight, so the slot is free. A closed
            // channel means the task is gone, which `poll_recv` reports.
            let _ = self.demand.try_send(());
            self.requested = true;
        }
        let polled = self.rx.poll_recv(cx);
        if let Poll::Ready(Some(_)) = polled {
            self.requested = false;
        }
        polled
    }
}

impl Stream for UpdateStream {
    type Item = Update;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Update>> {
        self.get_mut().poll_update(cx)
    }
}

pub(super) async fn run(
    mut poller: Poller,
    mut demand: mpsc::Receiver<()>,
    tx: mpsc::Sender<Update>,
) -> Poller {
    // Each request is served only after the previous update was received.
    while demand.recv().await.is_some() {
        tokio::select! {
            update = poller.next_update() => {
                if tx.send(update).await.is_err() {
                    break;
                }
            }
            _ = tx.closed() => break,
        }
    }

    info!("telegram: update stream dropped, stopping poll");
    poller.abandon_batch();
    poller
}
