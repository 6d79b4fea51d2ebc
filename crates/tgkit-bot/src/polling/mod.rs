//! Long-poll update loop.
//!
//! A [`Poller`] owns the `getUpdates` cursor and a two-state connection
//! machine. The first request uses a zero timeout so connectivity is
//! detected at once; after a success the loop long-polls with
//! `timeout_secs`, and the first request after a failure uses
//! `recovery_timeout_secs`.
//!
//! Updates are handed out one at a time. The cursor moves past a batch only
//! when the next update is requested after the batch's last one, so a
//! consumer that stops mid-batch gets the whole batch again from a poller
//! built on the same cursor.

mod stream;

#[cfg(test)]
mod tests;

pub use stream::UpdateStream;

use std::collections::VecDeque;
use std::fmt;
use tgkit_core::config::PollingConfig;
use tgkit_core::error::TgError;
use tgkit_core::update::Update;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::bot::{Bot, GetUpdates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("disconnected"),
            Self::Connected => f.write_str("connected"),
        }
    }
}

/// Pull-based update loop for one bot.
pub struct Poller {
    bot: Bot,
    config: PollingConfig,
    /// Committed cursor: the next update id the server should return.
    offset: Option<i64>,
    /// Cursor past the batch being handed out, committed once it drains.
    pending_offset: Option<i64>,
    batch: VecDeque<Update>,
    timeout_secs: u64,
    state: watch::Sender<ConnectionState>,
}

impl fmt::Debug for Poller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("offset", &self.offset)
            .field("pending_offset", &self.pending_offset)
            .field("buffered", &self.batch.len())
            .field("timeout_secs", &self.timeout_secs)
            .field("state", &self.state())
            .finish()
    }
}

impl Poller {
    pub fn new(bot: Bot, config: PollingConfig) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            bot,
            config,
            offset: None,
            pending_offset: None,
            batch: VecDeque::new(),
            timeout_secs: 0,
            state,
        }
    }

    /// Resume from a cursor saved by the caller.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The committed cursor. `None` until the first batch is fully handed out.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Timeout, in seconds, the next `getUpdates` request will carry.
    pub fn poll_timeout(&self) -> u64 {
        self.timeout_secs
    }

    /// Watch connection state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Next update. Waits as long as needed and never fails: failed polls
    /// are logged and retried.
    pub async fn next_update(&mut self) -> Update {
        loop {
            if let Some(update) = self.batch.pop_front() {
                return update;
            }
            if let Some(next) = self.pending_offset.take() {
                self.offset = Some(next);
            }
            self.poll().await;
        }
    }

    /// Move the loop into a task and receive updates over a channel.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(self) -> UpdateStream {
        let (tx, rx) = mpsc::channel(1);
        let (demand_tx, demand_rx) = mpsc::channel(1);
        let state = self.subscribe();
        let task = tokio::spawn(stream::run(self, demand_rx, tx));
        UpdateStream::new(rx, demand_tx, state, task)
    }

    async fn poll(&mut self) {
        let params = GetUpdates {
            offset: self.offset,
            limit: self.config.limit,
            timeout: self.timeout_secs,
            allowed_updates: self.config.allowed_updates.clone(),
        };

        match self.bot.get_updates(&params).await {
            Ok(updates) => {
                self.on_success();
                self.accept(updates);
            }
            Err(e) => {
                self.on_failure(&e);
                let delay = self.config.retry_delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn accept(&mut self, updates: Vec<Update>) {
        let Some(max_id) = updates.iter().map(|u| u.id).max() else {
            return;
        };
        debug!("telegram: received {} updates", updates.len());

        let next = max_id + 1;
        if self.offset.map_or(true, |current| next > current) {
            self.pending_offset = Some(next);
        }
        self.batch.extend(updates);
    }

    fn on_success(&mut self) {
        if self.state() == ConnectionState::Disconnected {
            self.timeout_secs = self.config.timeout_secs;
            self.state.send_replace(ConnectionState::Connected);
            info!("telegram: connected");
        }
    }

    fn on_failure(&mut self, error: &TgError) {
        if self.state() == ConnectionState::Connected {
            self.timeout_secs = self.config.recovery_timeout_secs;
            self.state.send_replace(ConnectionState::Disconnected);
            warn!("telegram: connection lost: {error}");
        } else {
            debug!("telegram: poll failed: {error}");
        }
    }

    /// Forget a batch that was only partly received. Its cursor stays
    /// uncommitted and the next poll fetches it again.
    fn abandon_batch(&mut self) {
        self.pending_offset = None;
        self.batch.clear();
    }
}
