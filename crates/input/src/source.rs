//! Background key capture.
//!
//! [`InputSource`] owns a capture thread that repeatedly performs a
//! bounded-timeout key read, classifies the key, and pushes the pair onto an
//! unbounded FIFO queue. Every key is queued, including keys with no action,
//! so a caller waiting for "any key" still wakes up.
//!
//! States: `Running` from [`InputSource::start`] until [`InputSource::stop`],
//! which joins the thread. Nothing is enqueued after `stop` returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::keys::KeySource;
use crate::map::classify;
use crate::types::{Action, KEY_POLL_MS};

/// A captured key and the action it maps to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAction {
    pub key: KeyEvent,
    pub action: Option<Action>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Running,
    Stopped,
}

pub struct InputSource {
    rx: Receiver<KeyAction>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputSource {
    /// Start capturing with the default 50ms read timeout.
    pub fn start<K: KeySource>(keys: K) -> Result<Self> {
        Self::with_poll(keys, Duration::from_millis(KEY_POLL_MS))
    }

    pub fn with_poll<K: KeySource>(keys: K, poll: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("input".into())
            .spawn(move || capture_loop(keys, poll, &flag, &tx))?;

        Ok(Self {
            rx,
            running,
            handle: Some(handle),
        })
    }

    /// `Stopped` once [`stop`](Self::stop) ran or the capture thread died.
    pub fn state(&self) -> InputState {
        match &self.handle {
            Some(handle) if !handle.is_finished() => InputState::Running,
            _ => InputState::Stopped,
        }
    }

    /// Oldest unread entry, without blocking.
    pub fn get_action(&self) -> Option<KeyAction> {
        match self.rx.try_recv() {
            Ok(entry) => Some(entry),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Oldest unread entry, waiting at most `timeout` for one to arrive.
    pub fn wait_action(&self, timeout: Duration) -> Option<KeyAction> {
        match self.rx.recv_timeout(timeout) {
            Ok(entry) => Some(entry),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop the capture thread and wait for it to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("input thread panicked");
            }
            tracing::debug!("input capture stopped");
        }
    }
}

impl Drop for InputSource {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop<K: KeySource>(
    mut keys: K,
    poll: Duration,
    running: &AtomicBool,
    tx: &Sender<KeyAction>,
) {
    tracing::debug!(poll_ms = poll.as_millis() as u64, "input capture started");
    while running.load(Ordering::Acquire) {
        match keys.read_key(poll) {
            Ok(Some(key)) => {
                let action = classify(key);
                tracing::trace!(?key, ?action, "key");
                if tx.send(KeyAction { key, action }).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "key read failed");
                thread::sleep(poll);
            }
        }
    }
}
