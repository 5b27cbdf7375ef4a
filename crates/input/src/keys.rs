//! Raw key sources.
//!
//! A [`KeySource`] performs one bounded-timeout key read. The capture thread
//! in [`crate::source`] calls it in a loop, so an implementation must never
//! block longer than the timeout it is given.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub trait KeySource: Send + 'static {
    /// Wait at most `timeout` for a key press. `Ok(None)` means no key.
    fn read_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

/// Reads the real terminal through crossterm.
///
/// Expects raw mode to be enabled by the caller (see the term crate).
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn read_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            // Repeats are kept so holding an arrow walks.
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

/// Replays a fixed key sequence, one key per `gap`.
///
/// Once the script is exhausted every read times out.
#[derive(Debug, Clone)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
    gap: Duration,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>, gap: Duration) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            gap,
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if self.keys.is_empty() || self.gap > timeout {
            thread::sleep(timeout);
            return Ok(None);
        }
        thread::sleep(self.gap);
        Ok(self.keys.pop_front())
    }
}
