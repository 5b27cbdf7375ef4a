//! GameLoop: the orchestrator binding input, time, and rendering.
//!
//! Three activities share one [`GameState`] behind a single mutex:
//!
//! - **time** (background thread): every tick interval, if time is running,
//!   advance the clock by one minute. Optionally autosaves.
//! - **input** (background thread): drain the [`InputSource`] queue and apply
//!   each action. Owns the input source and stops it on exit.
//! - **render** (caller's thread): once per frame, draw the state, then sleep
//!   out the rest of the frame.
//!
//! Every read or write of the shared state happens inside the lock and no
//! file I/O happens while holding it: a save copies a snapshot out first and
//! writes it after releasing. Shutdown is cooperative through the `running`
//! flag; every wait in the loop is bounded so activities notice it quickly.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::config::Timing;
use crate::core::Localize;
use crate::input::{InputSource, InputState, KeyAction};
use crate::state::GameState;
use crate::store::{SaveData, SaveStore, Settings};
use crate::term::{Scene, TermSize, WorldRenderer};
use crate::types::Action;

/// Where save snapshots go.
pub trait SaveSink: Send + Sync {
    fn persist(&self, data: &SaveData) -> Result<()>;
}

impl SaveSink for SaveStore {
    fn persist(&self, data: &SaveData) -> Result<()> {
        self.save(data)
            .with_context(|| format!("writing {}", self.path().display()))
    }
}

pub struct GameLoop {
    state: Mutex<GameState>,
    running: AtomicBool,
    settings: Settings,
    locale: Box<dyn Localize>,
    sink: Box<dyn SaveSink>,
    timing: Timing,
}

/// Clears the running flag when dropped, so background threads exit even if
/// the render loop unwinds.
struct StopOnDrop<'a>(&'a AtomicBool);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl GameLoop {
    pub fn new(
        state: GameState,
        settings: Settings,
        locale: Box<dyn Localize>,
        sink: Box<dyn SaveSink>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            running: AtomicBool::new(false),
            settings,
            locale,
            sink,
            timing: Timing::default(),
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Lock the shared state.
    ///
    /// A poisoned lock means another activity panicked mid-update; the state
    /// is still structurally valid, so keep going and log it.
    pub fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::error!("game state lock poisoned");
            poisoned.into_inner()
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask every activity to finish.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Snapshot the persisted parts of the state.
    pub fn snapshot(&self) -> SaveData {
        self.lock().to_save(&self.settings)
    }

    /// Run until a quit action arrives (or [`request_stop`](Self::request_stop)).
    ///
    /// Returns after both background activities have exited and the input
    /// source has been stopped, whether the render loop succeeded or not.
    pub fn run<W: Write>(
        &self,
        input: InputSource,
        renderer: &mut WorldRenderer<W>,
        size: impl FnMut() -> TermSize,
    ) -> Result<()> {
        self.running.store(true, Ordering::Release);
        tracing::info!(fps = self.timing.fps, "game loop started");

        let result = thread::scope(|s| {
            let _stop = StopOnDrop(&self.running);

            thread::Builder::new()
                .name("clock".into())
                .spawn_scoped(s, || self.time_loop())?;
            thread::Builder::new()
                .name("actions".into())
                .spawn_scoped(s, move || self.input_loop(input))?;

            self.render_loop(renderer, size)
        });

        tracing::info!("game loop stopped");
        result
    }

    fn time_loop(&self) {
        let interval = self.timing.tick_interval;
        let mut next_tick = Instant::now() + interval;
        let mut next_autosave = self.timing.autosave.map(|d| Instant::now() + d);

        while self.is_running() {
            let now = Instant::now();

            if now >= next_tick {
                next_tick += interval;
                if next_tick < now {
                    next_tick = now + interval;
                }
                self.tick_clock();
            }

            if let (Some(at), Some(period)) = (next_autosave, self.timing.autosave) {
                if now >= at {
                    next_autosave = Some(now + period);
                    self.save(false);
                }
            }

            let wait = next_tick.saturating_duration_since(Instant::now());
            thread::sleep(wait.min(self.timing.poll));
        }
    }

    fn tick_clock(&self) {
        let mut st = self.lock();
        if !st.time_running {
            return;
        }
        let outcome = st.clock.tick(1);
        if outcome.new_day {
            tracing::info!(
                day = st.clock.day(),
                month = st.clock.month(),
                year = st.clock.year(),
                "new day"
            );
        }
        if outcome.next_day {
            st.notice = Some(self.locale.format("ui", "new_day", &[]));
        }
    }

    fn input_loop(&self, mut input: InputSource) {
        while self.is_running() {
            match input.wait_action(self.timing.poll) {
                Some(entry) => self.apply(entry),
                // Nothing can deliver the quit key any more.
                None if input.state() == InputState::Stopped => {
                    tracing::error!("input capture ended, stopping");
                    self.request_stop();
                }
                None => {}
            }
        }
        input.stop();
    }

    /// Apply one queued entry.
    pub fn apply(&self, entry: KeyAction) {
        let Some(action) = entry.action else {
            return;
        };
        tracing::debug!(action = action.as_str(), "action");

        match action {
            Action::Move { dx, dy } => {
                let mut st = self.lock();
                let GameState { world, player, .. } = &mut *st;
                if !player.try_move(dx, dy, world) {
                    tracing::trace!(x = player.x, y = player.y, dx, dy, "move blocked");
                }
            }
            Action::Save => self.save(true),
            Action::Quit => self.request_stop(),
            Action::Pause => {
                let mut st = self.lock();
                st.time_running = !st.time_running;
                let key = if st.time_running { "resumed" } else { "paused" };
                st.notice = Some(self.locale.format("ui", key, &[]));
            }
        }
    }

    /// Snapshot under the lock, write outside it.
    fn save(&self, announce: bool) {
        let data = self.snapshot();
        let notice = match self.sink.persist(&data) {
            Ok(()) => {
                tracing::info!(x = data.player.x, y = data.player.y, announce, "saved");
                let (x, y) = (data.player.x.to_string(), data.player.y.to_string());
                self.locale.format("ui", "saved", &[("x", &x), ("y", &y)])
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                let error = format!("{err:#}");
                self.locale.format("ui", "save_failed", &[("error", &error)])
            }
        };
        if announce {
            self.lock().notice = Some(notice);
        }
    }

    fn render_loop<W: Write>(
        &self,
        renderer: &mut WorldRenderer<W>,
        mut size: impl FnMut() -> TermSize,
    ) -> Result<()> {
        let frame = self.timing.frame_interval();

        while self.is_running() {
            let start = Instant::now();
            let term = size();
            {
                let mut st = self.lock();
                let notice = st.notice.take();
                let scene = Scene {
                    world: &st.world,
                    player: &st.player,
                    clock: Some(&st.clock),
                    locale: self.locale.as_ref(),
                    notice: notice.as_deref(),
                };
                renderer.draw(&scene, term)?;
            }
            if let Some(rest) = frame.checked_sub(start.elapsed()) {
                thread::sleep(rest);
            }
        }
        Ok(())
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.request_stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, NoLocale, Player, TileGrid, World};
    use crate::input::{KeyCode, KeyEvent};
    use crate::types::Tile;
    use std::sync::Arc;

    #[derive(Default, Clone)]
    struct Recorder(Arc<Mutex<Vec<SaveData>>>);

    impl SaveSink for Recorder {
        fn persist(&self, data: &SaveData) -> Result<()> {
            self.0.lock().unwrap().push(data.clone());
            Ok(())
        }
    }

    fn game(sink: Recorder) -> GameLoop {
        let world = World::new("t", TileGrid::new(5, 5, Tile::default()));
        let state = GameState::new(world, Player::new(2, 2), Clock::new());
        GameLoop::new(state, Settings::default(), Box::new(NoLocale), Box::new(sink))
    }

    fn key(action: Action) -> KeyAction {
        KeyAction {
            key: KeyEvent::from(KeyCode::Null),
            action: Some(action),
        }
    }

    #[test]
    fn pause_toggles_time_and_posts_notice() {
        let g = game(Recorder::default());
        g.apply(key(Action::Pause));
        {
            let st = g.lock();
            assert!(!st.time_running);
            assert_eq!(st.notice.as_deref(), Some("paused"));
        }
        g.apply(key(Action::Pause));
        assert!(g.lock().time_running);
    }

    #[test]
    fn save_persists_snapshot_and_announces() {
        let sink = Recorder::default();
        let g = game(sink.clone());
        g.apply(key(Action::Move { dx: 1, dy: 0 }));
        g.apply(key(Action::Save));

        let saved = sink.0.lock().unwrap().clone();
        assert_eq!(saved.len(), 1);
        assert_eq!((saved[0].player.x, saved[0].player.y), (3, 2));
        assert_eq!(saved[0].world, "t");
        assert_eq!(g.lock().notice.as_deref(), Some("saved: x=3, y=2"));
    }

    #[test]
    fn paused_clock_does_not_tick() {
        let g = game(Recorder::default());
        g.lock().time_running = false;
        g.tick_clock();
        assert_eq!(g.lock().clock.minutes_of_day(), 0);

        g.lock().time_running = true;
        g.tick_clock();
        assert_eq!(g.lock().clock.minutes_of_day(), 1);
    }

    #[test]
    fn quit_clears_running() {
        let g = game(Recorder::default());
        g.running.store(true, Ordering::Release);
        g.apply(key(Action::Quit));
        assert!(!g.is_running());
    }
}
