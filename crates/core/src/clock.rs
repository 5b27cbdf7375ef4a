//! In-game clock.
//!
//! The raw counter runs 0..1440 minutes. The displayed day starts at 6:00, so
//! text output adds [`DAY_START_OFFSET`]. Two independent rollovers happen in
//! [`Clock::tick`]:
//!
//! - **new day**: the running time crosses [`NEW_DAY_THRESHOLD`] from below
//!   (displayed midnight). Advances day/weekday and the calendar.
//! - **next day**: the raw counter reaches [`MINUTES_PER_DAY`] and wraps. Only
//!   reported to the caller as a notification; no calendar change.
//!
//! Both checks compare against the pre-tick time, so a single call fires each
//! at most once.

use crate::locale::{Localize, FALLBACK_SEASONS, FALLBACK_WEEKDAYS};
use crate::types::{
    DAYS_PER_MONTH, DAYS_PER_WEEK, DAY_START_OFFSET, MINUTES_PER_DAY, MONTHS_PER_YEAR,
    NEW_DAY_THRESHOLD,
};

/// Plain calendar values, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub minutes_of_day: u32,
    pub day: u32,
    pub month: u32,
    pub year: u32,
    pub weekday: u32,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            minutes_of_day: 0,
            day: 1,
            month: 0,
            year: 1,
            weekday: 0,
        }
    }
}

/// Which rollovers a tick triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub new_day: bool,
    pub next_day: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clock {
    state: ClockState,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clock from persisted values, normalizing anything out of range.
    pub fn from_state(state: ClockState) -> Self {
        Self {
            state: ClockState {
                minutes_of_day: state.minutes_of_day % MINUTES_PER_DAY,
                day: state.day.clamp(1, DAYS_PER_MONTH),
                month: state.month % MONTHS_PER_YEAR,
                year: state.year.max(1),
                weekday: state.weekday % DAYS_PER_WEEK,
            },
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn minutes_of_day(&self) -> u32 {
        self.state.minutes_of_day
    }

    pub fn day(&self) -> u32 {
        self.state.day
    }

    pub fn month(&self) -> u32 {
        self.state.month
    }

    pub fn year(&self) -> u32 {
        self.state.year
    }

    pub fn weekday(&self) -> u32 {
        self.state.weekday
    }

    /// Advance by `minutes` and report which rollovers fired.
    pub fn tick(&mut self, minutes: u32) -> TickOutcome {
        let previous = self.state.minutes_of_day;
        let running = previous.saturating_add(minutes);
        let mut outcome = TickOutcome::default();

        if previous < NEW_DAY_THRESHOLD && running >= NEW_DAY_THRESHOLD {
            self.new_day();
            outcome.new_day = true;
        }

        if running >= MINUTES_PER_DAY {
            self.state.minutes_of_day = running % MINUTES_PER_DAY;
            outcome.next_day = true;
        } else {
            self.state.minutes_of_day = running;
        }

        outcome
    }

    /// Advance the calendar by one day.
    pub fn new_day(&mut self) {
        let s = &mut self.state;
        s.day += 1;
        s.weekday = (s.weekday + 1) % DAYS_PER_WEEK;
        if s.day > DAYS_PER_MONTH {
            s.day = 1;
            s.month = (s.month + 1) % MONTHS_PER_YEAR;
            if s.month == 0 {
                s.year += 1;
            }
        }
    }

    /// `"AM 6:00"` style text for the displayed time of day.
    pub fn time_text(&self) -> String {
        let total = (self.state.minutes_of_day + DAY_START_OFFSET) % MINUTES_PER_DAY;
        let hour = total / 60;
        let minute = total % 60;
        let am_pm = if hour < 12 { "AM" } else { "PM" };
        format!("{am_pm} {}:{minute:02}", hour % 12)
    }

    /// Localized `time.day` template filled with the season name and day.
    pub fn date_text(&self, locale: &dyn Localize) -> String {
        let season = pick(
            locale.get_list("time", "seasons"),
            &FALLBACK_SEASONS,
            self.state.month as usize,
        );
        let day = self.state.day.to_string();
        locale.format("time", "day", &[("season", &season), ("day", &day)])
    }

    pub fn week_text(&self, locale: &dyn Localize) -> String {
        pick(
            locale.get_list("time", "weekdays"),
            &FALLBACK_WEEKDAYS,
            self.state.weekday as usize,
        )
    }
}

fn pick(list: Vec<String>, fallback: &[&str], i: usize) -> String {
    list.into_iter()
        .nth(i)
        .unwrap_or_else(|| fallback.get(i).copied().unwrap_or("?").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::NoLocale;

    fn at(minutes_of_day: u32) -> Clock {
        Clock::from_state(ClockState {
            minutes_of_day,
            ..ClockState::default()
        })
    }

    #[test]
    fn time_text_starts_at_six() {
        assert_eq!(at(0).time_text(), "AM 6:00");
        assert_eq!(at(359).time_text(), "AM 11:59");
        assert_eq!(at(360).time_text(), "PM 0:00");
        assert_eq!(at(1079).time_text(), "PM 11:59");
        assert_eq!(at(1080).time_text(), "AM 0:00");
        assert_eq!(at(1439).time_text(), "AM 5:59");
    }

    #[test]
    fn plain_tick_fires_nothing() {
        let mut c = at(10);
        assert_eq!(c.tick(1), TickOutcome::default());
        assert_eq!(c.minutes_of_day(), 11);
    }

    #[test]
    fn from_state_normalizes() {
        let c = Clock::from_state(ClockState {
            minutes_of_day: 1500,
            day: 0,
            month: 9,
            year: 0,
            weekday: 8,
        });
        assert_eq!(
            c.state(),
            ClockState {
                minutes_of_day: 60,
                day: 1,
                month: 1,
                year: 1,
                weekday: 1,
            }
        );
    }

    #[test]
    fn fallback_names_without_locale() {
        let c = Clock::from_state(ClockState {
            day: 7,
            month: 2,
            weekday: 6,
            ..ClockState::default()
        });
        assert_eq!(c.week_text(&NoLocale), "Sun");
        assert_eq!(c.date_text(&NoLocale), "day: season=Autumn, day=7");
    }
}
