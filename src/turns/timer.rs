//! Turn timer bookkeeping.
//!
//! The core only records when the running interval started and folds the
//! elapsed whole seconds into the current player's total on pause. Ticking
//! a display is left to the caller. All operations take `now` explicitly.

use chrono::{DateTime, Utc};
use log::debug;

use crate::core::{TimerState, TrackerConfig, TrackerState};

use super::initiative::TurnOrder;

/// Turn timer rules.
pub struct TurnTimer;

impl TurnTimer {
    /// Start timing. False if already running.
    pub fn start(state: &mut TrackerState, now: DateTime<Utc>) -> bool {
        if state.timer.running {
            return false;
        }
        state.timer = TimerState {
            running: true,
            started_at: Some(now),
        };
        true
    }

    /// Stop timing and credit the current player with the elapsed seconds.
    ///
    /// False if the timer was not running.
    pub fn pause(state: &mut TrackerState, config: &TrackerConfig, now: DateTime<Utc>) -> bool {
        if !state.timer.running {
            return false;
        }

        let elapsed = Self::elapsed(state, now);
        let current = TurnOrder::current_player(state, config).map(|p| p.id);
        if let Some(id) = current {
            if let Some(player) = state.player_mut(id) {
                player.turn_time_seconds = player.turn_time_seconds.saturating_add(elapsed);
                debug!("{id} credited {elapsed}s");
            }
        }

        state.timer = TimerState::default();
        true
    }

    /// Stop timing without crediting anyone.
    pub fn reset(state: &mut TrackerState) {
        state.timer = TimerState::default();
    }

    /// Whole seconds since the running interval started; 0 when stopped.
    #[must_use]
    pub fn elapsed(state: &TrackerState, now: DateTime<Utc>) -> u64 {
        match (state.timer.running, state.timer.started_at) {
            (true, Some(start)) => u64::try_from((now - start).num_seconds()).unwrap_or(0),
            _ => 0,
        }
    }

    /// The current player's accumulated time plus the running interval.
    #[must_use]
    pub fn current_total(
        state: &TrackerState,
        config: &TrackerConfig,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        let player = TurnOrder::current_player(state, config)?;
        Some(player.turn_time_seconds + Self::elapsed(state, now))
    }
}

/// Format seconds as `MM:SS`.
///
/// ```
/// use round_tracker::turns::format_time;
///
/// assert_eq!(format_time(75), "01:15");
/// ```
#[must_use]
pub fn format_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
