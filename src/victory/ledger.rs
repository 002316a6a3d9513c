//! Victory point ledger.
//!
//! All VP writes clamp into `0..=max_vp`. Each write that actually changes
//! a player's total appends a `VpChange` to `vp_history`, which is a ring
//! buffer: once it exceeds `vp_history_cap` the oldest records are dropped.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{FactionId, Player, PlayerId, TrackerConfig, TrackerState};

/// Audit record for one net VP change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpChange {
    pub player: PlayerId,
    pub player_name: String,
    pub old_vp: u32,
    pub new_vp: u32,
    /// `new_vp - old_vp`.
    pub delta: i64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Result of the win check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinCheck {
    pub has_winner: bool,
    /// Every player at or above `winning_vp`, in registration order.
    pub winners: Vec<Player>,
    pub winning_vp: u32,
}

/// Player(s) with the most VP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leader {
    pub vp: u32,
    pub players: Vec<Player>,
    pub is_tied: bool,
}

/// One row of the standings table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in VP order.
    pub rank: usize,
    pub player: PlayerId,
    pub player_name: String,
    pub faction: FactionId,
    pub victory_points: u32,
    /// Only the first row is marked, even when tied.
    pub is_leader: bool,
}

/// Aggregate VP figures.
#[derive(Clone, Debug, PartialEq)]
pub struct VpSummary {
    pub total_players: usize,
    pub total_vp: u64,
    /// Mean VP rounded to one decimal place.
    pub average_vp: f64,
    pub leader: Option<Leader>,
    pub has_winner: bool,
    pub winners: Vec<Player>,
}

/// Victory point rules.
pub struct VictoryLedger;

impl VictoryLedger {
    /// Add VP. False for unknown players.
    pub fn increment(
        state: &mut TrackerState,
        config: &TrackerConfig,
        player: PlayerId,
        amount: u32,
        now: DateTime<Utc>,
    ) -> bool {
        Self::write(state, config, player, now, format!("Gained {amount} VP"), |old| {
            i64::from(old) + i64::from(amount)
        })
    }

    /// Remove VP, never going below zero. False for unknown players.
    pub fn decrement(
        state: &mut TrackerState,
        config: &TrackerConfig,
        player: PlayerId,
        amount: u32,
        now: DateTime<Utc>,
    ) -> bool {
        Self::write(state, config, player, now, format!("Lost {amount} VP"), |old| {
            i64::from(old) - i64::from(amount)
        })
    }

    /// Set an exact VP total (clamped). False for unknown players.
    pub fn set(
        state: &mut TrackerState,
        config: &TrackerConfig,
        player: PlayerId,
        points: i64,
        now: DateTime<Utc>,
    ) -> bool {
        Self::write(state, config, player, now, "Manual set".to_string(), |_| points)
    }

    /// Zero every player's VP, recording each change.
    pub fn reset_all(state: &mut TrackerState, config: &TrackerConfig, now: DateTime<Utc>) {
        let ids: Vec<_> = state.player_ids().collect();
        for id in ids {
            Self::write(state, config, id, now, "Reset".to_string(), |_| 0);
        }
    }

    fn write(
        state: &mut TrackerState,
        config: &TrackerConfig,
        player: PlayerId,
        now: DateTime<Utc>,
        reason: String,
        compute: impl FnOnce(u32) -> i64,
    ) -> bool {
        let Some(target) = state.player_mut(player) else {
            return false;
        };

        let old_vp = target.victory_points;
        let new_vp = config.clamp_vp(compute(old_vp));
        if new_vp == old_vp {
            return true;
        }

        target.victory_points = new_vp;
        let record = VpChange {
            player,
            player_name: target.name.clone(),
            old_vp,
            new_vp,
            delta: i64::from(new_vp) - i64::from(old_vp),
            reason,
            timestamp: now,
        };
        debug!("{player} VP {old_vp} -> {new_vp}");

        state.vp_history.push_back(record);
        while state.vp_history.len() > config.vp_history_cap {
            state.vp_history.pop_front();
        }
        true
    }

    /// Drop the audit history.
    pub fn clear_history(state: &mut TrackerState) {
        state.vp_history.clear();
    }

    // === Queries ===

    /// A player's VP; 0 for unknown players.
    #[must_use]
    pub fn vp(state: &TrackerState, player: PlayerId) -> u32 {
        state.player(player).map_or(0, |p| p.victory_points)
    }

    /// Has this player reached the winning total?
    #[must_use]
    pub fn has_player_won(state: &TrackerState, config: &TrackerConfig, player: PlayerId) -> bool {
        Self::vp(state, player) >= config.win_vp
    }

    /// Every player at or above the winning total. Several players may win
    /// at once.
    #[must_use]
    pub fn check_win_condition(state: &TrackerState, config: &TrackerConfig) -> WinCheck {
        let winners: Vec<_> = state
            .players
            .iter()
            .filter(|p| p.victory_points >= config.win_vp)
            .cloned()
            .collect();

        WinCheck {
            has_winner: !winners.is_empty(),
            winners,
            winning_vp: config.win_vp,
        }
    }

    /// Players sharing the highest VP. `None` for an empty roster.
    #[must_use]
    pub fn leader(state: &TrackerState) -> Option<Leader> {
        let vp = state.players.iter().map(|p| p.victory_points).max()?;
        let players: Vec<_> = state
            .players
            .iter()
            .filter(|p| p.victory_points == vp)
            .cloned()
            .collect();

        Some(Leader {
            vp,
            is_tied: players.len() > 1,
            players,
        })
    }

    /// Players by VP, highest first; ties keep registration order.
    #[must_use]
    pub fn players_by_vp(state: &TrackerState) -> Vec<Player> {
        let mut players: Vec<_> = state.players.iter().cloned().collect();
        players.sort_by(|a, b| b.victory_points.cmp(&a.victory_points));
        players
    }

    /// Ranked standings table.
    #[must_use]
    pub fn standings(state: &TrackerState) -> Vec<Standing> {
        Self::players_by_vp(state)
            .into_iter()
            .enumerate()
            .map(|(i, p)| Standing {
                rank: i + 1,
                player: p.id,
                player_name: p.name,
                faction: p.faction,
                victory_points: p.victory_points,
                is_leader: i == 0,
            })
            .collect()
    }

    /// The most recent `count` changes, newest first.
    #[must_use]
    pub fn recent_changes(state: &TrackerState, count: usize) -> Vec<VpChange> {
        state.vp_history.iter().rev().take(count).cloned().collect()
    }

    /// Totals, average, leader and winners in one pass over the roster.
    #[must_use]
    pub fn summary(state: &TrackerState, config: &TrackerConfig) -> VpSummary {
        let total_players = state.player_count();
        let total_vp: u64 = state.players.iter().map(|p| u64::from(p.victory_points)).sum();
        let average_vp = if total_players > 0 {
            (total_vp as f64 / total_players as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };
        let win = Self::check_win_condition(state, config);

        VpSummary {
            total_players,
            total_vp,
            average_vp,
            leader: Self::leader(state),
            has_winner: win.has_winner,
            winners: win.winners,
        }
    }
}
