//! Tracker configuration.
//!
//! Sessions are configured at startup with a `TrackerConfig`. The defaults
//! match the standard ruleset: 10 VP to win, VP capped at 99, up to 8
//! players, and the Naalu Collective always acting first.

use serde::{Deserialize, Serialize};

use super::player::FactionId;

/// Faction whose commander token puts it at initiative 0.
pub const NAALU_COLLECTIVE: &str = "naalu-collective";

/// Number of strategy cards each player takes for a given player count.
///
/// Three- and four-player games take two cards each; everything else takes
/// one.
///
/// ```
/// use round_tracker::core::card_quota;
///
/// assert_eq!(card_quota(3), 2);
/// assert_eq!(card_quota(4), 2);
/// assert_eq!(card_quota(6), 1);
/// ```
#[must_use]
pub const fn card_quota(player_count: usize) -> usize {
    match player_count {
        3 | 4 => 2,
        _ => 1,
    }
}

/// Complete tracker configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// VP at which a player has won.
    pub win_vp: u32,

    /// Upper clamp for VP.
    pub max_vp: u32,

    /// Number of VP audit records retained.
    pub vp_history_cap: usize,

    /// Roster size limit.
    pub max_players: usize,

    /// Maximum player name length, in characters, after trimming.
    pub max_name_len: usize,

    /// Factions forced to initiative 0 while holding any card.
    pub always_first_factions: Vec<FactionId>,

    /// Seed for identifier generation. `None` seeds from the OS.
    pub id_seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            win_vp: 10,
            max_vp: 99,
            vp_history_cap: 100,
            max_players: 8,
            max_name_len: 30,
            always_first_factions: vec![FactionId::from(NAALU_COLLECTIVE)],
            id_seed: None,
        }
    }
}

impl TrackerConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the winning VP threshold.
    #[must_use]
    pub fn with_win_vp(mut self, vp: u32) -> Self {
        self.win_vp = vp;
        self
    }

    /// Set the VP clamp ceiling.
    #[must_use]
    pub fn with_max_vp(mut self, vp: u32) -> Self {
        self.max_vp = vp;
        self
    }

    /// Set how many VP audit records are kept.
    #[must_use]
    pub fn with_vp_history_cap(mut self, cap: usize) -> Self {
        self.vp_history_cap = cap;
        self
    }

    /// Set the roster size limit.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Add a faction that always takes initiative 0.
    #[must_use]
    pub fn with_always_first(mut self, faction: impl Into<FactionId>) -> Self {
        let faction = faction.into();
        if !self.always_first_factions.contains(&faction) {
            self.always_first_factions.push(faction);
        }
        self
    }

    /// Use a fixed identifier seed.
    #[must_use]
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    /// Does this faction carry the always-first rule?
    #[must_use]
    pub fn is_always_first(&self, faction: &FactionId) -> bool {
        self.always_first_factions.contains(faction)
    }

    /// Clamp a raw VP value into the legal range.
    #[must_use]
    pub fn clamp_vp(&self, raw: i64) -> u32 {
        raw.clamp(0, i64::from(self.max_vp)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_table() {
        assert_eq!(card_quota(0), 1);
        assert_eq!(card_quota(1), 1);
        assert_eq!(card_quota(2), 1);
        assert_eq!(card_quota(3), 2);
        assert_eq!(card_quota(4), 2);
        assert_eq!(card_quota(5), 1);
        assert_eq!(card_quota(8), 1);
    }

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.win_vp, 10);
        assert_eq!(config.max_vp, 99);
        assert_eq!(config.vp_history_cap, 100);
        assert_eq!(config.max_players, 8);
        assert_eq!(config.max_name_len, 30);
        assert!(config.is_always_first(&FactionId::from(NAALU_COLLECTIVE)));
        assert!(!config.is_always_first(&FactionId::from("arborec")));
    }

    #[test]
    fn test_builder() {
        let config = TrackerConfig::new()
            .with_win_vp(14)
            .with_max_players(6)
            .with_always_first("winnu")
            .with_always_first("winnu")
            .with_id_seed(7);

        assert_eq!(config.win_vp, 14);
        assert_eq!(config.max_players, 6);
        assert_eq!(config.always_first_factions.len(), 2);
        assert_eq!(config.id_seed, Some(7));
    }

    #[test]
    fn test_clamp_vp() {
        let config = TrackerConfig::default();
        assert_eq!(config.clamp_vp(-5), 0);
        assert_eq!(config.clamp_vp(42), 42);
        assert_eq!(config.clamp_vp(500), 99);
    }
}
