//! Player registration and roster edits.

use log::debug;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::cards::CardAssignment;
use crate::core::{FactionId, IdGenerator, Player, PlayerId, TrackerConfig, TrackerState};

use super::factions::{find_faction, Faction, FACTIONS};

/// One problem with a registration request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistrationIssue {
    #[error("player name is required")]
    NameRequired,

    #[error("player name must be {max} characters or less")]
    NameTooLong { max: usize },

    #[error("faction is required")]
    FactionRequired,

    #[error("invalid faction selected: {0}")]
    UnknownFaction(String),

    #[error("faction {0} is already assigned to another player")]
    FactionTaken(String),

    #[error("roster is full ({max} players)")]
    RosterFull { max: usize },
}

/// Every problem found with a registration request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid registration: {}", join_issues(.issues))]
pub struct RegistrationError {
    pub issues: Vec<RegistrationIssue>,
}

fn join_issues(issues: &[RegistrationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl RegistrationError {
    /// Does the error include this issue?
    #[must_use]
    pub fn has(&self, issue: &RegistrationIssue) -> bool {
        self.issues.contains(issue)
    }
}

/// Roster rules.
pub struct Roster;

impl Roster {
    fn name_issues(config: &TrackerConfig, name: &str, issues: &mut Vec<RegistrationIssue>) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            issues.push(RegistrationIssue::NameRequired);
        } else if trimmed.chars().count() > config.max_name_len {
            issues.push(RegistrationIssue::NameTooLong { max: config.max_name_len });
        }
    }

    /// Validate a new player's name and faction, reporting every problem.
    pub fn validate_registration(
        state: &TrackerState,
        config: &TrackerConfig,
        name: &str,
        faction: &str,
    ) -> Result<(), RegistrationError> {
        let mut issues = Vec::new();

        Self::name_issues(config, name, &mut issues);

        if faction.is_empty() {
            issues.push(RegistrationIssue::FactionRequired);
        } else if find_faction(faction).is_none() {
            issues.push(RegistrationIssue::UnknownFaction(faction.to_string()));
        } else if state.players.iter().any(|p| p.faction.as_str() == faction) {
            issues.push(RegistrationIssue::FactionTaken(faction.to_string()));
        }

        if state.player_count() >= config.max_players {
            issues.push(RegistrationIssue::RosterFull { max: config.max_players });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(RegistrationError { issues })
        }
    }

    /// Register a player. The name is stored trimmed.
    pub fn add_player(
        state: &mut TrackerState,
        config: &TrackerConfig,
        ids: &mut IdGenerator,
        name: &str,
        faction: &str,
    ) -> Result<PlayerId, RegistrationError> {
        Self::validate_registration(state, config, name, faction)?;

        let taken: Vec<_> = state.player_ids().collect();
        let id = ids.next_player_id_excluding(&taken);
        state
            .players
            .push_back(Player::new(id, name.trim(), FactionId::from(faction)));
        state.refresh_all_passed();

        debug!("registered {id} ({faction})");
        Ok(id)
    }

    /// Remove a player, returning their cards to the pool.
    pub fn remove_player(state: &mut TrackerState, player: PlayerId) -> bool {
        let Some(index) = state.player_index(player) else {
            return false;
        };

        CardAssignment::release_player(state, player);
        state.players.remove(index);
        state.refresh_all_passed();

        debug!("removed {player}");
        true
    }

    /// Rename a player. False for unknown players or invalid names.
    pub fn rename_player(
        state: &mut TrackerState,
        config: &TrackerConfig,
        player: PlayerId,
        name: &str,
    ) -> bool {
        let mut issues = Vec::new();
        Self::name_issues(config, name, &mut issues);
        if !issues.is_empty() {
            return false;
        }

        match state.player_mut(player) {
            Some(target) => {
                target.name = name.trim().to_string();
                true
            }
            None => false,
        }
    }

    /// Switch a player's faction. The new faction must exist and be free
    /// (or already be theirs).
    pub fn change_faction(state: &mut TrackerState, player: PlayerId, faction: &str) -> bool {
        if find_faction(faction).is_none() {
            return false;
        }
        let taken_by_other = state
            .players
            .iter()
            .any(|p| p.id != player && p.faction.as_str() == faction);
        if taken_by_other {
            return false;
        }

        match state.player_mut(player) {
            Some(target) => {
                target.faction = FactionId::from(faction);
                true
            }
            None => false,
        }
    }

    /// Make `player` the only speaker. False (no change) for unknown players.
    pub fn set_speaker(state: &mut TrackerState, player: PlayerId) -> bool {
        if state.player(player).is_none() {
            return false;
        }
        for p in state.players.iter_mut() {
            p.is_speaker = p.id == player;
        }
        true
    }

    /// Factions no player has taken, in catalog order.
    #[must_use]
    pub fn available_factions(state: &TrackerState) -> Vec<&'static Faction> {
        let taken: FxHashSet<&str> = state.players.iter().map(|p| p.faction.as_str()).collect();
        FACTIONS.iter().filter(|f| !taken.contains(f.id)).collect()
    }

    /// Is there room for another player?
    #[must_use]
    pub fn can_add_player(state: &TrackerState, config: &TrackerConfig) -> bool {
        state.player_count() < config.max_players
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Initiative;

    fn setup() -> (TrackerState, TrackerConfig, IdGenerator) {
        (TrackerState::new(), TrackerConfig::default(), IdGenerator::new(42))
    }

    #[test]
    fn test_add_player() {
        let (mut state, config, mut ids) = setup();

        let id = Roster::add_player(&mut state, &config, &mut ids, "  Ada  ", "arborec").unwrap();

        let player = state.player(id).unwrap();
        assert_eq!(player.name, "Ada");
        assert_eq!(player.faction.as_str(), "arborec");
        assert_eq!(player.victory_points, 0);
    }

    #[test]
    fn test_registration_reports_every_issue() {
        let (state, config, _) = setup();

        let err = Roster::validate_registration(&state, &config, "   ", "").unwrap_err();
        assert_eq!(
            err.issues,
            vec![RegistrationIssue::NameRequired, RegistrationIssue::FactionRequired]
        );
        assert!(err.to_string().contains("player name is required"));
    }

    #[test]
    fn test_name_length_limit() {
        let (state, config, _) = setup();
        let thirty = "x".repeat(30);
        let thirty_one = "x".repeat(31);

        assert!(Roster::validate_registration(&state, &config, &thirty, "winnu").is_ok());
        let err = Roster::validate_registration(&state, &config, &thirty_one, "winnu").unwrap_err();
        assert!(err.has(&RegistrationIssue::NameTooLong { max: 30 }));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let (state, config, _) = setup();
        let name = "é".repeat(30);
        assert!(Roster::validate_registration(&state, &config, &name, "winnu").is_ok());
    }

    #[test]
    fn test_faction_rules() {
        let (mut state, config, mut ids) = setup();
        Roster::add_player(&mut state, &config, &mut ids, "Ada", "winnu").unwrap();

        let err = Roster::add_player(&mut state, &config, &mut ids, "Bo", "winnu").unwrap_err();
        assert_eq!(err.issues, vec![RegistrationIssue::FactionTaken("winnu".to_string())]);

        let err =
            Roster::add_player(&mut state, &config, &mut ids, "Bo", "space-elves").unwrap_err();
        assert_eq!(
            err.issues,
            vec![RegistrationIssue::UnknownFaction("space-elves".to_string())]
        );
        assert_eq!(state.player_count(), 1);
    }

    #[test]
    fn test_roster_full() {
        let (mut state, _, mut ids) = setup();
        let config = TrackerConfig::default().with_max_players(2);
        Roster::add_player(&mut state, &config, &mut ids, "A", "winnu").unwrap();
        Roster::add_player(&mut state, &config, &mut ids, "B", "nomad").unwrap();

        assert!(!Roster::can_add_player(&state, &config));
        let err = Roster::add_player(&mut state, &config, &mut ids, "C", "arborec").unwrap_err();
        assert!(err.has(&RegistrationIssue::RosterFull { max: 2 }));
    }

    #[test]
    fn test_remove_player_releases_cards() {
        let (mut state, config, mut ids) = setup();
        let a = Roster::add_player(&mut state, &config, &mut ids, "A", "winnu").unwrap();
        let b = Roster::add_player(&mut state, &config, &mut ids, "B", "nomad").unwrap();
        CardAssignment::assign(&mut state, a, Initiative::new(3));

        assert!(Roster::remove_player(&mut state, a));
        assert!(!Roster::remove_player(&mut state, a));
        assert!(state.card(Initiative::new(3)).unwrap().player.is_none());
        assert_eq!(state.player_ids().collect::<Vec<_>>(), vec![b]);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_rename_and_change_faction() {
        let (mut state, config, mut ids) = setup();
        let a = Roster::add_player(&mut state, &config, &mut ids, "A", "winnu").unwrap();
        let b = Roster::add_player(&mut state, &config, &mut ids, "B", "nomad").unwrap();

        assert!(Roster::rename_player(&mut state, &config, a, " Alice "));
        assert_eq!(state.player(a).unwrap().name, "Alice");
        assert!(!Roster::rename_player(&mut state, &config, a, ""));
        assert!(!Roster::rename_player(&mut state, &config, PlayerId::new(1), "Zed"));

        assert!(!Roster::change_faction(&mut state, a, "nomad"));
        assert!(Roster::change_faction(&mut state, a, "winnu"));
        assert!(Roster::change_faction(&mut state, b, "arborec"));
        assert!(!Roster::change_faction(&mut state, b, "unknown"));
        assert_eq!(state.player(b).unwrap().faction.as_str(), "arborec");
    }

    #[test]
    fn test_set_speaker_is_exclusive() {
        let (mut state, config, mut ids) = setup();
        let a = Roster::add_player(&mut state, &config, &mut ids, "A", "winnu").unwrap();
        let b = Roster::add_player(&mut state, &config, &mut ids, "B", "nomad").unwrap();

        assert!(Roster::set_speaker(&mut state, a));
        assert!(Roster::set_speaker(&mut state, b));
        assert_eq!(state.players.iter().filter(|p| p.is_speaker).count(), 1);
        assert_eq!(state.speaker().map(|p| p.id), Some(b));

        assert!(!Roster::set_speaker(&mut state, PlayerId::new(1)));
        assert_eq!(state.speaker().map(|p| p.id), Some(b));
    }

    #[test]
    fn test_available_factions() {
        let (mut state, config, mut ids) = setup();
        assert_eq!(Roster::available_factions(&state).len(), 32);

        Roster::add_player(&mut state, &config, &mut ids, "A", "winnu").unwrap();
        let available = Roster::available_factions(&state);
        assert_eq!(available.len(), 31);
        assert!(available.iter().all(|f| f.id != "winnu"));
    }
}
