//! A single tracked game.
//!
//! `Session` owns the state store, the identifier generator and the open
//! agenda slot, and exposes every tracker operation as a method. Each
//! mutating method runs as one store transaction, so observers see at most
//! one notification per call and never a half-applied change.
//!
//! Time-dependent operations come in pairs: `foo_at(now)` takes the clock
//! reading explicitly and `foo()` reads `Utc::now()`.

use chrono::{DateTime, Utc};
use log::debug;

use crate::agenda::{Agenda, AgendaBallotTracker, VoteTally};
use crate::cards::{AssignmentError, AssignmentReport, CardAssignment};
use crate::core::{
    AgendaId, GamePhase, IdGenerator, Initiative, Player, PlayerId, StrategyCard, TrackerConfig,
    TrackerState,
};
use crate::players::{Faction, RegistrationError, Roster};
use crate::store::{StateObserver, StateStore, StateUpdate, SubscriberId};
use crate::turns::{
    ActionPhaseSummary, EffectiveInitiative, PassTracker, RoundReset, TurnOrder, TurnTimer,
};
use crate::victory::{Leader, Standing, VictoryLedger, VpChange, VpSummary, WinCheck};

/// Tracker session.
#[derive(Debug)]
pub struct Session {
    config: TrackerConfig,
    store: StateStore,
    ids: IdGenerator,
    agenda: AgendaBallotTracker,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl Session {
    /// Start a session in the empty setup state.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        let ids = match config.id_seed {
            Some(seed) => IdGenerator::new(seed),
            None => IdGenerator::from_entropy(),
        };
        Self {
            config,
            store: StateStore::new(),
            ids,
            agenda: AgendaBallotTracker::new(),
        }
    }

    /// Resume a session from a saved state.
    #[must_use]
    pub fn with_state(config: TrackerConfig, state: TrackerState) -> Self {
        let mut session = Self::new(config);
        session.store = StateStore::with_state(state);
        session
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // === Store ===

    /// Borrow the committed state.
    #[must_use]
    pub fn state(&self) -> &TrackerState {
        self.store.state()
    }

    /// Independent copy of the committed state.
    #[must_use]
    pub fn snapshot(&self) -> TrackerState {
        self.store.snapshot()
    }

    /// Apply a typed partial update.
    pub fn apply(&mut self, update: StateUpdate) -> bool {
        self.store.apply(update)
    }

    /// Replace the whole state, as a load does. Any open agenda is dropped
    /// since its voters may not exist in the new roster.
    pub fn replace_state(&mut self, state: TrackerState) -> bool {
        if self.agenda.cancel() {
            debug!("dropped open agenda on state replace");
        }
        self.store.apply(StateUpdate::Replace(Box::new(state)))
    }

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) -> SubscriberId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Start over with an empty roster and fresh cards.
    pub fn reset_game(&mut self) {
        self.agenda.cancel();
        self.store.reset();
        debug!("game reset");
    }

    // === Roster ===

    /// Check a registration without applying it.
    pub fn validate_registration(
        &self,
        name: &str,
        faction: &str,
    ) -> Result<(), RegistrationError> {
        Roster::validate_registration(self.store.state(), &self.config, name, faction)
    }

    pub fn add_player(&mut self, name: &str, faction: &str) -> Result<PlayerId, RegistrationError> {
        let config = &self.config;
        let ids = &mut self.ids;
        self.store
            .try_transact(|s| Roster::add_player(s, config, ids, name, faction))
    }

    pub fn remove_player(&mut self, player: PlayerId) -> bool {
        self.store.transact(|s| Roster::remove_player(s, player))
    }

    pub fn rename_player(&mut self, player: PlayerId, name: &str) -> bool {
        let config = &self.config;
        self.store.transact(|s| Roster::rename_player(s, config, player, name))
    }

    pub fn change_faction(&mut self, player: PlayerId, faction: &str) -> bool {
        self.store.transact(|s| Roster::change_faction(s, player, faction))
    }

    pub fn set_speaker(&mut self, player: PlayerId) -> bool {
        self.store.transact(|s| Roster::set_speaker(s, player))
    }

    /// Switch phase. Any phase may follow any other.
    pub fn set_game_phase(&mut self, phase: GamePhase) -> bool {
        self.store.apply(StateUpdate::Phase(phase))
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.store.state().player(player)
    }

    #[must_use]
    pub fn players(&self) -> Vec<Player> {
        self.store.state().players.iter().cloned().collect()
    }

    #[must_use]
    pub fn available_factions(&self) -> Vec<&'static Faction> {
        Roster::available_factions(self.store.state())
    }

    #[must_use]
    pub fn can_add_player(&self) -> bool {
        Roster::can_add_player(self.store.state(), &self.config)
    }

    // === Strategy cards ===

    /// Cards each player must hold at the current player count.
    #[must_use]
    pub fn quota(&self) -> usize {
        self.store.state().quota()
    }

    pub fn validate_assignment(
        &self,
        player: PlayerId,
        initiative: Initiative,
    ) -> Result<(), AssignmentError> {
        CardAssignment::validate_assignment(self.store.state(), player, initiative)
    }

    pub fn assign_card(&mut self, player: PlayerId, initiative: Initiative) -> bool {
        self.store.transact(|s| CardAssignment::assign(s, player, initiative))
    }

    pub fn unassign_card(&mut self, initiative: Initiative) -> bool {
        self.store.transact(|s| CardAssignment::unassign(s, initiative))
    }

    #[must_use]
    pub fn validate_all_assigned(&self) -> AssignmentReport {
        CardAssignment::validate_all_assigned(self.store.state())
    }

    pub fn toggle_activation(&mut self, initiative: Initiative) -> bool {
        self.store.transact(|s| CardAssignment::toggle_activation(s, initiative))
    }

    pub fn deactivate_card(&mut self, initiative: Initiative) -> bool {
        self.store.transact(|s| CardAssignment::deactivate(s, initiative))
    }

    pub fn reset_all_activations(&mut self) -> bool {
        self.store.transact(CardAssignment::reset_all_activations)
    }

    #[must_use]
    pub fn all_cards_activated(&self) -> bool {
        CardAssignment::all_activated(self.store.state())
    }

    #[must_use]
    pub fn owner_of(&self, initiative: Initiative) -> Option<&Player> {
        CardAssignment::owner_of(self.store.state(), initiative)
    }

    #[must_use]
    pub fn unassigned_cards(&self) -> Vec<StrategyCard> {
        CardAssignment::unassigned(self.store.state()).cloned().collect()
    }

    #[must_use]
    pub fn assigned_cards(&self) -> Vec<StrategyCard> {
        CardAssignment::assigned(self.store.state()).cloned().collect()
    }

    // === Turn order ===

    #[must_use]
    pub fn effective_initiative(&self, player: PlayerId) -> Option<EffectiveInitiative> {
        self.player(player)
            .map(|p| TurnOrder::effective_initiative(&self.config, p))
    }

    /// Players still taking turns, in initiative order.
    #[must_use]
    pub fn active_players(&self) -> Vec<Player> {
        TurnOrder::active_players(self.store.state(), &self.config)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Every card holder in initiative order, passed players included.
    #[must_use]
    pub fn players_by_initiative(&self) -> Vec<Player> {
        TurnOrder::players_by_initiative(self.store.state(), &self.config)
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        TurnOrder::current_player(self.store.state(), &self.config)
    }

    pub fn advance_turn(&mut self) -> bool {
        let config = &self.config;
        self.store.transact(|s| TurnOrder::advance(s, config))
    }

    // === Passing ===

    pub fn mark_passed(&mut self, player: PlayerId) -> bool {
        self.store.transact(|s| PassTracker::mark_passed(s, player))
    }

    pub fn unpass(&mut self, player: PlayerId) -> bool {
        self.store.transact(|s| PassTracker::unpass(s, player))
    }

    pub fn reset_all_passes(&mut self) {
        self.store.transact(PassTracker::reset_all_passes);
    }

    pub fn reset_turn_count(&mut self) {
        self.store.transact(PassTracker::reset_turn_count);
    }

    #[must_use]
    pub fn has_passed(&self, player: PlayerId) -> bool {
        PassTracker::has_passed(self.store.state(), player)
    }

    #[must_use]
    pub fn passed_players(&self) -> Vec<Player> {
        PassTracker::passed_players(self.store.state()).cloned().collect()
    }

    #[must_use]
    pub fn unpassed_players(&self) -> Vec<Player> {
        PassTracker::unpassed_players(self.store.state()).cloned().collect()
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        PassTracker::turn_count(self.store.state())
    }

    #[must_use]
    pub fn action_phase_summary(&self) -> ActionPhaseSummary {
        PassTracker::summary(self.store.state())
    }

    // === Round ===

    /// Move to the next round: bonuses on leftover cards, everything else
    /// released.
    pub fn start_new_round(&mut self) {
        self.store.transact(RoundReset::start_new_round);
    }

    // === Timer ===

    pub fn start_timer(&mut self) -> bool {
        self.start_timer_at(Utc::now())
    }

    pub fn start_timer_at(&mut self, now: DateTime<Utc>) -> bool {
        self.store.transact(|s| TurnTimer::start(s, now))
    }

    pub fn pause_timer(&mut self) -> bool {
        self.pause_timer_at(Utc::now())
    }

    pub fn pause_timer_at(&mut self, now: DateTime<Utc>) -> bool {
        let config = &self.config;
        self.store.transact(|s| TurnTimer::pause(s, config, now))
    }

    pub fn reset_timer(&mut self) {
        self.store.transact(TurnTimer::reset);
    }

    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.elapsed_at(Utc::now())
    }

    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        TurnTimer::elapsed(self.store.state(), now)
    }

    /// Current player's total time including the running interval.
    #[must_use]
    pub fn current_turn_total_at(&self, now: DateTime<Utc>) -> Option<u64> {
        TurnTimer::current_total(self.store.state(), &self.config, now)
    }

    // === Agenda ===

    pub fn open_agenda(&mut self, name: &str) -> AgendaId {
        self.open_agenda_at(name, Utc::now())
    }

    pub fn open_agenda_at(&mut self, name: &str, now: DateTime<Utc>) -> AgendaId {
        let taken: Vec<_> = self
            .store
            .state()
            .agenda_phase
            .agendas
            .iter()
            .map(|agenda| agenda.id)
            .collect();
        let id = self.ids.next_agenda_id_excluding(&taken);
        self.agenda.open(id, name, now).id
    }

    #[must_use]
    pub fn current_agenda(&self) -> Option<&Agenda> {
        self.agenda.current()
    }

    pub fn record_vote(&mut self, player: PlayerId, vote_count: u32, voted_for: &str) -> bool {
        self.agenda
            .record_vote(self.store.state(), player, vote_count, voted_for)
    }

    pub fn set_agenda_outcome(&mut self, outcome: &str) -> bool {
        self.agenda.set_outcome(outcome)
    }

    /// Totals for the open agenda.
    #[must_use]
    pub fn tally(&self) -> VoteTally {
        self.agenda.tally()
    }

    #[must_use]
    pub fn winning_option(&self) -> Option<String> {
        self.agenda.winning_option()
    }

    pub fn complete_agenda(&mut self) -> bool {
        let agenda = &mut self.agenda;
        self.store.transact(|s| agenda.complete(s))
    }

    pub fn cancel_current_agenda(&mut self) -> bool {
        self.agenda.cancel()
    }

    #[must_use]
    pub fn agenda_history(&self) -> Vec<Agenda> {
        AgendaBallotTracker::history(self.store.state()).cloned().collect()
    }

    #[must_use]
    pub fn agenda(&self, id: AgendaId) -> Option<&Agenda> {
        AgendaBallotTracker::find(self.store.state(), id)
    }

    pub fn delete_agenda(&mut self, id: AgendaId) -> bool {
        self.store.transact(|s| AgendaBallotTracker::delete(s, id))
    }

    pub fn clear_agenda_history(&mut self) {
        let agenda = &mut self.agenda;
        self.store.transact(|s| agenda.clear_history(s));
    }

    // === Victory points ===

    pub fn increment_vp(&mut self, player: PlayerId, amount: u32) -> bool {
        self.increment_vp_at(player, amount, Utc::now())
    }

    pub fn increment_vp_at(&mut self, player: PlayerId, amount: u32, now: DateTime<Utc>) -> bool {
        let config = &self.config;
        self.store
            .transact(|s| VictoryLedger::increment(s, config, player, amount, now))
    }

    pub fn decrement_vp(&mut self, player: PlayerId, amount: u32) -> bool {
        self.decrement_vp_at(player, amount, Utc::now())
    }

    pub fn decrement_vp_at(&mut self, player: PlayerId, amount: u32, now: DateTime<Utc>) -> bool {
        let config = &self.config;
        self.store
            .transact(|s| VictoryLedger::decrement(s, config, player, amount, now))
    }

    pub fn set_vp(&mut self, player: PlayerId, points: i64) -> bool {
        self.set_vp_at(player, points, Utc::now())
    }

    pub fn set_vp_at(&mut self, player: PlayerId, points: i64, now: DateTime<Utc>) -> bool {
        let config = &self.config;
        self.store
            .transact(|s| VictoryLedger::set(s, config, player, points, now))
    }

    pub fn reset_all_vps(&mut self) {
        self.reset_all_vps_at(Utc::now());
    }

    pub fn reset_all_vps_at(&mut self, now: DateTime<Utc>) {
        let config = &self.config;
        self.store.transact(|s| VictoryLedger::reset_all(s, config, now));
    }

    pub fn clear_vp_history(&mut self) {
        self.store.transact(VictoryLedger::clear_history);
    }

    #[must_use]
    pub fn vp(&self, player: PlayerId) -> u32 {
        VictoryLedger::vp(self.store.state(), player)
    }

    #[must_use]
    pub fn has_player_won(&self, player: PlayerId) -> bool {
        VictoryLedger::has_player_won(self.store.state(), &self.config, player)
    }

    #[must_use]
    pub fn check_win_condition(&self) -> WinCheck {
        VictoryLedger::check_win_condition(self.store.state(), &self.config)
    }

    #[must_use]
    pub fn leader(&self) -> Option<Leader> {
        VictoryLedger::leader(self.store.state())
    }

    #[must_use]
    pub fn players_by_vp(&self) -> Vec<Player> {
        VictoryLedger::players_by_vp(self.store.state())
    }

    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        VictoryLedger::standings(self.store.state())
    }

    /// Latest VP changes, newest first.
    #[must_use]
    pub fn recent_vp_changes(&self, count: usize) -> Vec<VpChange> {
        VictoryLedger::recent_changes(self.store.state(), count)
    }

    #[must_use]
    pub fn vp_summary(&self) -> VpSummary {
        VictoryLedger::summary(self.store.state(), &self.config)
    }
}
