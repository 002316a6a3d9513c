//! Identifier types and deterministic identifier generation.
//!
//! ## PlayerId / AgendaId
//!
//! Opaque identifiers minted once and never reused within a session.
//! They display as `player-<hex>` / `agenda-<hex>` so saved documents stay
//! readable.
//!
//! ## IdGenerator
//!
//! ChaCha8-backed generator. Seeded sessions produce the same identifier
//! sequence, which keeps tests and replayed sessions reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a player ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player-{:012x}", self.0)
    }
}

/// Agenda identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgendaId(pub u64);

impl AgendaId {
    /// Create an agenda ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AgendaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agenda-{:012x}", self.0)
    }
}

/// Deterministic identifier source.
///
/// Identifiers are 48-bit so they print compactly; callers that need
/// uniqueness against existing ids (e.g. after a load) use
/// [`IdGenerator::next_player_id_excluding`].
#[derive(Clone, Debug)]
pub struct IdGenerator {
    inner: ChaCha8Rng,
    seed: u64,
}

impl IdGenerator {
    const MASK: u64 = (1 << 48) - 1;

    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen();
        Self::new(seed)
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn next_raw(&mut self) -> u64 {
        // Zero is reserved so a default-initialised id is never minted.
        loop {
            let raw = self.inner.gen::<u64>() & Self::MASK;
            if raw != 0 {
                return raw;
            }
        }
    }

    /// Mint a fresh player ID.
    pub fn next_player_id(&mut self) -> PlayerId {
        PlayerId(self.next_raw())
    }

    /// Mint a player ID that does not collide with any id in `taken`.
    pub fn next_player_id_excluding(&mut self, taken: &[PlayerId]) -> PlayerId {
        loop {
            let id = self.next_player_id();
            if !taken.contains(&id) {
                return id;
            }
        }
    }

    /// Mint a fresh agenda ID.
    pub fn next_agenda_id(&mut self) -> AgendaId {
        AgendaId(self.next_raw())
    }

    /// Mint an agenda ID that does not collide with any id in `taken`.
    pub fn next_agenda_id_excluding(&mut self, taken: &[AgendaId]) -> AgendaId {
        loop {
            let id = self.next_agenda_id();
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}
