//! Faction catalog.

use serde::{Deserialize, Serialize};

/// Product a faction was published in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Expansion {
    Base,
    Pok,
    Codex,
    ThundersEdge,
}

/// A playable faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Faction {
    /// Slug stored on players.
    pub id: &'static str,
    pub name: &'static str,
    pub expansion: Expansion,
}

const fn faction(id: &'static str, name: &'static str, expansion: Expansion) -> Faction {
    Faction { id, name, expansion }
}

/// Every faction the tracker knows about.
pub const FACTIONS: [Faction; 32] = [
    faction("arborec", "The Arborec", Expansion::Base),
    faction("barony-of-letnev", "The Barony of Letnev", Expansion::Base),
    faction("clan-of-saar", "The Clan of Saar", Expansion::Base),
    faction("embers-of-muaat", "The Embers of Muaat", Expansion::Base),
    faction("emirates-of-hacan", "The Emirates of Hacan", Expansion::Base),
    faction("federation-of-sol", "The Federation of Sol", Expansion::Base),
    faction("ghosts-of-creuss", "The Ghosts of Creuss", Expansion::Base),
    faction("l1z1x-mindnet", "The L1Z1X Mindnet", Expansion::Base),
    faction("mentak-coalition", "The Mentak Coalition", Expansion::Base),
    faction("naalu-collective", "The Naalu Collective", Expansion::Base),
    faction("nekro-virus", "The Nekro Virus", Expansion::Base),
    faction("sardakk-norr", "Sardakk N'orr", Expansion::Base),
    faction("universities-of-jol-nar", "The Universities of Jol-Nar", Expansion::Base),
    faction("winnu", "The Winnu", Expansion::Base),
    faction("xxcha-kingdom", "The Xxcha Kingdom", Expansion::Base),
    faction("yin-brotherhood", "The Yin Brotherhood", Expansion::Base),
    faction("yssaril-tribes", "The Yssaril Tribes", Expansion::Base),
    faction("argent-flight", "The Argent Flight", Expansion::Pok),
    faction("empyrean", "The Empyrean", Expansion::Pok),
    faction("mahact-gene-sorcerers", "The Mahact Gene-Sorcerers", Expansion::Pok),
    faction("naaz-rokha-alliance", "The Naaz-Rokha Alliance", Expansion::Pok),
    faction("nomad", "The Nomad", Expansion::Pok),
    faction("titans-of-ul", "The Titans of Ul", Expansion::Pok),
    faction("vuil-raith-cabal", "The Vuil'Raith Cabal", Expansion::Pok),
    faction("council-keleres-argent", "The Council Keleres (Argent)", Expansion::Codex),
    faction("council-keleres-mentak", "The Council Keleres (Mentak)", Expansion::Codex),
    faction("council-keleres-xxcha", "The Council Keleres (Xxcha)", Expansion::Codex),
    faction("last-bastion", "Last Bastion", Expansion::ThundersEdge),
    faction("ral-nel-consortium", "The Ral Nel Consortium", Expansion::ThundersEdge),
    faction("deepwrought-scholarate", "The Deepwrought Scholarate", Expansion::ThundersEdge),
    faction("crimson-rebellion", "The Crimson Rebellion", Expansion::ThundersEdge),
    faction("firmament-obsidian", "The Firmament / The Obsidian", Expansion::ThundersEdge),
];

/// Look up a faction by slug.
#[must_use]
pub fn find_faction(id: &str) -> Option<&'static Faction> {
    FACTIONS.iter().find(|f| f.id == id)
}

/// Factions from one product.
pub fn factions_in(expansion: Expansion) -> impl Iterator<Item = &'static Faction> {
    FACTIONS.iter().filter(move |f| f.expansion == expansion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_counts() {
        assert_eq!(factions_in(Expansion::Base).count(), 17);
        assert_eq!(factions_in(Expansion::Pok).count(), 7);
        assert_eq!(factions_in(Expansion::Codex).count(), 3);
        assert_eq!(factions_in(Expansion::ThundersEdge).count(), 5);
    }

    #[test]
    fn test_slugs_unique() {
        let mut ids: Vec<_> = FACTIONS.iter().map(|f| f.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), FACTIONS.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find_faction("nomad").map(|f| f.name), Some("The Nomad"));
        assert!(find_faction("Nomad").is_none());
    }
}
