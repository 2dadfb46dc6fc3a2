//! Ability tables for definition lookup.
//!
//! An `AbilityTable` maps ability names to definitions. Units refer to
//! abilities by name through `spell_*` / `skill_*` tags; the table is
//! read-only once a battle starts.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::definition::AbilityDefinition;

/// Table of ability definitions keyed by name.
///
/// ## Example
///
/// ```
/// use rust_duel::abilities::{AbilityDefinition, AbilityTable};
///
/// let mut spells = AbilityTable::new();
/// spells.insert(AbilityDefinition::damage("firebolt", 10, 2, 4, 9).with_channel("fire"));
///
/// assert_eq!(spells.cost("firebolt"), Some(10));
/// assert_eq!(spells.cost("missing"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "FxHashMap<String, AbilityDefinition>")]
pub struct AbilityTable {
    abilities: FxHashMap<String, AbilityDefinition>,
}

impl AbilityTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from a JSON object of `name -> record`.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Insert a definition, replacing any with the same name.
    pub fn insert(&mut self, ability: AbilityDefinition) {
        self.abilities.insert(ability.name.clone(), ability);
    }

    /// Insert a definition (builder pattern).
    #[must_use]
    pub fn with(mut self, ability: AbilityDefinition) -> Self {
        self.insert(ability);
        self
    }

    /// Get an ability by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(name)
    }

    /// Cost of an ability, `None` if unknown.
    #[must_use]
    pub fn cost(&self, name: &str) -> Option<i64> {
        self.get(name).map(|a| a.cost)
    }

    /// Cooldown of an ability, 0 if unknown.
    #[must_use]
    pub fn cooldown(&self, name: &str) -> i64 {
        self.get(name).map_or(0, |a| a.cooldown)
    }

    /// Check if an ability is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.abilities.contains_key(name)
    }

    /// Get the number of abilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.values()
    }
}

impl From<FxHashMap<String, AbilityDefinition>> for AbilityTable {
    fn from(mut abilities: FxHashMap<String, AbilityDefinition>) -> Self {
        for (name, ability) in &mut abilities {
            ability.name.clone_from(name);
        }
        Self { abilities }
    }
}

impl FromIterator<AbilityDefinition> for AbilityTable {
    fn from_iter<I: IntoIterator<Item = AbilityDefinition>>(iter: I) -> Self {
        let mut table = Self::new();
        for ability in iter {
            table.insert(ability);
        }
        table
    }
}

/// The two ability tables a battle consults: spells and skills.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityBook {
    /// Mana-backed abilities, referenced by `spell_*` tags.
    pub spells: AbilityTable,
    /// Stamina-backed abilities, referenced by `skill_*` tags.
    pub skills: AbilityTable,
}

impl AbilityBook {
    /// Create a book from spell and skill tables.
    #[must_use]
    pub fn new(spells: AbilityTable, skills: AbilityTable) -> Self {
        Self { spells, skills }
    }

    /// A book with no abilities (every unit falls back to basic attacks).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
