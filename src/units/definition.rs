//! Unit definitions - static combatant data.
//!
//! `UnitDefinition` holds the immutable record a unit is loaded from:
//! base attributes, tags and resistances. Anything that changes during
//! a battle (pools, effects, cooldowns) lives on the combatant instead.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Value an attribute takes when the record omits it.
pub const DEFAULT_ATTRIBUTE: i64 = 10;

/// Tag prefix naming a spell the unit knows.
pub const SPELL_TAG_PREFIX: &str = "spell_";

/// Tag prefix naming a skill the unit knows.
pub const SKILL_TAG_PREFIX: &str = "skill_";

fn default_attribute() -> i64 {
    DEFAULT_ATTRIBUTE
}

/// Base attribute block.
///
/// Any attribute missing from the record defaults to 10. Charisma is
/// carried for completeness but never used in combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseAttributes {
    #[serde(rename = "str", default = "default_attribute")]
    pub strength: i64,
    #[serde(rename = "dex", default = "default_attribute")]
    pub dexterity: i64,
    #[serde(rename = "con", default = "default_attribute")]
    pub constitution: i64,
    #[serde(rename = "int", default = "default_attribute")]
    pub intelligence: i64,
    #[serde(rename = "wis", default = "default_attribute")]
    pub wisdom: i64,
    #[serde(rename = "cha", default = "default_attribute")]
    pub charisma: i64,
}

impl Default for BaseAttributes {
    fn default() -> Self {
        Self {
            strength: DEFAULT_ATTRIBUTE,
            dexterity: DEFAULT_ATTRIBUTE,
            constitution: DEFAULT_ATTRIBUTE,
            intelligence: DEFAULT_ATTRIBUTE,
            wisdom: DEFAULT_ATTRIBUTE,
            charisma: DEFAULT_ATTRIBUTE,
        }
    }
}

impl BaseAttributes {
    /// Create an attribute block from str/dex/con/int/wis (cha = 10).
    #[must_use]
    pub const fn new(strength: i64, dexterity: i64, constitution: i64, intelligence: i64, wisdom: i64) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma: DEFAULT_ATTRIBUTE,
        }
    }
}

/// Percent damage reduction per damage channel.
///
/// Channels absent from the map resist nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resistances(FxHashMap<String, i64>);

impl Resistances {
    /// Create an empty resistance table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel resistance (builder pattern).
    #[must_use]
    pub fn with(mut self, channel: impl Into<String>, percent: i64) -> Self {
        self.0.insert(channel.into(), percent);
        self
    }

    /// Resistance percentage for a channel (0 if absent).
    #[must_use]
    pub fn percent(&self, channel: &str) -> i64 {
        self.0.get(channel).copied().unwrap_or(0)
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(channel, percent)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Static unit record.
///
/// ## Example
///
/// ```
/// use rust_duel::units::{BaseAttributes, UnitDefinition};
///
/// let mage = UnitDefinition::new("Mage", BaseAttributes::new(8, 12, 10, 16, 14))
///     .with_tag("can_cast")
///     .with_tag("spell_firebolt");
///
/// assert!(mage.has_tag("can_cast"));
/// assert_eq!(mage.spells().collect::<Vec<_>>(), vec!["firebolt"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Display name, also used to scope self-applied effects.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Base attributes (missing entries default to 10).
    #[serde(default)]
    pub stats: BaseAttributes,

    /// Drafting cost. Unused in combat.
    #[serde(default)]
    pub cost: u32,

    /// Unit type label. Unused in combat.
    #[serde(rename = "type", default)]
    pub unit_type: String,

    /// Ordered tags: eligibility markers plus `spell_*` / `skill_*` entries.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub resistances: Resistances,
}

impl UnitDefinition {
    /// Create a unit with the given name and attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, stats: BaseAttributes) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            stats,
            cost: 0,
            unit_type: String::new(),
            tags: Vec::new(),
            resistances: Resistances::new(),
        }
    }

    /// Parse a unit record from JSON.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the resistance table (builder pattern).
    #[must_use]
    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check for an exact tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Spell names from `spell_*` tags, in tag order.
    pub fn spells(&self) -> impl Iterator<Item = &str> {
        self.tagged(SPELL_TAG_PREFIX)
    }

    /// Skill names from `skill_*` tags, in tag order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.tagged(SKILL_TAG_PREFIX)
    }

    fn tagged<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.tags
            .iter()
            .filter_map(move |t| t.strip_prefix(prefix))
            .filter(|name| !name.is_empty())
    }
}
