//! Unit records consumed by the combat core.
//!
//! Units are read-only inputs: the core never mutates a definition.

mod definition;

pub use definition::{
    BaseAttributes, Resistances, UnitDefinition, DEFAULT_ATTRIBUTE, SKILL_TAG_PREFIX,
    SPELL_TAG_PREFIX,
};
