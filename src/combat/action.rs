//! Actions a combatant can take on its turn.

use serde::{Deserialize, Serialize};

/// Action category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Mana-backed ability.
    Cast,
    /// Stamina-backed ability.
    Skill,
    /// Basic weapon attack.
    Attack,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionKind::Cast => "cast",
            ActionKind::Skill => "skill",
            ActionKind::Attack => "attack",
        };
        f.write_str(s)
    }
}

/// A chosen action, with the ability name for casts and skills.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Cast(String),
    Skill(String),
    Attack,
}

impl Action {
    /// The action's category.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Cast(_) => ActionKind::Cast,
            Action::Skill(_) => ActionKind::Skill,
            Action::Attack => ActionKind::Attack,
        }
    }

    /// The ability name, if any.
    #[must_use]
    pub fn ability(&self) -> Option<&str> {
        match self {
            Action::Cast(name) | Action::Skill(name) => Some(name),
            Action::Attack => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Cast(name) => write!(f, "cast {name}"),
            Action::Skill(name) => write!(f, "skill {name}"),
            Action::Attack => write!(f, "attack"),
        }
    }
}
