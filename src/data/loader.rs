//! JSON loaders for units and ability tables.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::abilities::{AbilityBook, AbilityTable};
use crate::error::{DataError, DataResult};
use crate::units::UnitDefinition;

fn read(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|e| DataError::io(path, e))
}

/// Load one unit record from a JSON file.
pub fn load_unit(path: impl AsRef<Path>) -> DataResult<UnitDefinition> {
    let path = path.as_ref();
    let unit = UnitDefinition::from_json_str(&read(path)?).map_err(|e| DataError::parse(path, e))?;
    debug!(path = %path.display(), unit = %unit.name, "loaded unit");
    Ok(unit)
}

impl AbilityTable {
    /// Load a table from a JSON file of `name -> record`.
    pub fn from_path(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let table = Self::from_json_str(&read(path)?).map_err(|e| DataError::parse(path, e))?;
        debug!(path = %path.display(), abilities = table.len(), "loaded ability table");
        Ok(table)
    }
}

impl AbilityBook {
    /// Load the spell and skill tables.
    pub fn load(spells: impl AsRef<Path>, skills: impl AsRef<Path>) -> DataResult<Self> {
        Ok(Self::new(AbilityTable::from_path(spells)?, AbilityTable::from_path(skills)?))
    }
}

/// Units available for battle, keyed by file stem.
///
/// Entries are kept sorted by key so listings are stable.
#[derive(Clone, Debug, Default)]
pub struct UnitRoster {
    units: Vec<(String, UnitDefinition)>,
}

impl UnitRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir`.
    ///
    /// Fails on the first unreadable or malformed file, and when two
    /// files declare the same unit name.
    pub fn from_dir(dir: impl AsRef<Path>) -> DataResult<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| DataError::io(dir, e))?;

        let mut roster = Self::new();
        for entry in entries {
            let path = entry.map_err(|e| DataError::io(dir, e))?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let unit = load_unit(&path)?;
            roster.register(stem, unit)?;
        }

        info!(dir = %dir.display(), units = roster.len(), "loaded unit roster");
        Ok(roster)
    }

    /// Add a unit under `key`.
    pub fn register(&mut self, key: impl Into<String>, unit: UnitDefinition) -> DataResult<()> {
        let key = key.into();
        if self.units.iter().any(|(k, u)| *k == key || u.name == unit.name) {
            return Err(DataError::DuplicateUnit(unit.name));
        }
        let at = self.units.partition_point(|(k, _)| *k < key);
        self.units.insert(at, (key, unit));
        Ok(())
    }

    /// Look a unit up by key or by unit name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units
            .iter()
            .find(|(k, _)| k == name)
            .or_else(|| self.units.iter().find(|(_, u)| u.name == name))
            .map(|(_, u)| u)
    }

    /// Like `get`, but an unknown name is an error.
    pub fn require(&self, name: &str) -> DataResult<&UnitDefinition> {
        self.get(name).ok_or_else(|| DataError::UnknownUnit(name.to_string()))
    }

    /// Keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, unit)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitDefinition)> {
        self.units.iter().map(|(k, u)| (k.as_str(), u))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
