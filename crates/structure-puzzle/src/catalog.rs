//! Level catalog: an immutable list of levels per structure type.
//!
//! The built-in catalog is embedded JSON parsed once on first use. Custom
//! level packs in the same format can be loaded from disk.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use log::debug;

use crate::error::CatalogError;
use crate::puzzle::{Level, StructureKind};

const BUILTIN_LEVELS: &str = include_str!("../levels/builtin.json");

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    levels: BTreeMap<StructureKind, Vec<Level>>,
}

impl Catalog {
    /// The levels shipped with the game
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| {
            Catalog::from_json(BUILTIN_LEVELS).expect("embedded level catalog is valid")
        })
    }

    /// Parse and validate a catalog file's contents
    pub fn from_json(json: &str) -> Result<Catalog, CatalogError> {
        let mut levels: BTreeMap<StructureKind, Vec<Level>> = serde_json::from_str(json)?;
        for (&structure, list) in levels.iter_mut() {
            for (index, level) in list.iter_mut().enumerate() {
                level.structure = structure;
                validate_level(level, index)?;
            }
            debug!("Loaded {} {structure} levels", list.len());
        }
        Ok(Catalog { levels })
    }

    pub fn from_path(path: &Path) -> Result<Catalog, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Catalog::from_json(&content)
    }

    /// Levels for one structure type, in display order
    pub fn levels(&self, structure: StructureKind) -> &[Level] {
        self.levels
            .get(&structure)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a level by structure type and id
    pub fn level(&self, structure: StructureKind, id: u32) -> Option<&Level> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.levels(structure).get(index)
    }

    /// The level after `id`, if there is one
    pub fn next_level(&self, structure: StructureKind, id: u32) -> Option<&Level> {
        self.level(structure, id.checked_add(1)?)
    }

    /// Structure types with at least one level
    pub fn structures(&self) -> impl Iterator<Item = StructureKind> + '_ {
        self.levels
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(&kind, _)| kind)
    }

    /// Every level of every structure type
    pub fn iter(&self) -> impl Iterator<Item = &Level> + '_ {
        self.levels.values().flatten()
    }
}

/// Check a level listed at `index` of its section
fn validate_level(level: &Level, index: usize) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidLevel {
        structure: level.structure,
        id: level.id,
        reason,
    };

    let expected_id = index + 1;
    if usize::try_from(level.id).ok() != Some(expected_id) {
        return Err(invalid(format!("expected id {expected_id}")));
    }
    if level.name.trim().is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    if level.max_moves == 0 {
        return Err(invalid("maxMoves must be positive".to_string()));
    }
    if level.operations.is_empty() {
        return Err(invalid("no operations".to_string()));
    }
    if let Some(op) = level
        .operations
        .iter()
        .find(|op| op.structure() != level.structure)
    {
        return Err(invalid(format!("operation `{op}` does not apply")));
    }
    Ok(())
}
