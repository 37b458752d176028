//! Level representation types that match the JSON catalog format.
//!
//! These types deserialize directly from the level files, with camelCase keys
//! and the lowercase structure names used as catalog sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::PuzzleError;
use crate::operation::OperationKind;

/// The five structure variants a level can be played on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    #[default]
    Stack,
    Queue,
    LinkedList,
    Tree,
    Graph,
}

impl StructureKind {
    pub const ALL: [StructureKind; 5] = [
        StructureKind::Stack,
        StructureKind::Queue,
        StructureKind::LinkedList,
        StructureKind::Tree,
        StructureKind::Graph,
    ];

    /// Catalog and CLI name
    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
            StructureKind::LinkedList => "linkedlist",
            StructureKind::Tree => "tree",
            StructureKind::Graph => "graph",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StructureKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StructureKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| PuzzleError::UnknownStructure(s.to_string()))
    }
}

/// Difficulty tier of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A single level of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub difficulty: Difficulty,
    pub initial: Vec<Element>,
    pub target: Vec<Element>,
    pub operations: Vec<OperationKind>,
    pub max_moves: u32,
    /// Filled in from the catalog section the level was listed under
    #[serde(skip_deserializing, default)]
    pub structure: StructureKind,
}

impl Level {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        structure: StructureKind,
        id: u32,
        name: &str,
        difficulty: Difficulty,
        initial: Vec<Element>,
        target: Vec<Element>,
        operations: Vec<OperationKind>,
        max_moves: u32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            difficulty,
            initial,
            target,
            operations,
            max_moves,
            structure,
        }
    }

    /// Whether the operation is in this level's legal set
    pub fn allows(&self, op: OperationKind) -> bool {
        self.operations.contains(&op)
    }

    /// Whether any legal operation can take elements out
    pub fn allows_removal(&self) -> bool {
        self.operations.iter().any(|op| op.removes())
    }

    /// Whether any legal operation can add elements
    pub fn allows_insertion(&self) -> bool {
        self.operations.iter().any(|op| op.inserts())
    }

    /// Distinct values appearing in the initial or target sequence
    pub fn values(&self) -> Vec<Element> {
        let mut values: Vec<Element> = Vec::new();
        for value in self.initial.iter().chain(&self.target) {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
        values
    }
}
