//! Player operations and the input contract around them.
//!
//! The UI asks the engine which inputs an operation needs
//! ([`OperationKind::inputs`]), collects them however and whenever it likes,
//! then hands the raw replies to [`Operation::from_inputs`]. Blank or
//! malformed replies are rejected there, before a session ever sees them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::PuzzleError;
use crate::puzzle::StructureKind;

/// Operation names as they appear in level files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    #[serde(rename = "push")]
    Push,
    #[serde(rename = "pop")]
    Pop,
    #[serde(rename = "enqueue")]
    Enqueue,
    #[serde(rename = "dequeue")]
    Dequeue,
    #[serde(rename = "insert")]
    Insert,
    #[serde(rename = "delete")]
    Delete,
    #[serde(rename = "insert_tree")]
    InsertTree,
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "addVertex")]
    AddVertex,
    #[serde(rename = "removeVertex")]
    RemoveVertex,
    #[serde(rename = "addEdge")]
    AddEdge,
}

/// One value the UI must collect before an operation can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputSlot {
    pub name: &'static str,
    pub required: bool,
}

const VALUE: InputSlot = InputSlot {
    name: "value",
    required: true,
};
const POSITION: InputSlot = InputSlot {
    name: "position",
    required: false,
};
const FROM: InputSlot = InputSlot {
    name: "from",
    required: true,
};
const TO: InputSlot = InputSlot {
    name: "to",
    required: true,
};

impl OperationKind {
    pub const ALL: [OperationKind; 11] = [
        OperationKind::Push,
        OperationKind::Pop,
        OperationKind::Enqueue,
        OperationKind::Dequeue,
        OperationKind::Insert,
        OperationKind::Delete,
        OperationKind::InsertTree,
        OperationKind::Search,
        OperationKind::AddVertex,
        OperationKind::RemoveVertex,
        OperationKind::AddEdge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Push => "push",
            OperationKind::Pop => "pop",
            OperationKind::Enqueue => "enqueue",
            OperationKind::Dequeue => "dequeue",
            OperationKind::Insert => "insert",
            OperationKind::Delete => "delete",
            OperationKind::InsertTree => "insert_tree",
            OperationKind::Search => "search",
            OperationKind::AddVertex => "addVertex",
            OperationKind::RemoveVertex => "removeVertex",
            OperationKind::AddEdge => "addEdge",
        }
    }

    /// The structure this operation acts on
    pub fn structure(self) -> StructureKind {
        match self {
            OperationKind::Push | OperationKind::Pop => StructureKind::Stack,
            OperationKind::Enqueue | OperationKind::Dequeue => StructureKind::Queue,
            OperationKind::Insert | OperationKind::Delete => StructureKind::LinkedList,
            OperationKind::InsertTree | OperationKind::Search => StructureKind::Tree,
            OperationKind::AddVertex | OperationKind::RemoveVertex | OperationKind::AddEdge => {
                StructureKind::Graph
            }
        }
    }

    /// Check if this operation can add elements
    pub fn inserts(self) -> bool {
        matches!(
            self,
            OperationKind::Push
                | OperationKind::Enqueue
                | OperationKind::Insert
                | OperationKind::InsertTree
                | OperationKind::AddVertex
                | OperationKind::AddEdge
        )
    }

    /// Check if this operation can take elements out
    pub fn removes(self) -> bool {
        matches!(
            self,
            OperationKind::Pop
                | OperationKind::Dequeue
                | OperationKind::Delete
                | OperationKind::RemoveVertex
        )
    }

    /// Inputs to request from the player, in order
    pub fn inputs(self) -> &'static [InputSlot] {
        match self {
            OperationKind::Pop | OperationKind::Dequeue => &[],
            OperationKind::Push
            | OperationKind::Enqueue
            | OperationKind::InsertTree
            | OperationKind::Search
            | OperationKind::AddVertex
            | OperationKind::RemoveVertex => &[VALUE],
            OperationKind::Insert => &[VALUE, POSITION],
            OperationKind::Delete => &[POSITION],
            OperationKind::AddEdge => &[FROM, TO],
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = PuzzleError;

    /// Names are matched exactly, as written in level files
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| PuzzleError::UnknownOperation(s.to_string()))
    }
}

/// A fully specified operation, ready to apply
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Push { value: Element },
    Pop,
    Enqueue { value: Element },
    Dequeue,
    Insert { value: Element, position: Option<usize> },
    Delete { position: Option<usize> },
    InsertTree { value: Element },
    Search { value: Element },
    AddVertex { value: Element },
    RemoveVertex { value: Element },
    AddEdge { from: Element, to: Element },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Push { .. } => OperationKind::Push,
            Operation::Pop => OperationKind::Pop,
            Operation::Enqueue { .. } => OperationKind::Enqueue,
            Operation::Dequeue => OperationKind::Dequeue,
            Operation::Insert { .. } => OperationKind::Insert,
            Operation::Delete { .. } => OperationKind::Delete,
            Operation::InsertTree { .. } => OperationKind::InsertTree,
            Operation::Search { .. } => OperationKind::Search,
            Operation::AddVertex { .. } => OperationKind::AddVertex,
            Operation::RemoveVertex { .. } => OperationKind::RemoveVertex,
            Operation::AddEdge { .. } => OperationKind::AddEdge,
        }
    }

    /// Build an operation from raw player replies, one per [`InputSlot`].
    ///
    /// `None` and blank replies leave an optional slot unset and reject a
    /// required one.
    pub fn from_inputs(kind: OperationKind, inputs: &[Option<&str>]) -> Result<Operation, PuzzleError> {
        let raw = |index: usize| inputs.get(index).copied().flatten();

        let value = |index: usize| -> Result<Element, PuzzleError> {
            raw(index)
                .and_then(Element::parse)
                .ok_or_else(|| PuzzleError::InvalidInput {
                    op: kind,
                    reason: format!("`{}` is required", kind.inputs()[index].name),
                })
        };

        let position = |index: usize| -> Result<Option<usize>, PuzzleError> {
            match raw(index).map(str::trim) {
                None | Some("") => Ok(None),
                Some(text) => text.parse::<usize>().map(Some).map_err(|_| {
                    PuzzleError::InvalidInput {
                        op: kind,
                        reason: format!("position `{text}` is not a non-negative integer"),
                    }
                }),
            }
        };

        Ok(match kind {
            OperationKind::Push => Operation::Push { value: value(0)? },
            OperationKind::Pop => Operation::Pop,
            OperationKind::Enqueue => Operation::Enqueue { value: value(0)? },
            OperationKind::Dequeue => Operation::Dequeue,
            OperationKind::Insert => Operation::Insert {
                value: value(0)?,
                position: position(1)?,
            },
            OperationKind::Delete => Operation::Delete {
                position: position(0)?,
            },
            OperationKind::InsertTree => Operation::InsertTree { value: value(0)? },
            OperationKind::Search => Operation::Search { value: value(0)? },
            OperationKind::AddVertex => Operation::AddVertex { value: value(0)? },
            OperationKind::RemoveVertex => Operation::RemoveVertex { value: value(0)? },
            OperationKind::AddEdge => Operation::AddEdge {
                from: value(0)?,
                to: value(1)?,
            },
        })
    }

    /// Serializable form of this operation
    pub fn to_request(&self) -> MoveRequest {
        let args = match self {
            Operation::Pop | Operation::Dequeue => Vec::new(),
            Operation::Push { value }
            | Operation::Enqueue { value }
            | Operation::InsertTree { value }
            | Operation::Search { value }
            | Operation::AddVertex { value }
            | Operation::RemoveVertex { value } => vec![value.to_string()],
            Operation::Insert { value, position } => {
                let mut args = vec![value.to_string()];
                args.extend(position.map(|p| p.to_string()));
                args
            }
            Operation::Delete { position } => position.map(|p| p.to_string()).into_iter().collect(),
            Operation::AddEdge { from, to } => vec![from.to_string(), to.to_string()],
        };
        MoveRequest {
            op: self.kind(),
            args,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Pop | Operation::Dequeue => write!(f, "{}", self.kind()),
            Operation::Push { value }
            | Operation::Enqueue { value }
            | Operation::InsertTree { value }
            | Operation::Search { value }
            | Operation::AddVertex { value }
            | Operation::RemoveVertex { value } => write!(f, "{} {value}", self.kind()),
            Operation::Insert { value, position } => match position {
                Some(p) => write!(f, "insert {value} at {p}"),
                None => write!(f, "insert {value}"),
            },
            Operation::Delete { position } => match position {
                Some(p) => write!(f, "delete at {p}"),
                None => write!(f, "delete"),
            },
            Operation::AddEdge { from, to } => write!(f, "addEdge {from} {to}"),
        }
    }
}

/// An operation name plus raw player replies, as found in move scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub op: OperationKind,
    #[serde(default)]
    pub args: Vec<String>,
}

impl MoveRequest {
    pub fn to_operation(&self) -> Result<Operation, PuzzleError> {
        let inputs: Vec<Option<&str>> = self.args.iter().map(|a| Some(a.as_str())).collect();
        Operation::from_inputs(self.op, &inputs)
    }
}

/// What an operation did to the structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum OperationResult {
    /// A value was added (or was already there, for graph vertices and edges)
    Inserted,
    /// A value was taken out
    Removed(Element),
    /// Outcome of a search
    Found(bool),
    /// The vertex to remove was not in the graph
    Absent,
    /// Nothing to act on; the move does not count
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_belongs_to_one_structure() {
        assert_eq!(OperationKind::Push.structure(), StructureKind::Stack);
        assert_eq!(OperationKind::Delete.structure(), StructureKind::LinkedList);
        assert_eq!(OperationKind::Search.structure(), StructureKind::Tree);
        assert_eq!(OperationKind::AddEdge.structure(), StructureKind::Graph);
        assert_eq!(OperationKind::AddVertex.structure(), StructureKind::Graph);
        assert!(OperationKind::AddEdge.inserts() && !OperationKind::AddEdge.removes());
    }

    #[test]
    fn test_kind_names_match_serde() {
        let kinds: Vec<OperationKind> =
            serde_json::from_str(r#"["insert_tree", "addVertex", "removeVertex", "pop"]"#).unwrap();
        for kind in kinds {
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_parse_kind_names() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.name().parse::<OperationKind>(), Ok(kind));
        }
        assert_eq!(" addEdge ".parse::<OperationKind>(), Ok(OperationKind::AddEdge));
        assert_eq!(
            "peek".parse::<OperationKind>(),
            Err(PuzzleError::UnknownOperation("peek".to_string()))
        );
        assert!("Push".parse::<OperationKind>().is_err());
    }

    #[test]
    fn test_from_inputs_rejects_blank_value() {
        let err = Operation::from_inputs(OperationKind::Push, &[Some("   ")]).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidInput { op: OperationKind::Push, .. }));

        let err = Operation::from_inputs(OperationKind::Search, &[]).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidInput { .. }));
    }

    #[test]
    fn test_from_inputs_optional_position() {
        assert_eq!(
            Operation::from_inputs(OperationKind::Insert, &[Some("B"), Some("")]),
            Ok(Operation::Insert {
                value: Element::text("B"),
                position: None
            })
        );
        assert_eq!(
            Operation::from_inputs(OperationKind::Insert, &[Some("B"), Some(" 2 ")]),
            Ok(Operation::Insert {
                value: Element::text("B"),
                position: Some(2)
            })
        );
        assert_eq!(
            Operation::from_inputs(OperationKind::Delete, &[None]),
            Ok(Operation::Delete { position: None })
        );
        assert!(Operation::from_inputs(OperationKind::Delete, &[Some("-1")]).is_err());
        assert!(Operation::from_inputs(OperationKind::Delete, &[Some("two")]).is_err());
    }

    #[test]
    fn test_from_inputs_ignores_values_for_pop() {
        assert_eq!(
            Operation::from_inputs(OperationKind::Pop, &[Some("ignored")]),
            Ok(Operation::Pop)
        );
    }

    #[test]
    fn test_request_form() {
        let op = Operation::Insert {
            value: Element::Int(7),
            position: Some(0),
        };
        let request = op.to_request();
        assert_eq!(request.args, ["7", "0"]);
        assert_eq!(request.to_operation(), Ok(op));

        let parsed: MoveRequest = serde_json::from_str(r#"{"op": "dequeue"}"#).unwrap();
        assert_eq!(parsed.to_operation(), Ok(Operation::Dequeue));
    }

    #[test]
    fn test_display() {
        let op = Operation::Push {
            value: Element::text("A"),
        };
        assert_eq!(op.to_string(), "push A");
        assert_eq!(Operation::Delete { position: Some(2) }.to_string(), "delete at 2");
        assert_eq!(Operation::Dequeue.to_string(), "dequeue");
    }
}
