//! The five puzzle structures and the tagged union that dispatches to them.

pub mod bst;
pub mod graph;
pub mod linked_list;
pub mod queue;
pub mod stack;

pub use bst::{BinarySearchTree, TreeNode};
pub use graph::Graph;
pub use linked_list::LinkedList;
pub use queue::Queue;
pub use stack::Stack;

use crate::element::Element;
use crate::error::PuzzleError;
use crate::operation::{Operation, OperationResult};
use crate::puzzle::StructureKind;

/// One live structure of any variant.
///
/// `Clone` is a deep copy: the copy shares nothing with the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Structure {
    Stack(Stack),
    Queue(Queue),
    LinkedList(LinkedList),
    Tree(BinarySearchTree),
    Graph(Graph),
}

impl Structure {
    pub fn new(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Stack => Structure::Stack(Stack::new()),
            StructureKind::Queue => Structure::Queue(Queue::new()),
            StructureKind::LinkedList => Structure::LinkedList(LinkedList::new()),
            StructureKind::Tree => Structure::Tree(BinarySearchTree::new()),
            StructureKind::Graph => Structure::Graph(Graph::new()),
        }
    }

    /// Build a structure by appending each element in turn
    pub fn from_elements<'a>(
        kind: StructureKind,
        elements: impl IntoIterator<Item = &'a Element>,
    ) -> Self {
        let mut structure = Structure::new(kind);
        for element in elements {
            structure.append(element.clone());
        }
        structure
    }

    pub fn kind(&self) -> StructureKind {
        match self {
            Structure::Stack(_) => StructureKind::Stack,
            Structure::Queue(_) => StructureKind::Queue,
            Structure::LinkedList(_) => StructureKind::LinkedList,
            Structure::Tree(_) => StructureKind::Tree,
            Structure::Graph(_) => StructureKind::Graph,
        }
    }

    /// Add an element with the variant's natural insert
    pub fn append(&mut self, element: Element) {
        match self {
            Structure::Stack(s) => s.push(element),
            Structure::Queue(q) => q.enqueue(element),
            Structure::LinkedList(l) => l.insert(element, None),
            Structure::Tree(t) => t.insert(element),
            Structure::Graph(g) => {
                g.add_vertex(element);
            }
        }
    }

    /// Elements in canonical order.
    ///
    /// Stack: bottom to top. Queue: front to back. List: head to tail.
    /// Tree: in-order. Graph: vertex insertion order, edges omitted.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        match self {
            Structure::Stack(s) => Box::new(s.iter()),
            Structure::Queue(q) => Box::new(q.iter()),
            Structure::LinkedList(l) => Box::new(l.iter()),
            Structure::Tree(t) => Box::new(t.iter()),
            Structure::Graph(g) => Box::new(g.iter()),
        }
    }

    /// Owned snapshot of [`Structure::iter`]
    pub fn export(&self) -> Vec<Element> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        match self {
            Structure::Stack(s) => s.len(),
            Structure::Queue(q) => q.len(),
            Structure::LinkedList(l) => l.len(),
            Structure::Tree(t) => t.len(),
            Structure::Graph(g) => g.vertex_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply an operation.
    ///
    /// Removals and searches with nothing to act on return
    /// [`PuzzleError::EmptyStructure`] and leave the structure untouched.
    /// Operations for another variant return [`PuzzleError::WrongStructure`].
    pub fn apply(&mut self, op: &Operation) -> Result<OperationResult, PuzzleError> {
        let kind = self.kind();
        let empty = PuzzleError::EmptyStructure(kind);

        match (self, op) {
            (Structure::Stack(s), Operation::Push { value }) => {
                s.push(value.clone());
                Ok(OperationResult::Inserted)
            }
            (Structure::Stack(s), Operation::Pop) => {
                s.pop().map(OperationResult::Removed).ok_or(empty)
            }
            (Structure::Queue(q), Operation::Enqueue { value }) => {
                q.enqueue(value.clone());
                Ok(OperationResult::Inserted)
            }
            (Structure::Queue(q), Operation::Dequeue) => {
                q.dequeue().map(OperationResult::Removed).ok_or(empty)
            }
            (Structure::LinkedList(l), Operation::Insert { value, position }) => {
                l.insert(value.clone(), *position);
                Ok(OperationResult::Inserted)
            }
            (Structure::LinkedList(l), Operation::Delete { position }) => {
                l.delete(*position).map(OperationResult::Removed).ok_or(empty)
            }
            (Structure::Tree(t), Operation::InsertTree { value }) => {
                t.insert(value.clone());
                Ok(OperationResult::Inserted)
            }
            (Structure::Tree(t), Operation::Search { value }) => {
                if t.is_empty() {
                    return Err(empty);
                }
                Ok(OperationResult::Found(t.search(value)))
            }
            (Structure::Graph(g), Operation::AddVertex { value }) => {
                g.add_vertex(value.clone());
                Ok(OperationResult::Inserted)
            }
            (Structure::Graph(g), Operation::RemoveVertex { value }) => {
                if g.is_empty() {
                    return Err(empty);
                }
                if g.remove_vertex(value) {
                    Ok(OperationResult::Removed(value.clone()))
                } else {
                    Ok(OperationResult::Absent)
                }
            }
            (Structure::Graph(g), Operation::AddEdge { from, to }) => {
                g.add_edge(from.clone(), to.clone());
                Ok(OperationResult::Inserted)
            }
            (_, op) => Err(PuzzleError::WrongStructure {
                op: op.kind(),
                structure: kind,
            }),
        }
    }
}
