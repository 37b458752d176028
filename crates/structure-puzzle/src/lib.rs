//! Puzzle engine for data-structure transformation levels.
//!
//! A level gives an initial stack, queue, linked list, binary search tree or
//! graph, a target, a set of legal operations and a move budget. This crate
//! holds the structures, the level catalog, the session state machine that
//! counts moves and decides wins and losses, the scoring policy, and a
//! bounded solver used for hints and catalog verification.

pub mod catalog;
pub mod element;
pub mod error;
pub mod game;
pub mod operation;
pub mod progress;
pub mod pruning;
pub mod puzzle;
pub mod scoring;
pub mod session;
pub mod solver;
pub mod structures;

// Re-export main types
pub use catalog::Catalog;
pub use element::Element;
pub use error::{CatalogError, PuzzleError};
pub use game::Game;
pub use operation::{InputSlot, MoveRequest, Operation, OperationKind, OperationResult};
pub use progress::{LevelProgress, ProgressBook, ProgressSummary};
pub use puzzle::{Difficulty, Level, StructureKind};
pub use scoring::{calculate_score, format_time, ScoringRules};
pub use session::{MoveReport, PuzzleSession, SessionEvent, SessionStatus, Snapshot};
pub use solver::{find_solution, find_solution_from, SolverConfig, SolverResult};
pub use structures::Structure;
