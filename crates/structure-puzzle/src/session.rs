//! One attempt at one level.
//!
//! A [`PuzzleSession`] owns the live structure and the target structure,
//! counts accepted moves, and decides when the attempt is won or lost.
//! Every clock-dependent method has an `_at` form taking the current
//! [`Instant`], so callers decide where time comes from.

use std::time::Instant;

use log::{debug, info};
use serde::Serialize;
use smallvec::{smallvec, SmallVec};

use crate::element::Element;
use crate::error::PuzzleError;
use crate::operation::{Operation, OperationKind, OperationResult};
use crate::puzzle::{Level, StructureKind};
use crate::scoring::{format_time, ScoringRules};
use crate::solver::{find_solution_from, SolverConfig};
use crate::structures::Structure;

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        self != SessionStatus::Active
    }
}

/// Read-only view of a session for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub structure: StructureKind,
    pub level: u32,
    pub current: Vec<Element>,
    pub target: Vec<Element>,
    pub moves: u32,
    pub moves_remaining: u32,
    pub hints: u32,
    pub elapsed_secs: u64,
    pub status: SessionStatus,
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    StateChanged { snapshot: Snapshot },
    #[serde(rename_all = "camelCase")]
    Won {
        score: u32,
        moves: u32,
        elapsed_secs: u64,
    },
    Lost { reason: String },
}

/// Outcome of one requested operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Whether the move counted
    pub accepted: bool,
    pub result: OperationResult,
    pub status: SessionStatus,
    pub events: SmallVec<[SessionEvent; 2]>,
}

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    level: Level,
    current: Structure,
    target: Structure,
    target_export: Vec<Element>,
    moves: u32,
    hints: u32,
    started: Instant,
    finished: Option<Instant>,
    status: SessionStatus,
    score: Option<u32>,
    rules: ScoringRules,
}

impl PuzzleSession {
    pub fn start(level: &Level) -> Self {
        Self::start_at(level, Instant::now())
    }

    /// Build both structures from the level and start the clock at `now`
    pub fn start_at(level: &Level, now: Instant) -> Self {
        let current = Structure::from_elements(level.structure, &level.initial);
        let target = Structure::from_elements(level.structure, &level.target);
        let target_export = target.export();
        debug!(
            "Starting {} level {} ({}): {} -> {}",
            level.structure,
            level.id,
            level.name,
            format_elements(&current.export()),
            format_elements(&target_export)
        );
        Self {
            level: level.clone(),
            current,
            target,
            target_export,
            moves: 0,
            hints: 0,
            started: now,
            finished: None,
            status: SessionStatus::Active,
            score: None,
            rules: ScoringRules::default(),
        }
    }

    /// Use custom scoring constants
    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn current(&self) -> &Structure {
        &self.current
    }

    pub fn target(&self) -> &Structure {
        &self.target
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn hints(&self) -> u32 {
        self.hints
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Final score, once the session has finished
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Moves left before the budget runs out
    pub fn moves_remaining(&self) -> u32 {
        self.level.max_moves.saturating_sub(self.moves)
    }

    /// Whole seconds since the start, frozen once the session finishes
    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        self.finished
            .unwrap_or(now)
            .saturating_duration_since(self.started)
            .as_secs()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> Snapshot {
        Snapshot {
            structure: self.level.structure,
            level: self.level.id,
            current: self.current.export(),
            target: self.target_export.clone(),
            moves: self.moves,
            moves_remaining: self.moves_remaining(),
            hints: self.hints,
            elapsed_secs: self.elapsed_secs_at(now),
            status: self.status,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn apply(&mut self, op: &Operation) -> Result<MoveReport, PuzzleError> {
        self.apply_at(op, Instant::now())
    }

    /// Apply an operation to the live structure.
    ///
    /// Illegal operations are rejected with an error. An operation with
    /// nothing to act on is reported as not accepted and costs no move.
    pub fn apply_at(&mut self, op: &Operation, now: Instant) -> Result<MoveReport, PuzzleError> {
        self.check_playable(op.kind())?;

        let result = match self.current.apply(op) {
            Ok(result) => result,
            Err(PuzzleError::EmptyStructure(_)) => {
                debug!("{op}: nothing to act on");
                return Ok(MoveReport {
                    accepted: false,
                    result: OperationResult::Empty,
                    status: self.status,
                    events: SmallVec::new(),
                });
            }
            Err(e) => return Err(e),
        };

        self.moves += 1;
        debug!(
            "Move {}/{}: {op} -> {}",
            self.moves,
            self.level.max_moves,
            format_elements(&self.current.export())
        );

        let mut events: SmallVec<[SessionEvent; 2]> = smallvec![];

        if self.current.export() == self.target_export {
            // A win on the move that overruns the budget still counts
            self.finish(SessionStatus::Won, now);
            events.push(SessionEvent::StateChanged {
                snapshot: self.snapshot_at(now),
            });
            events.push(SessionEvent::Won {
                score: self.score.unwrap_or(0),
                moves: self.moves,
                elapsed_secs: self.elapsed_secs_at(now),
            });
        } else if self.moves > self.level.max_moves {
            self.finish(SessionStatus::Lost, now);
            events.push(SessionEvent::StateChanged {
                snapshot: self.snapshot_at(now),
            });
            events.push(SessionEvent::Lost {
                reason: format!("ran out of moves ({} allowed)", self.level.max_moves),
            });
        } else {
            events.push(SessionEvent::StateChanged {
                snapshot: self.snapshot_at(now),
            });
        }

        Ok(MoveReport {
            accepted: true,
            result,
            status: self.status,
            events,
        })
    }

    /// Build an operation from raw player replies and apply it.
    ///
    /// Legality is checked before the replies are parsed.
    pub fn apply_inputs_at(
        &mut self,
        kind: OperationKind,
        inputs: &[Option<&str>],
        now: Instant,
    ) -> Result<MoveReport, PuzzleError> {
        self.check_playable(kind)?;
        let op = Operation::from_inputs(kind, inputs)?;
        self.apply_at(&op, now)
    }

    pub fn apply_inputs(
        &mut self,
        kind: OperationKind,
        inputs: &[Option<&str>],
    ) -> Result<MoveReport, PuzzleError> {
        self.apply_inputs_at(kind, inputs, Instant::now())
    }

    /// Count a hint and suggest the next move of a shortest win.
    ///
    /// Returns `Ok(None)` when the solver finds no win within the remaining
    /// budget. The hint is charged either way.
    pub fn request_hint(&mut self, config: &SolverConfig) -> Result<Option<Operation>, PuzzleError> {
        if self.status.is_finished() {
            return Err(PuzzleError::SessionFinished);
        }
        self.hints += 1;

        let result = find_solution_from(&self.level, &self.current, self.moves, config);
        let hint = result.solution.and_then(|moves| moves.into_iter().next());
        match &hint {
            Some(op) => debug!("Hint {}: {op}", self.hints),
            None => debug!("Hint {}: no win found", self.hints),
        }
        Ok(hint)
    }

    fn check_playable(&self, kind: OperationKind) -> Result<(), PuzzleError> {
        if self.status.is_finished() {
            return Err(PuzzleError::SessionFinished);
        }
        if !self.level.allows(kind) {
            return Err(PuzzleError::IllegalOperation {
                op: kind,
                structure: self.level.structure,
                level: self.level.id,
            });
        }
        Ok(())
    }

    fn finish(&mut self, status: SessionStatus, now: Instant) {
        self.status = status;
        self.finished = Some(now);
        let elapsed = self.elapsed_secs_at(now);
        let score = self.rules.score(
            status == SessionStatus::Won,
            self.level.max_moves,
            self.moves,
            elapsed,
            self.hints,
        );
        self.score = Some(score);
        info!(
            "{} level {} {:?} in {} moves, {}, score {score}",
            self.level.structure,
            self.level.id,
            status,
            self.moves,
            format_time(elapsed)
        );
    }
}

fn format_elements(elements: &[Element]) -> String {
    let items: Vec<String> = elements.iter().map(Element::to_string).collect();
    format!("[{}]", items.join(", "))
}
