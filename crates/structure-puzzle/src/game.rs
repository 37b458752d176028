//! Explicit game context: the level being played and the player's progress.
//!
//! A [`Game`] is idle until a level is selected. It then holds exactly one
//! [`PuzzleSession`]; resetting, replaying and moving on all start a fresh
//! one. Finished sessions are folded into the [`ProgressBook`] once.

use std::time::Instant;

use log::debug;

use crate::catalog::Catalog;
use crate::error::PuzzleError;
use crate::operation::{Operation, OperationKind};
use crate::progress::ProgressBook;
use crate::puzzle::StructureKind;
use crate::scoring::ScoringRules;
use crate::session::{MoveReport, PuzzleSession, SessionStatus, Snapshot};
use crate::solver::SolverConfig;

pub struct Game<'a> {
    catalog: &'a Catalog,
    session: Option<PuzzleSession>,
    /// Whether the current session's result is already in the book
    recorded: bool,
    progress: ProgressBook,
    rules: ScoringRules,
    solver: SolverConfig,
}

impl<'a> Game<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            session: None,
            recorded: false,
            progress: ProgressBook::new(),
            rules: ScoringRules::default(),
            solver: SolverConfig::default(),
        }
    }

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Continue from previously saved progress
    pub fn with_progress(mut self, progress: ProgressBook) -> Self {
        self.progress = progress;
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn session(&self) -> Option<&PuzzleSession> {
        self.session.as_ref()
    }

    pub fn progress(&self) -> &ProgressBook {
        &self.progress
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    pub fn select_level(
        &mut self,
        structure: StructureKind,
        id: u32,
    ) -> Result<&PuzzleSession, PuzzleError> {
        self.select_level_at(structure, id, Instant::now())
    }

    /// Start a session on a catalog level, replacing any current one
    pub fn select_level_at(
        &mut self,
        structure: StructureKind,
        id: u32,
        now: Instant,
    ) -> Result<&PuzzleSession, PuzzleError> {
        let catalog = self.catalog;
        let level = catalog
            .level(structure, id)
            .ok_or(PuzzleError::LevelNotFound { structure, id })?;
        let session = PuzzleSession::start_at(level, now).with_rules(self.rules);
        self.recorded = false;
        Ok(self.session.insert(session))
    }

    pub fn apply_operation(
        &mut self,
        kind: OperationKind,
        inputs: &[Option<&str>],
    ) -> Result<MoveReport, PuzzleError> {
        self.apply_operation_at(kind, inputs, Instant::now())
    }

    /// Apply a move described by raw player replies
    pub fn apply_operation_at(
        &mut self,
        kind: OperationKind,
        inputs: &[Option<&str>],
        now: Instant,
    ) -> Result<MoveReport, PuzzleError> {
        let session = self.session.as_mut().ok_or(PuzzleError::NoActiveSession)?;
        let report = session.apply_inputs_at(kind, inputs, now)?;
        self.record_if_finished(now);
        Ok(report)
    }

    /// Apply a move named as in level files, such as `"addVertex"`.
    ///
    /// An unknown name is rejected like any other invalid move and leaves
    /// the session untouched.
    pub fn apply_named(
        &mut self,
        op: &str,
        inputs: &[Option<&str>],
    ) -> Result<MoveReport, PuzzleError> {
        self.apply_named_at(op, inputs, Instant::now())
    }

    pub fn apply_named_at(
        &mut self,
        op: &str,
        inputs: &[Option<&str>],
        now: Instant,
    ) -> Result<MoveReport, PuzzleError> {
        if self.session.is_none() {
            return Err(PuzzleError::NoActiveSession);
        }
        let kind: OperationKind = op.parse()?;
        self.apply_operation_at(kind, inputs, now)
    }

    pub fn apply(&mut self, op: &Operation) -> Result<MoveReport, PuzzleError> {
        self.apply_at(op, Instant::now())
    }

    pub fn apply_at(&mut self, op: &Operation, now: Instant) -> Result<MoveReport, PuzzleError> {
        let session = self.session.as_mut().ok_or(PuzzleError::NoActiveSession)?;
        let report = session.apply_at(op, now)?;
        self.record_if_finished(now);
        Ok(report)
    }

    pub fn request_hint(&mut self) -> Result<Option<Operation>, PuzzleError> {
        let session = self.session.as_mut().ok_or(PuzzleError::NoActiveSession)?;
        session.request_hint(&self.solver)
    }

    pub fn snapshot(&self) -> Result<Snapshot, PuzzleError> {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> Result<Snapshot, PuzzleError> {
        self.session
            .as_ref()
            .map(|s| s.snapshot_at(now))
            .ok_or(PuzzleError::NoActiveSession)
    }

    pub fn reset(&mut self) -> Result<&PuzzleSession, PuzzleError> {
        self.reset_at(Instant::now())
    }

    /// Start the current level over, whether or not it has finished.
    ///
    /// This is also how a won or lost level is replayed.
    pub fn reset_at(&mut self, now: Instant) -> Result<&PuzzleSession, PuzzleError> {
        let level = self
            .session
            .as_ref()
            .ok_or(PuzzleError::NoActiveSession)?
            .level();
        let (structure, id) = (level.structure, level.id);
        debug!("Resetting {structure} level {id}");
        self.select_level_at(structure, id, now)
    }

    pub fn next_level(&mut self) -> Result<Option<&PuzzleSession>, PuzzleError> {
        self.next_level_at(Instant::now())
    }

    /// Move on to the following level of the same structure type.
    ///
    /// Returns `Ok(None)` and leaves the current session alone after the
    /// last level.
    pub fn next_level_at(&mut self, now: Instant) -> Result<Option<&PuzzleSession>, PuzzleError> {
        let level = self
            .session
            .as_ref()
            .ok_or(PuzzleError::NoActiveSession)?
            .level();
        let (structure, id) = (level.structure, level.id);
        let catalog = self.catalog;
        let Some(next) = catalog.next_level(structure, id) else {
            return Ok(None);
        };
        self.select_level_at(structure, next.id, now).map(Some)
    }

    /// Drop the current session without recording it
    pub fn abandon(&mut self) -> Option<PuzzleSession> {
        self.recorded = false;
        self.session.take()
    }

    fn record_if_finished(&mut self, now: Instant) {
        if self.recorded {
            return;
        }
        let Some(session) = &self.session else {
            return;
        };
        if !session.status().is_finished() {
            return;
        }
        let level = session.level();
        let progress = self.progress.record(
            level.structure,
            level.id,
            session.status() == SessionStatus::Won,
            session.score().unwrap_or(0),
            session.elapsed_secs_at(now),
            session.moves(),
        );
        debug!(
            "{} level {}: best score {}, {} attempts",
            level.structure, level.id, progress.best_score, progress.attempts
        );
        self.recorded = true;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_idle_until_selected() {
        let mut game = Game::new(Catalog::builtin());
        assert!(game.is_idle());
        assert_eq!(game.snapshot(), Err(PuzzleError::NoActiveSession));
        assert_eq!(
            game.apply(&Operation::Pop).unwrap_err(),
            PuzzleError::NoActiveSession
        );
        assert_eq!(game.request_hint(), Err(PuzzleError::NoActiveSession));
        assert!(game.reset().is_err());
    }

    #[test]
    fn test_unknown_level() {
        let mut game = Game::new(Catalog::builtin());
        let err = game.select_level(StructureKind::Queue, 31).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::LevelNotFound {
                structure: StructureKind::Queue,
                id: 31
            }
        );
        assert!(game.is_idle());
    }

    #[test]
    fn test_win_is_recorded_once() {
        let start = Instant::now();
        let mut game = Game::new(Catalog::builtin());
        game.select_level_at(StructureKind::Stack, 1, start).unwrap();

        let report = game
            .apply_operation_at(OperationKind::Push, &[Some("A")], start + Duration::from_secs(5))
            .unwrap();
        assert_eq!(report.status, SessionStatus::Won);

        // Rejected follow-ups must not be recorded again
        assert!(game.apply_operation(OperationKind::Push, &[Some("B")]).is_err());

        let progress = game.progress().get(StructureKind::Stack, 1).unwrap();
        assert!(progress.completed);
        // 50 + 10*2 + 2*25
        assert_eq!(progress.best_score, 120);
        assert_eq!(progress.best_time_secs, Some(5));
        assert_eq!(progress.attempts, 1);
    }

    #[test]
    fn test_reset_starts_fresh() {
        let mut game = Game::new(Catalog::builtin());
        game.select_level(StructureKind::Stack, 23).unwrap();
        game.apply(&Operation::Pop).unwrap();
        assert_eq!(game.snapshot().unwrap().moves, 1);

        let session = game.reset().unwrap();
        assert_eq!(session.moves(), 0);
        assert_eq!(session.level().id, 23);
        assert!(game.progress().is_empty());
    }

    #[test]
    fn test_next_level() {
        let mut game = Game::new(Catalog::builtin());
        game.select_level(StructureKind::Graph, 29).unwrap();
        let next = game.next_level().unwrap().unwrap();
        assert_eq!(next.level().id, 30);

        assert!(game.next_level().unwrap().is_none());
        assert_eq!(game.session().unwrap().level().id, 30);
    }

    #[test]
    fn test_abandon_returns_to_idle() {
        let mut game = Game::new(Catalog::builtin());
        game.select_level(StructureKind::Tree, 2).unwrap();
        let abandoned = game.abandon().unwrap();
        assert_eq!(abandoned.level().name, "Simple Search");
        assert!(game.is_idle());
        assert!(game.progress().is_empty());
    }

    #[test]
    fn test_hint_through_game() {
        let mut game = Game::new(Catalog::builtin());
        game.select_level(StructureKind::Queue, 1).unwrap();
        let hint = game.request_hint().unwrap();
        assert_eq!(hint.map(|op| op.kind()), Some(OperationKind::Enqueue));
        assert_eq!(game.snapshot().unwrap().hints, 1);
    }

    #[test]
    fn test_unknown_operation_name_is_rejected() {
        let mut game = Game::new(Catalog::builtin());
        assert_eq!(
            game.apply_named("push", &[Some("A")]).unwrap_err(),
            PuzzleError::NoActiveSession
        );

        game.select_level(StructureKind::Stack, 1).unwrap();
        assert_eq!(
            game.apply_named("peek", &[]).unwrap_err(),
            PuzzleError::UnknownOperation("peek".to_string())
        );
        assert_eq!(game.snapshot().unwrap().moves, 0);

        let report = game.apply_named("push", &[Some("A")]).unwrap();
        assert_eq!(report.status, SessionStatus::Won);
    }

    #[test]
    fn test_padded_numbers_do_not_match_target() {
        // Stack level 8 builds 1, 2, 3 with pushes only
        let mut game = Game::new(Catalog::builtin());
        game.select_level(StructureKind::Stack, 8).unwrap();
        for value in ["01", "+2", "03"] {
            game.apply_named("push", &[Some(value)]).unwrap();
        }
        assert_eq!(game.session().unwrap().status(), SessionStatus::Active);

        game.reset().unwrap();
        for value in ["1", "2", " 3 "] {
            game.apply_named("push", &[Some(value)]).unwrap();
        }
        assert_eq!(game.session().unwrap().status(), SessionStatus::Won);
    }

    #[test]
    fn test_solver_config_limits_hints() {
        let starved = SolverConfig {
            max_states: 0,
            ..SolverConfig::default()
        };
        let mut game = Game::new(Catalog::builtin()).with_solver_config(starved);
        game.select_level(StructureKind::Queue, 1).unwrap();
        assert_eq!(game.request_hint(), Ok(None));
        assert_eq!(game.snapshot().unwrap().hints, 1);
    }

    #[test]
    fn test_resume_saved_progress() {
        let mut first = Game::new(Catalog::builtin());
        first.select_level(StructureKind::Stack, 1).unwrap();
        first.apply_named("push", &[Some("A")]).unwrap();
        let saved = serde_json::to_string(first.progress()).unwrap();

        let restored: ProgressBook = serde_json::from_str(&saved).unwrap();
        let mut game = Game::new(Catalog::builtin()).with_progress(restored);
        assert!(game.progress().is_completed(StructureKind::Stack, 1));

        game.select_level(StructureKind::Stack, 1).unwrap();
        for value in ["X", "Y", "Z", "W"] {
            game.apply_named("push", &[Some(value)]).unwrap();
        }
        let progress = game.progress().get(StructureKind::Stack, 1).unwrap();
        assert!(progress.completed);
        assert_eq!(progress.attempts, 2);
        assert_eq!(game.progress().summary().levels_completed, 1);
    }

    #[test]
    fn test_loss_is_recorded() {
        let mut game = Game::new(Catalog::builtin());
        game.select_level(StructureKind::Stack, 1).unwrap();
        for value in ["X", "Y", "Z", "W"] {
            game.apply_operation(OperationKind::Push, &[Some(value)])
                .unwrap();
        }
        assert_eq!(game.session().unwrap().status(), SessionStatus::Lost);
        let progress = game.progress().get(StructureKind::Stack, 1).unwrap();
        assert!(!progress.completed);
        assert_eq!(progress.attempts, 1);
    }
}
