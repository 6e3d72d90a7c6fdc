//! Game session module - owns the grid and runs the turn protocol
//!
//! The session is the only mutator of the current grid. Each accepted
//! directional input runs to completion before the next one is looked at:
//!
//! 1. [`transform`] the grid in the requested direction.
//! 2. If nothing moved or merged, the input is a no-op: no spawn, no score,
//!    no save. The one exception is a full grid that no direction can change:
//!    the spawn policy has nowhere to go, which ends the session as
//!    [`SessionState::Lost`].
//! 3. Otherwise add the merge score, [`spawn`] a tile, adopt the new grid,
//!    check for a win (`score >= win_target`) and save a snapshot.
//!
//! `Won` and `Lost` are sticky; only [`GameAction::Restart`] leaves them.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SessionConfig;
use crate::engine::{can_move, transform, Transformed};
use crate::grid::Grid;
use crate::snapshot::SessionSnapshot;
use crate::spawn::{spawn, Spawn};
use crate::store::SessionStore;
use crate::tile::Tile;
use crate::types::{Direction, GameAction, SessionEvent, SessionState};

/// What a single action did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnOutcome {
    /// The grid changed as a result of a move
    pub moved: bool,
    pub score_gained: u32,
    /// Set on transitions only; `Won` fires once per win
    pub event: Option<SessionEvent>,
}

impl TurnOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn with_event(event: SessionEvent) -> Self {
        Self {
            event: Some(event),
            ..Self::default()
        }
    }
}

/// A running game bound to a persistence store
#[derive(Debug)]
pub struct GameSession<S: SessionStore> {
    grid: Grid,
    score: u32,
    state: SessionState,
    win_target: u32,
    random_opening: bool,
    rng: StdRng,
    store: S,
    /// Accepted turns since this process started the session
    turns: u64,
}

impl<S: SessionStore> GameSession<S> {
    /// Resume the session saved in `store`, or start a fresh one
    pub fn new(config: &SessionConfig, store: S) -> Self {
        let mut session = Self::blank(config, store);
        match session.store.load() {
            Some(snap) => {
                info!(
                    "resumed session: score {}, state {}",
                    snap.score,
                    snap.state.as_str()
                );
                session.grid = snap.grid;
                session.score = snap.score;
                session.state = snap.state;
            }
            None => session.start_over(),
        }
        session
    }

    /// Start a fresh session, overwriting whatever `store` holds
    pub fn fresh(config: &SessionConfig, store: S) -> Self {
        let mut session = Self::blank(config, store);
        session.start_over();
        session
    }

    fn blank(config: &SessionConfig, store: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            grid: Grid::empty(),
            score: 0,
            state: SessionState::Active,
            win_target: config.win_target,
            random_opening: config.random_opening,
            rng,
            store,
            turns: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Non-empty tiles with their animation metadata
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.grid.tiles()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn win_target(&self) -> u32 {
        self.win_target
    }

    pub fn best_tile(&self) -> u32 {
        self.grid.highest_value()
    }

    /// Whether any direction would still change the grid
    pub fn can_move(&self) -> bool {
        can_move(&self.grid)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid.clone(),
            score: self.score,
            state: self.state,
        }
    }

    /// Apply one input
    pub fn apply_action(&mut self, action: GameAction) -> TurnOutcome {
        match action {
            GameAction::Move(direction) => self.play(direction),
            GameAction::Restart => {
                info!("restart requested at score {}", self.score);
                self.start_over();
                TurnOutcome::with_event(SessionEvent::Restarted)
            }
        }
    }

    fn play(&mut self, direction: Direction) -> TurnOutcome {
        if self.state != SessionState::Active {
            return TurnOutcome::ignored();
        }

        let Transformed {
            grid: candidate,
            score_gained,
        } = transform(&self.grid, direction);

        if candidate == self.grid {
            if self.grid.is_full() && !can_move(&self.grid) {
                return self.finish_lost();
            }
            return TurnOutcome::ignored();
        }

        self.turns += 1;
        self.score = self.score.saturating_add(score_gained);

        let mut lost = false;
        match spawn(candidate.clone(), &mut self.rng) {
            Spawn::Placed { grid, .. } => self.grid = grid,
            Spawn::NoEmptyCell => {
                self.grid = candidate;
                lost = true;
            }
        }

        debug!(
            "turn {}: {} gained {}, score {}",
            self.turns,
            direction.as_str(),
            score_gained,
            self.score
        );

        let event = if self.score >= self.win_target {
            info!("won with score {} (target {})", self.score, self.win_target);
            self.state = SessionState::Won;
            Some(SessionEvent::Won)
        } else if lost {
            info!("lost with score {}", self.score);
            self.state = SessionState::Lost;
            Some(SessionEvent::Lost)
        } else {
            None
        };

        self.persist();

        TurnOutcome {
            moved: true,
            score_gained,
            event,
        }
    }

    fn finish_lost(&mut self) -> TurnOutcome {
        info!("no empty cell left, lost with score {}", self.score);
        self.state = SessionState::Lost;
        self.persist();
        TurnOutcome::with_event(SessionEvent::Lost)
    }

    fn start_over(&mut self) {
        self.grid = self.opening_grid();
        self.score = 0;
        self.state = SessionState::Active;
        self.turns = 0;
        info!("new session (target {})", self.win_target);
        self.persist();
    }

    fn opening_grid(&mut self) -> Grid {
        if !self.random_opening {
            return Grid::opening();
        }
        let mut grid = Grid::empty();
        for _ in 0..2 {
            if let Spawn::Placed { grid: next, .. } = spawn(grid.clone(), &mut self.rng) {
                grid = next;
            }
        }
        grid
    }

    /// Best effort: a failed save is logged and play continues
    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&snapshot) {
            warn!("failed to save session: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use crate::types::Position;

    fn config() -> SessionConfig {
        SessionConfig::default().with_seed(7)
    }

    fn session_with(grid: Grid, score: u32) -> GameSession<MemoryStore> {
        let snap = SessionSnapshot {
            grid,
            score,
            state: SessionState::Active,
        };
        let raw = snap.to_json().unwrap();
        GameSession::new(&config(), MemoryStore::with_raw(raw))
    }

    #[test]
    fn fresh_session_uses_fixed_opening_and_saves() {
        let session = GameSession::new(&config(), MemoryStore::new());
        assert_eq!(session.score(), 0);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.grid(), &Grid::opening());
        assert_eq!(session.store().writes(), 1);
    }

    #[test]
    fn random_opening_places_two_tiles() {
        let cfg = SessionConfig {
            random_opening: true,
            ..config()
        };
        let session = GameSession::fresh(&cfg, MemoryStore::new());
        assert_eq!(session.tiles().count(), 2);
    }

    #[test]
    fn accepted_move_spawns_scores_and_saves() {
        let mut session = session_with(
            Grid::from_values([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]),
            0,
        );
        let writes = session.store().writes();

        let outcome = session.apply_action(GameAction::Move(Direction::Left));
        assert!(outcome.moved);
        assert_eq!(outcome.score_gained, 4);
        assert_eq!(outcome.event, None);
        assert_eq!(session.score(), 4);
        assert_eq!(session.tiles().count(), 2);
        assert_eq!(session.tiles().filter(|t| t.is_new()).count(), 1);
        assert_eq!(session.grid().get(Position::new(0, 0)).unwrap().value(), 4);
        assert_eq!(session.store().writes(), writes + 1);
        assert_eq!(session.turns, 1);
    }

    #[test]
    fn no_op_move_changes_nothing() {
        let mut session = session_with(
            Grid::from_values([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]),
            10,
        );
        let before = session.snapshot();
        let raw = session.store().raw().map(str::to_string);
        let writes = session.store().writes();

        let outcome = session.apply_action(GameAction::Move(Direction::Left));
        assert_eq!(outcome, TurnOutcome::default());
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.store().writes(), writes);
        assert_eq!(session.store().raw().map(str::to_string), raw);
    }

    #[test]
    fn reaching_target_wins_once_and_sticks() {
        let cfg = config().with_win_target(2048);
        let grid = Grid::from_values([[1024, 1024, 0, 0], [2, 0, 0, 0], [0; 4], [0; 4]]);
        let raw = SessionSnapshot {
            grid,
            score: 100,
            state: SessionState::Active,
        }
        .to_json()
        .unwrap();
        let mut session = GameSession::new(&cfg, MemoryStore::with_raw(raw));

        let outcome = session.apply_action(GameAction::Move(Direction::Left));
        assert_eq!(outcome.event, Some(SessionEvent::Won));
        assert_eq!(session.state(), SessionState::Won);

        let frozen = session.snapshot();
        for d in Direction::ALL {
            let outcome = session.apply_action(GameAction::Move(d));
            assert_eq!(outcome.event, None);
            assert!(!outcome.moved);
        }
        assert_eq!(session.snapshot(), frozen);

        let outcome = session.apply_action(GameAction::Restart);
        assert_eq!(outcome.event, Some(SessionEvent::Restarted));
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn full_board_without_merges_is_lost() {
        let stuck = Grid::from_values([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        let mut session = session_with(stuck, 50);

        let outcome = session.apply_action(GameAction::Move(Direction::Up));
        assert_eq!(outcome.event, Some(SessionEvent::Lost));
        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(session.score(), 50);
        let saved = SessionSnapshot::from_json(session.store().raw().unwrap()).unwrap();
        assert_eq!(saved.state, SessionState::Lost);

        let outcome = session.apply_action(GameAction::Move(Direction::Down));
        assert_eq!(outcome, TurnOutcome::default());
    }

    #[test]
    fn full_board_with_merge_keeps_playing() {
        let full = Grid::from_values([
            [2, 2, 4, 8],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ]);
        let mut session = session_with(full, 0);
        let outcome = session.apply_action(GameAction::Move(Direction::Left));
        assert!(outcome.moved);
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.grid().is_full());
    }

    #[test]
    fn blocked_direction_on_mergeable_full_board_is_a_no_op() {
        let full = Grid::from_values([
            [2, 2, 4, 8],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ]);
        let mut session = session_with(full, 0);
        let raw = session.store().raw().map(str::to_string);
        let writes = session.store().writes();

        for dir in [Direction::Up, Direction::Down] {
            let outcome = session.apply_action(GameAction::Move(dir));
            assert_eq!(outcome, TurnOutcome::default());
        }
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.can_move());
        assert_eq!(session.store().writes(), writes);
        assert_eq!(session.store().raw().map(str::to_string), raw);
    }

    #[test]
    fn corrupt_save_starts_fresh() {
        let session = GameSession::new(&config(), MemoryStore::with_raw("{oops"));
        assert_eq!(session.grid(), &Grid::opening());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn saved_state_is_restored() {
        let raw = SessionSnapshot {
            grid: Grid::from_values([[8, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]),
            score: 300,
            state: SessionState::Lost,
        }
        .to_json()
        .unwrap();
        let session = GameSession::new(&config(), MemoryStore::with_raw(raw));
        assert_eq!(session.score(), 300);
        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(session.best_tile(), 8);
        assert_eq!(session.store().writes(), 0);
    }

    #[test]
    fn same_seed_replays_identically() {
        let moves = [
            Direction::Left,
            Direction::Down,
            Direction::Right,
            Direction::Up,
            Direction::Left,
            Direction::Down,
        ];
        let play = || {
            let mut s = GameSession::fresh(&config(), MemoryStore::new());
            for d in moves {
                s.apply_action(GameAction::Move(d));
            }
            s.snapshot()
        };
        assert_eq!(play(), play());
    }

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn load(&mut self) -> Option<SessionSnapshot> {
            None
        }

        fn save(&mut self, _: &SessionSnapshot) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn failed_saves_do_not_block_turns() {
        let mut session = GameSession::new(&config(), FailingStore);
        let outcome = session.apply_action(GameAction::Move(Direction::Down));
        assert!(outcome.moved);
        assert_eq!(session.tiles().count(), 3);
    }
}
