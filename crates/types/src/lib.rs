//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, persistence).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 4x4 grid:
//!
//! - **Rows**: 4 (indexed 0-3, top to bottom)
//! - **Columns**: 4 (indexed 0-3, left to right)
//! - **Storage**: row-major, `row * GRID_SIZE + col`
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Rows and columns of the grid |
//! | `DEFAULT_WIN_TARGET` | 2048 | Score that wins the session |
//! | `SPAWN_LOW_VALUE` | 2 | Usual spawned tile |
//! | `SPAWN_HIGH_VALUE` | 4 | Occasional spawned tile |
//! | `SPAWN_HIGH_PROBABILITY` | 0.1 | Chance that a spawn is a 4 |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, SessionState, GRID_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! assert_eq!(Direction::from_str("Left"), Some(Direction::Left));
//!
//! // Mirror a direction
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//!
//! // Parse a game action
//! let action = GameAction::from_str("moveUp").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Up));
//!
//! // Wire names of the session state
//! assert_eq!(SessionState::Won.as_str(), "win");
//!
//! assert_eq!(GRID_SIZE, 4);
//! ```

/// Grid width and height in cells (4x4)
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Score at which a session is won unless configured otherwise
pub const DEFAULT_WIN_TARGET: u32 = 2048;

/// Value of the common spawned tile
pub const SPAWN_LOW_VALUE: u32 = 2;

/// Value of the rare spawned tile
pub const SPAWN_HIGH_VALUE: u32 = 4;

/// Probability that a spawned tile is [`SPAWN_HIGH_VALUE`]
pub const SPAWN_HIGH_PROBABILITY: f64 = 0.1;

/// A cell coordinate on the grid.
///
/// Both components are in `0..GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index into a flat `CELL_COUNT` array
    #[inline(always)]
    pub const fn index(self) -> usize {
        (self.row as usize) * GRID_SIZE + (self.col as usize)
    }

    /// Inverse of [`Position::index`]
    ///
    /// ```
    /// use tui_2048_types::Position;
    ///
    /// assert_eq!(Position::from_index(6), Position::new(1, 2));
    /// assert_eq!(Position::new(3, 3).index(), 15);
    /// ```
    #[inline(always)]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / GRID_SIZE) as u8,
            col: (index % GRID_SIZE) as u8,
        }
    }

    /// Same cell with row and column swapped
    pub const fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }
}

/// Move directions
///
/// LEFT/RIGHT travel along rows, UP/DOWN travel along columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "left" | "l", "right" | "r",
    /// "up" | "u", "down" | "d"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// The mirror direction
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Down.opposite(), Direction::Up);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// True for UP/DOWN, which operate on columns
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True when tiles travel toward index 0 of their line (LEFT, UP)
    pub fn toward_start(&self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

/// Intents the session accepts, independent of their origin
/// (keyboard, gesture, or programmatic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile toward one edge
    Move(Direction),
    /// Discard the current session and start over
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::Move(Direction::Left)),
            "moveright" => Some(GameAction::Move(Direction::Right)),
            "moveup" => Some(GameAction::Move(Direction::Up)),
            "movedown" => Some(GameAction::Move(Direction::Down)),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Restart => "restart",
        }
    }
}

/// Lifecycle of a session
///
/// - **Active**: accepting moves
/// - **Won**: score reached the win target; sticky until restart
/// - **Lost**: no empty cell was left for a spawn; sticky until restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Active,
    Won,
    Lost,
}

impl SessionState {
    /// Parse from the persisted wire name
    ///
    /// `"intialized"` is misspelled on purpose: saved sessions use it.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "intialized" => Some(SessionState::Active),
            "win" => Some(SessionState::Won),
            "lose" => Some(SessionState::Lost),
            _ => None,
        }
    }

    /// Persisted wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Active => "intialized",
            SessionState::Won => "win",
            SessionState::Lost => "lose",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Active)
    }
}

/// Core-side event emitted by a turn.
///
/// Presentation layers use it to trigger one-shot effects (win celebration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session just transitioned into [`SessionState::Won`]
    Won,
    /// The session just transitioned into [`SessionState::Lost`]
    Lost,
    /// The session was reset by [`GameAction::Restart`]
    Restarted,
}
