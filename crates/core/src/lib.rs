//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and persistence
//! plumbing for a 2048-style sliding-tile puzzle. It has **no dependencies** on
//! terminal rendering or input handling, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: The engine is a pure function over a `Copy`-sized grid
//! - **Portable**: Can run behind any front end (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`tile`]: One cell's value plus per-turn animation metadata (`merged`, `is_new`, id)
//! - [`grid`]: 4x4 row-major playfield that also mints tile ids
//! - [`engine`]: Slide + merge transformation for one direction, with score gained
//! - [`spawn`]: Random 2/4 placement into an empty cell
//! - [`session`]: Turn protocol, win/lose state machine, persistence round-trip
//! - [`snapshot`]: Persisted session record and its JSON encoding
//! - [`store`]: Narrow persistence port with file and in-memory stores
//! - [`config`]: Session configuration (win target, seed, opening)
//!
//! # Game Rules
//!
//! - **Moves**: Tiles slide toward one edge; equal neighbours merge once per move
//! - **Score**: Each merge adds the merged tile's value
//! - **Spawn**: After a move that changed the grid, a 2 (90%) or 4 (10%) appears
//! - **Win**: Score reaching the target (2048 by default)
//! - **Loss**: A move attempted on a full grid that no direction can change
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameSession, MemoryStore, SessionConfig};
//! use tui_2048_core::types::{Direction, GameAction, SessionState};
//!
//! let config = SessionConfig::default().with_seed(12345);
//! let mut game = GameSession::new(&config, MemoryStore::new());
//!
//! // The fixed opening has a 2 at (0, 0) and a 2 at (2, 3).
//! let outcome = game.apply_action(GameAction::Move(Direction::Down));
//! assert!(outcome.moved);
//! assert_eq!(game.tiles().count(), 3);
//! assert_eq!(game.state(), SessionState::Active);
//! ```

pub mod config;
pub mod engine;
pub mod grid;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod store;
pub mod tile;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use config::SessionConfig;
pub use engine::{can_move, transform, Transformed};
pub use grid::Grid;
pub use session::{GameSession, TurnOutcome};
pub use snapshot::{SessionSnapshot, SnapshotError};
pub use spawn::{spawn, Spawn};
pub use store::{FileStore, MemoryStore, SessionStore, StoreError, STORAGE_KEY};
pub use tile::{Tile, TileId};
