//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`]s. One key press is one intent:
//! 2048 has no held-key auto-repeat, so terminal repeat events are ignored
//! by the caller.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
