//! Terminal rendering for the 2048 board.
//!
//! A small, game-oriented layer: a pure [`GameView`] draws a session snapshot
//! into a [`FrameBuffer`], and [`TerminalRenderer`] flushes framebuffers to the
//! terminal through crossterm, repainting only the cells that changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_style, AnchorY, GameView, HudView, Viewport};
pub use renderer::{changed_runs, encode_frame_into, Run, TerminalRenderer};
