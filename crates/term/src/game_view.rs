//! GameView: maps a session snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{SessionSnapshot, Tile};
use crate::fb::{decimal_width, CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, SessionState, GRID_SIZE};

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);
const GOLD: Rgb = Rgb::new(237, 194, 46);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Presentation state that is not part of the saved session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudView {
    pub win_target: u32,
    /// Lit for a short while after the win event.
    pub celebrating: bool,
}

impl HudView {
    pub fn new(win_target: u32) -> Self {
        Self {
            win_target,
            celebrating: false,
        }
    }

    pub fn celebrating(mut self, on: bool) -> Self {
        self.celebrating = on;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the 4x4 board.
pub struct GameView {
    /// Tile cell width in terminal columns, including a one-column gap.
    cell_w: u16,
    /// Tile cell height in terminal rows, including a one-row gap.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 6,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(2),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Board frame size in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        let n = GRID_SIZE as u16;
        (n * self.cell_w + 1 + 2, n * self.cell_h + 1 + 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        hud: &HudView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(LIGHT_TEXT, SCREEN_BG).cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = if hud.celebrating {
            CellStyle::new(GOLD, SCREEN_BG).bold()
        } else {
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG)
        };

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(DARK_TEXT, BOARD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for index in 0..GRID_SIZE * GRID_SIZE {
            let position = Position::from_index(index);
            match snap.grid.get(position) {
                Some(tile) if !tile.is_empty() => self.draw_tile(fb, start_x, start_y, tile),
                _ => self.draw_empty(fb, start_x, start_y, position),
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, start_x, start_y, frame_w);

        match snap.state {
            SessionState::Won => {
                draw_overlay(fb, start_x, start_y, frame_w, frame_h, "YOU WIN!", GOLD)
            }
            SessionState::Lost => draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                "GAME OVER",
                Rgb::new(255, 255, 255),
            ),
            SessionState::Active => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, hud: &HudView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Top-left corner of the tile body at `position`.
    fn body_origin(&self, start_x: u16, start_y: u16, position: Position) -> (u16, u16) {
        (
            start_x + 2 + position.col as u16 * self.cell_w,
            start_y + 2 + position.row as u16 * self.cell_h,
        )
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, tile: &Tile) {
        let (x, y) = self.body_origin(start_x, start_y, tile.position());
        let (body_w, body_h) = (self.cell_w - 1, self.cell_h - 1);

        let mut style = tile_style(tile.value());
        if tile.merged() {
            style = style.bold();
        }
        if tile.is_new() {
            style = style.dim();
        }
        fb.fill_rect(x, y, body_w, body_h, ' ', style);

        let text_w = decimal_width(tile.value());
        let tx = x + body_w.saturating_sub(text_w) / 2;
        let ty = y + (body_h - 1) / 2;
        fb.put_u32(tx, ty, tile.value(), style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, position: Position) {
        let (x, y) = self.body_origin(start_x, start_y, position);
        let (body_w, body_h) = (self.cell_w - 1, self.cell_h - 1);
        let style = CellStyle::new(BOARD_BG, EMPTY_BG);
        fb.fill_rect(x, y, body_w, body_h, ' ', style);
        fb.put_char(x + (body_w - 1) / 2, y + (body_h - 1) / 2, '·', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        hud: &HudView,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let help = value.dim();

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("BEST", snap.grid.highest_value()),
            ("TARGET", hud.win_target),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        for line in ["←↑↓→ move", "r    restart", "q    quit"] {
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

/// Background and text colour for a tile value.
pub fn tile_style(value: u32) -> CellStyle {
    let bg = match value {
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => GOLD,
        _ => Rgb::new(60, 58, 50),
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    CellStyle::new(fg, bg)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '╭', style);
    fb.put_char(x + w - 1, y, '╮', style);
    fb.put_char(x, y + h - 1, '╰', style);
    fb.put_char(x + w - 1, y + h - 1, '╯', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
    fg: Rgb,
) {
    let banner = CellStyle::new(fg, SCREEN_BG).bold();
    let hint = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
    let mid_y = start_y.saturating_add(frame_h / 2);

    let put_centered = |fb: &mut FrameBuffer, y: u16, s: &str, style: CellStyle| {
        // One space of padding either side.
        let w = s.chars().count() as u16 + 2;
        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
        fb.put_char(x, y, ' ', style);
        let end = fb.put_str(x + 1, y, s, style);
        fb.put_char(end, y, ' ', style);
    };

    put_centered(fb, mid_y.saturating_sub(1), text, banner);
    put_centered(fb, mid_y, "r to restart", hint);
}
