//! GameView: draws a board snapshot into a queued-command frame.
//!
//! Board cells are drawn two terminal columns wide to approximate square
//! cells. Everything here reads only the board's snapshot queries; the
//! engine never learns what a terminal is.

use anyhow::Result;

use crossterm::{
    cursor::MoveTo,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor},
    QueueableCommand,
};

use minofall_core::catalog::GRID;
use minofall_core::Board;

use crate::palette::{Palette, Rgb};
use crate::types::{ColorId, PieceKind, Rotation};

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

/// Board cell width in terminal columns (2x1 compensates glyph aspect).
const CELL_W: u16 = 2;

/// Gap between the board frame and the HUD column.
const HUD_GAP: u16 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Queue a full frame for `board` into `buf`.
    pub fn render(
        &self,
        board: &Board,
        palette: &Palette,
        viewport: Viewport,
        paused: bool,
        buf: &mut Vec<u8>,
    ) -> Result<()> {
        let cols = board.cols() as u16;
        let rows = board.rows() as u16;
        let frame_w = cols * CELL_W + 2;
        let frame_h = rows + 2;

        let hud_w = 18;
        let total_w = frame_w + HUD_GAP + hud_w;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_frame(buf, start_x, start_y, frame_w, frame_h)?;
        self.draw_cells(board, palette, buf, start_x + 1, start_y + 1)?;
        self.draw_ghost(board, palette, buf, start_x + 1, start_y + 1)?;
        self.draw_hud(board, palette, buf, start_x + frame_w + HUD_GAP, start_y)?;

        if board.game_over() {
            self.draw_banner(buf, start_x, start_y, frame_w, frame_h, " GAME OVER ")?;
        } else if paused {
            self.draw_banner(buf, start_x, start_y, frame_w, frame_h, " PAUSED ")?;
        }

        Ok(())
    }

    fn draw_frame(
        &self,
        buf: &mut Vec<u8>,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Result<()> {
        let horiz: String = "-".repeat((w - 2) as usize);
        buf.queue(ResetColor)?;
        buf.queue(MoveTo(x, y))?;
        buf.queue(Print(format!("+{}+", horiz)))?;
        for row in 1..h - 1 {
            buf.queue(MoveTo(x, y + row))?;
            buf.queue(Print("|"))?;
            buf.queue(MoveTo(x + w - 1, y + row))?;
            buf.queue(Print("|"))?;
        }
        buf.queue(MoveTo(x, y + h - 1))?;
        buf.queue(Print(format!("+{}+", horiz)))?;
        Ok(())
    }

    fn draw_cells(
        &self,
        board: &Board,
        palette: &Palette,
        buf: &mut Vec<u8>,
        x0: u16,
        y0: u16,
    ) -> Result<()> {
        for y in 0..board.rows() as i32 {
            buf.queue(MoveTo(x0, y0 + y as u16))?;
            for x in 0..board.cols() as i32 {
                let cell = board.cell(x, y).unwrap_or_default();
                let rgb = if cell.occupied {
                    palette.resolve(cell.color)
                } else {
                    palette.resolve(ColorId::EMPTY)
                };
                buf.queue(SetBackgroundColor(to_color(rgb)))?;
                buf.queue(Print("  "))?;
            }
            buf.queue(ResetColor)?;
        }
        Ok(())
    }

    /// Ghost preview at the hard-drop target, drawn only over empty cells.
    fn draw_ghost(
        &self,
        board: &Board,
        palette: &Palette,
        buf: &mut Vec<u8>,
        x0: u16,
        y0: u16,
    ) -> Result<()> {
        let Some(piece) = board.active() else {
            return Ok(());
        };
        let (gx, gy) = board.drop_target();
        let grid = board.catalog().rotation(piece.kind, piece.rotation);
        let rgb = palette.resolve(grid_color(board, piece.kind));

        for row in 0..GRID {
            for col in 0..GRID {
                if !grid.occupied(row, col) {
                    continue;
                }
                let bx = gx + col as i32;
                let by = gy + row as i32;
                match board.cell(bx, by) {
                    Some(cell) if !cell.occupied => {
                        buf.queue(MoveTo(x0 + bx as u16 * CELL_W, y0 + by as u16))?;
                        buf.queue(SetForegroundColor(to_color(rgb)))?;
                        buf.queue(SetAttribute(Attribute::Dim))?;
                        buf.queue(Print("::"))?;
                        buf.queue(SetAttribute(Attribute::Reset))?;
                        buf.queue(ResetColor)?;
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn draw_hud(
        &self,
        board: &Board,
        palette: &Palette,
        buf: &mut Vec<u8>,
        x: u16,
        y: u16,
    ) -> Result<()> {
        buf.queue(ResetColor)?;
        let mut line = 0u16;
        let mut put = |buf: &mut Vec<u8>, text: String| -> Result<u16> {
            buf.queue(MoveTo(x, y + line))?;
            buf.queue(Print(format!("{:<18}", text)))?;
            line += 1;
            Ok(line)
        };

        put(buf, format!("score {:>10}", board.score()))?;
        put(buf, format!("lines {:>10}", board.lines()))?;
        put(buf, format!("level {:>10}", board.level()))?;
        put(buf, format!("b2b   {:>10}", board.b2b_streak()))?;
        match board.last_combo().label() {
            Some(label) => put(buf, format!("+{} {}", board.last_score_delta(), label))?,
            None => put(buf, String::new())?,
        };
        put(buf, String::new())?;
        put(
            buf,
            format!("hold{}", if board.can_hold() { "" } else { " (used)" }),
        )?;

        // Held piece preview, drawn from its spawn-orientation grid.
        let hold_y = y + line;
        for row in 0..GRID {
            buf.queue(MoveTo(x, hold_y + row as u16))?;
            for col in 0..GRID {
                match board.held() {
                    Some(kind) => {
                        let grid = board.catalog().rotation(kind, Rotation::North);
                        if grid.occupied(row, col) {
                            let rgb = palette.resolve(grid.cell(row, col).color);
                            buf.queue(SetBackgroundColor(to_color(rgb)))?;
                            buf.queue(Print("  "))?;
                            buf.queue(ResetColor)?;
                        } else {
                            buf.queue(Print("  "))?;
                        }
                    }
                    None => {
                        buf.queue(Print("  "))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_banner(
        &self,
        buf: &mut Vec<u8>,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        text: &str,
    ) -> Result<()> {
        let bx = x + w.saturating_sub(text.len() as u16) / 2;
        let by = y + h / 2;
        buf.queue(MoveTo(bx, by))?;
        buf.queue(SetAttribute(Attribute::Bold))?;
        buf.queue(SetForegroundColor(Color::White))?;
        buf.queue(SetBackgroundColor(Color::DarkRed))?;
        buf.queue(Print(text))?;
        buf.queue(SetAttribute(Attribute::Reset))?;
        buf.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Color handle of a kind's spawn grid (any occupied cell carries it).
fn grid_color(board: &Board, kind: PieceKind) -> ColorId {
    let grid = board.catalog().rotation(kind, Rotation::North);
    for row in 0..GRID {
        for col in 0..GRID {
            if grid.occupied(row, col) {
                return grid.cell(row, col).color;
            }
        }
    }
    ColorId::EMPTY
}
