//! Terminal rendering collaborator.
//!
//! Owns the color-handle palette, the raw-mode terminal session, and the
//! game view that draws the board, ghost piece, held piece, and HUD from
//! the engine's read-only snapshot queries.

pub mod game_view;
pub mod palette;
pub mod renderer;

pub use minofall_types as types;

pub use game_view::{GameView, Viewport};
pub use palette::{Palette, Rgb};
pub use renderer::TerminalRenderer;
