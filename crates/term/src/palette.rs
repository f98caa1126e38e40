//! Color-handle palette.
//!
//! The engine stores opaque [`ColorId`] handles and never interprets them;
//! this is the collaborator that allocates the handles and resolves them
//! back to terminal colors. Handle 0 is reserved for the empty/background
//! sentinel, and the handle space is bounded: running out is a startup
//! error, not something to recover from mid-game.

use anyhow::{bail, Result};

use crate::types::{ColorId, ColorTable, PieceKind};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Allocates opaque color handles and resolves them for drawing.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Handle-space bound, matching classic terminal color-pair limits.
    pub const MAX_HANDLES: usize = 126;

    /// A palette holding only the background color (handle 0).
    pub fn new(background: Rgb) -> Self {
        Self {
            colors: vec![background],
        }
    }

    /// Allocate a handle for `color`.
    pub fn allocate(&mut self, color: Rgb) -> Result<ColorId> {
        if self.colors.len() >= Self::MAX_HANDLES {
            bail!("too many color handles allocated (limit {})", Self::MAX_HANDLES);
        }
        let id = ColorId::from_raw(self.colors.len() as u8);
        self.colors.push(color);
        Ok(id)
    }

    /// Resolve a handle. Unknown handles resolve to the background.
    pub fn resolve(&self, id: ColorId) -> Rgb {
        self.colors
            .get(id.raw() as usize)
            .copied()
            .unwrap_or(self.colors[0])
    }

    /// The default game palette: one handle per piece kind.
    pub fn standard() -> Result<(Palette, ColorTable)> {
        let mut palette = Palette::new(Rgb::new(16, 16, 24));
        let mut kinds = [ColorId::EMPTY; 7];
        for (kind, rgb) in [
            (PieceKind::I, Rgb::new(0x42, 0xe6, 0xf5)),
            (PieceKind::J, Rgb::new(0x35, 0x38, 0xcc)),
            (PieceKind::L, Rgb::new(0xe8, 0xcf, 0x4f)),
            (PieceKind::O, Rgb::new(0xea, 0xed, 0x15)),
            (PieceKind::T, Rgb::new(0xa7, 0x1f, 0xe0)),
            (PieceKind::S, Rgb::new(0x46, 0xe0, 0x1f)),
            (PieceKind::Z, Rgb::new(0xe3, 0x22, 0x22)),
        ] {
            kinds[kind.index()] = palette.allocate(rgb)?;
        }
        let table = ColorTable::new(kinds, ColorId::EMPTY);
        Ok((palette, table))
    }
}
