//! Piece catalog - the immutable shape and wall-kick data model.
//!
//! The catalog is built once at startup by the definition parsers and then
//! shared read-only (via `Rc`) into every board. There is no global piece
//! table; tests can build as many independent catalogs as they like.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, Rotation};

/// Side length of a rotation state's occupancy grid.
pub const GRID: usize = 4;

/// One rotation state: a 4x4 grid of cells. Occupied cells carry the color
/// handle bound to the owning piece kind at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationGrid {
    cells: [[Cell; GRID]; GRID],
}

impl RotationGrid {
    /// Cell at (row, col), both 0..4.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].occupied
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }
}

/// Ordered wall-kick fallback offsets for one (start, end) rotation pair.
/// List order is fallback priority; most pairs are empty.
pub type KickList = ArrayVec<(i8, i8), 4>;

/// Maximum offsets per kick list (a fifth is a data error).
pub const MAX_KICKS: usize = 4;

/// Full definition of one piece kind: 4 rotation states plus the 4x4 matrix
/// of kick lists covering every ordered rotation pair.
#[derive(Debug, Clone, Default)]
pub struct PieceDefinition {
    rotations: [RotationGrid; 4],
    kicks: [[KickList; 4]; 4],
}

impl PieceDefinition {
    pub fn rotation(&self, rot: Rotation) -> &RotationGrid {
        &self.rotations[rot.index()]
    }

    pub fn kicks(&self, from: Rotation, to: Rotation) -> &[(i8, i8)] {
        &self.kicks[from.index()][to.index()]
    }

    pub(crate) fn rotation_mut(&mut self, index: usize) -> &mut RotationGrid {
        &mut self.rotations[index]
    }

    pub(crate) fn set_kicks(&mut self, from: usize, to: usize, list: KickList) {
        self.kicks[from][to] = list;
    }
}

/// Immutable table of the seven piece definitions.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    defs: [PieceDefinition; 7],
}

impl PieceCatalog {
    pub(crate) fn new(defs: [PieceDefinition; 7]) -> Self {
        Self { defs }
    }

    pub fn definition(&self, kind: PieceKind) -> &PieceDefinition {
        &self.defs[kind.index()]
    }

    pub fn rotation(&self, kind: PieceKind, rot: Rotation) -> &RotationGrid {
        self.definition(kind).rotation(rot)
    }

    pub fn kicks(&self, kind: PieceKind, from: Rotation, to: Rotation) -> &[(i8, i8)] {
        self.definition(kind).kicks(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorId, PieceKind, Rotation};

    #[test]
    fn test_rotation_grid_set_and_query() {
        let mut grid = RotationGrid::default();
        assert!(!grid.occupied(1, 2));

        grid.set(1, 2, Cell::filled(ColorId::from_raw(3)));
        assert!(grid.occupied(1, 2));
        assert_eq!(grid.cell(1, 2).color.raw(), 3);
    }

    #[test]
    fn test_definition_kicks_default_empty() {
        let def = PieceDefinition::default();
        for from in Rotation::ALL {
            for to in Rotation::ALL {
                assert!(def.kicks(from, to).is_empty());
            }
        }
    }

    #[test]
    fn test_catalog_lookup_by_kind() {
        let mut defs: [PieceDefinition; 7] = Default::default();
        let mut list = KickList::new();
        list.push((1, 0));
        defs[PieceKind::T.index()].set_kicks(0, 1, list);

        let catalog = PieceCatalog::new(defs);
        assert_eq!(
            catalog.kicks(PieceKind::T, Rotation::North, Rotation::East),
            &[(1, 0)]
        );
        assert!(catalog
            .kicks(PieceKind::I, Rotation::North, Rotation::East)
            .is_empty());
    }
}
