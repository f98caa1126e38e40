//! Core types shared across the minofall workspace.
//! This crate contains pure data types with no external dependencies.

/// Driver tick length in milliseconds. The engine itself only counts ticks;
/// the binary paces them at this rate.
pub const TICK_MS: u64 = 16;

/// Update ticks between gravity steps, indexed by level (level caps at 15).
pub const TICKS_PER_ROW: [u32; 16] = [62, 50, 40, 31, 25, 20, 16, 12, 10, 8, 7, 6, 5, 4, 3, 2];

/// Lock delay in ticks at level 0. The threshold grows slightly with level.
pub const LOCK_DELAY_BASE_TICKS: u32 = 30;

/// Level cap. Past this, gravity scales up instead (see `core::scoring`).
pub const MAX_LEVEL: u32 = 15;

/// Lines cleared per level step.
pub const LINES_PER_LEVEL: u32 = 10;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds, in catalog index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse a piece letter (case-insensitive) as used in the definition files.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Canonical uppercase letter for this kind.
    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Dense catalog index, 0..7.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }
}

/// Rotation states. North is the spawn orientation; indices progress clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise.
    pub fn cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise.
    pub fn ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation index 0..4 as used by the kick tables.
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`]. Out-of-range indices return `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }

    pub fn apply(self, dir: RotationDir) -> Self {
        match dir {
            RotationDir::Clockwise => self.cw(),
            RotationDir::CounterClockwise => self.ccw(),
        }
    }
}

/// Direction of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDir {
    Clockwise,
    CounterClockwise,
}

/// Opaque handle into the external color palette. The engine stores these
/// and passes them through; it never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorId(u8);

impl ColorId {
    /// Sentinel for empty cells / the board background.
    pub const EMPTY: ColorId = ColorId(0);

    pub const fn from_raw(raw: u8) -> Self {
        ColorId(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl Default for ColorId {
    fn default() -> Self {
        ColorId::EMPTY
    }
}

/// One board or shape cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub occupied: bool,
    pub color: ColorId,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupied: false,
        color: ColorId::EMPTY,
    };

    pub const fn filled(color: ColorId) -> Self {
        Cell {
            occupied: true,
            color,
        }
    }
}

/// Color handles for the seven piece kinds plus the empty sentinel,
/// supplied once at startup by the palette owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTable {
    kinds: [ColorId; 7],
    empty: ColorId,
}

impl ColorTable {
    pub fn new(kinds: [ColorId; 7], empty: ColorId) -> Self {
        Self { kinds, empty }
    }

    pub fn for_kind(&self, kind: PieceKind) -> ColorId {
        self.kinds[kind.index()]
    }

    pub fn empty(&self) -> ColorId {
        self.empty
    }
}

impl Default for ColorTable {
    /// All-sentinel table, usable where colors are irrelevant (tests, benches).
    fn default() -> Self {
        Self {
            kinds: [ColorId::EMPTY; 7],
            empty: ColorId::EMPTY,
        }
    }
}

/// Per-tick input signal consumed by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    SlideLeft,
    SlideRight,
    RotateCw,
    RotateCcw,
    SoftDrop,
    HardDrop,
    Hold,
}

/// Combo classification of one lock resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboCategory {
    None,
    Single,
    Double,
    Triple,
    Tetris,
    MiniTSpin,
    TSpinSingle,
    TSpinDouble,
    TSpinTriple,
    BackToBack,
    ISpin,
    JSpin,
    LSpin,
    SSpin,
    ZSpin,
}

impl ComboCategory {
    /// HUD label. `None` has nothing to show.
    pub fn label(self) -> Option<&'static str> {
        match self {
            ComboCategory::None => None,
            ComboCategory::Single => Some("Single"),
            ComboCategory::Double => Some("Double"),
            ComboCategory::Triple => Some("Triple"),
            ComboCategory::Tetris => Some("Tetris"),
            ComboCategory::MiniTSpin => Some("Mini T-Spin"),
            ComboCategory::TSpinSingle => Some("T-Spin Single"),
            ComboCategory::TSpinDouble => Some("T-Spin Double"),
            ComboCategory::TSpinTriple => Some("T-Spin Triple"),
            ComboCategory::BackToBack => Some("Back-to-Back"),
            ComboCategory::ISpin => Some("I-Spin"),
            ComboCategory::JSpin => Some("J-Spin"),
            ComboCategory::LSpin => Some("L-Spin"),
            ComboCategory::SSpin => Some("S-Spin"),
            ComboCategory::ZSpin => Some("Z-Spin"),
        }
    }
}
