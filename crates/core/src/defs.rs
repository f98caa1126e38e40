//! Definition file parsers.
//!
//! Two independent grammars describe the piece data: rotation shapes
//! (4x4 '0'/'1' grids, four per piece) and wall-kick offset tables
//! (ordered fallback offsets per rotation pair). Both are parsed by
//! character-at-a-time state machines that accept input in arbitrary
//! chunks: all cursor state lives in the state value, never in call-stack
//! position, so a chunk boundary may fall anywhere, including inside a
//! token.
//!
//! Parsing runs to completion before any board exists; every grammar
//! violation is fatal and reports the file, line, and offending character.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::catalog::{KickList, PieceCatalog, PieceDefinition, RotationGrid, GRID, MAX_KICKS};
use crate::types::{Cell, ColorTable, PieceKind};

/// Read size for the chunked loaders.
pub const CHUNK_SIZE: usize = 512;

/// Fatal definition-file errors. There is no recovery path: the engine
/// cannot run with incomplete piece data.
#[derive(Debug, Error)]
pub enum DefsError {
    #[error("{file}:{line}: unexpected character {ch:?} ({expected})")]
    Unexpected {
        file: String,
        line: u32,
        ch: char,
        expected: &'static str,
    },
    #[error("{file}:{line}: unknown piece letter {ch:?}")]
    UnknownPiece { file: String, line: u32, ch: char },
    #[error("{file}:{line}: rotation index {ch:?} out of range (expected 0-3)")]
    RotationIndex { file: String, line: u32, ch: char },
    #[error("{file}:{line}: more than {MAX_KICKS} offsets in one kick group")]
    TooManyOffsets { file: String, line: u32 },
    #[error("{file}:{line}: unexpected end of file")]
    UnexpectedEof { file: String, line: u32 },
    #[error("{file}: no shape definition for piece {letter}")]
    MissingPiece { file: String, letter: char },
    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Shape-grammar parser state. Cursor fields are explicit so the machine
/// can resume at any chunk boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeState {
    /// Outside any block; only whitespace and ':' are legal.
    TopLevel,
    /// After ':', skipping spaces, expecting the piece letter.
    PieceLetter,
    /// After the piece letter, expecting end of line.
    LetterNewline { kind: PieceKind },
    /// Reading '0'/'1' rows into rotation state `rot`.
    Rows {
        kind: PieceKind,
        rot: usize,
        row: usize,
        col: usize,
    },
    /// All four rows of `rot` read; expecting '>', '$', or ':'.
    RotationBreak { kind: PieceKind, rot: usize },
}

/// Parser for the rotation-shape file.
#[derive(Debug, Clone)]
pub struct ShapeParser {
    file: String,
    line: u32,
    colors: ColorTable,
    state: ShapeState,
    pending: [RotationGrid; 4],
    defs: [Option<[RotationGrid; 4]>; 7],
}

impl ShapeParser {
    pub fn new(file: &str, colors: ColorTable) -> Self {
        Self {
            file: file.to_owned(),
            line: 1,
            colors,
            state: ShapeState::TopLevel,
            pending: [RotationGrid::default(); 4],
            defs: [None; 7],
        }
    }

    /// Consume one chunk of input. Chunk boundaries may fall anywhere.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), DefsError> {
        for &byte in chunk {
            self.step(byte as char)?;
        }
        Ok(())
    }

    /// Validate end-of-input and hand back the seven rotation sets.
    pub fn finish(self) -> Result<[[RotationGrid; 4]; 7], DefsError> {
        if self.state != ShapeState::TopLevel {
            return Err(DefsError::UnexpectedEof {
                file: self.file,
                line: self.line,
            });
        }
        let mut out = [[RotationGrid::default(); 4]; 7];
        for kind in PieceKind::ALL {
            match self.defs[kind.index()] {
                Some(rots) => out[kind.index()] = rots,
                None => {
                    return Err(DefsError::MissingPiece {
                        file: self.file,
                        letter: kind.letter(),
                    })
                }
            }
        }
        Ok(out)
    }

    fn step(&mut self, ch: char) -> Result<(), DefsError> {
        match self.state {
            ShapeState::TopLevel => match ch {
                ' ' | '\t' | '\r' | '\n' => {}
                ':' => self.state = ShapeState::PieceLetter,
                _ => return Err(self.unexpected(ch, "expected ':' to start a piece block")),
            },
            ShapeState::PieceLetter => match ch {
                ' ' | '\t' => {}
                _ => match PieceKind::from_letter(ch) {
                    Some(kind) => self.state = ShapeState::LetterNewline { kind },
                    None => {
                        return Err(DefsError::UnknownPiece {
                            file: self.file.clone(),
                            line: self.line,
                            ch,
                        })
                    }
                },
            },
            ShapeState::LetterNewline { kind } => match ch {
                '\r' => {}
                '\n' => {
                    self.pending = [RotationGrid::default(); 4];
                    self.state = ShapeState::Rows {
                        kind,
                        rot: 0,
                        row: 0,
                        col: 0,
                    };
                }
                _ => return Err(self.unexpected(ch, "expected newline after piece letter")),
            },
            ShapeState::Rows {
                kind,
                rot,
                row,
                col,
            } => match ch {
                '0' | '1' if col < GRID => {
                    let cell = if ch == '1' {
                        Cell::filled(self.colors.for_kind(kind))
                    } else {
                        Cell {
                            occupied: false,
                            color: self.colors.empty(),
                        }
                    };
                    self.pending[rot].set(row, col, cell);
                    self.state = ShapeState::Rows {
                        kind,
                        rot,
                        row,
                        col: col + 1,
                    };
                }
                '\n' if col == GRID => {
                    let row = row + 1;
                    self.state = if row == GRID {
                        ShapeState::RotationBreak { kind, rot }
                    } else {
                        ShapeState::Rows {
                            kind,
                            rot,
                            row,
                            col: 0,
                        }
                    };
                }
                // Blank line before a row starts.
                '\n' if col == 0 => {}
                '\r' => {}
                '0' | '1' => return Err(self.unexpected(ch, "row holds more than 4 cells")),
                _ => return Err(self.unexpected(ch, "expected a '0'/'1' cell row")),
            },
            ShapeState::RotationBreak { kind, rot } => match ch {
                ' ' | '\t' | '\r' | '\n' => {}
                '>' => {
                    if rot + 1 == 4 {
                        return Err(self.unexpected(ch, "piece already has 4 rotation states"));
                    }
                    self.state = ShapeState::Rows {
                        kind,
                        rot: rot + 1,
                        row: 0,
                        col: 0,
                    };
                }
                '$' | ':' => {
                    if rot + 1 < 4 {
                        return Err(self.unexpected(ch, "piece block needs 4 rotation states"));
                    }
                    // Redefinition overwrites; the data author owns the file.
                    self.defs[kind.index()] = Some(self.pending);
                    self.state = if ch == ':' {
                        ShapeState::PieceLetter
                    } else {
                        ShapeState::TopLevel
                    };
                }
                _ => {
                    return Err(
                        self.unexpected(ch, "expected '>', '$', or ':' after a rotation state")
                    )
                }
            },
        }

        if ch == '\n' {
            self.line += 1;
        }
        Ok(())
    }

    fn unexpected(&self, ch: char, expected: &'static str) -> DefsError {
        DefsError::Unexpected {
            file: self.file.clone(),
            line: self.line,
            ch,
            expected,
        }
    }
}

/// Kick-grammar parser state. The pending sign lives in the variant so a
/// chunk boundary can split even a signed integer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KickState {
    /// Outside any block.
    TopLevel,
    /// After ':', expecting the piece letter.
    PieceLetter,
    /// After the piece letter, expecting end of line.
    LetterNewline,
    /// At a line start inside a block: '#', offsets, ':', or '$'.
    Body,
    /// After '#', expecting the start rotation digit.
    PairFirst,
    /// After the start digit, expecting the end rotation digit.
    PairSecond { from: usize },
    /// After both digits, expecting end of line.
    PairNewline,
    /// Inside the x token, '-' seen.
    NegX,
    /// Have dx, expecting ','.
    AwaitComma { dx: i8 },
    /// After ',', expecting the y token.
    AwaitY { dx: i8 },
    /// Inside the y token, '-' seen.
    NegY { dx: i8 },
    /// Offset pair recorded, expecting end of line.
    AwaitEol,
    /// After the terminating '$'; remaining input is ignored.
    Done,
}

type KickTables = [[[KickList; 4]; 4]; 7];

/// Parser for the wall-kick offset file.
#[derive(Debug, Clone)]
pub struct KickParser {
    file: String,
    line: u32,
    state: KickState,
    kind: Option<PieceKind>,
    pair: Option<(usize, usize)>,
    pending: KickList,
    tables: KickTables,
}

impl KickParser {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_owned(),
            line: 1,
            state: KickState::TopLevel,
            kind: None,
            pair: None,
            pending: KickList::new(),
            tables: Default::default(),
        }
    }

    /// Consume one chunk of input. Chunk boundaries may fall anywhere.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), DefsError> {
        for &byte in chunk {
            self.step(byte as char)?;
        }
        Ok(())
    }

    /// Validate end-of-input and hand back the kick tables. Pairs never
    /// mentioned in the file stay empty, which is legal: most of the 16
    /// ordered rotation pairs have no kicks.
    pub fn finish(mut self) -> Result<KickTables, DefsError> {
        match self.state {
            KickState::TopLevel | KickState::Done => {}
            KickState::Body | KickState::AwaitEol => self.commit_pair(),
            _ => {
                return Err(DefsError::UnexpectedEof {
                    file: self.file,
                    line: self.line,
                })
            }
        }
        Ok(self.tables)
    }

    fn step(&mut self, ch: char) -> Result<(), DefsError> {
        match self.state {
            KickState::TopLevel => match ch {
                ' ' | '\t' | '\r' | '\n' => {}
                ':' => self.state = KickState::PieceLetter,
                '$' => self.state = KickState::Done,
                _ => return Err(self.unexpected(ch, "expected ':' to start a piece block")),
            },
            KickState::PieceLetter => match ch {
                ' ' | '\t' => {}
                _ => match PieceKind::from_letter(ch) {
                    Some(kind) => {
                        self.kind = Some(kind);
                        self.state = KickState::LetterNewline;
                    }
                    None => {
                        return Err(DefsError::UnknownPiece {
                            file: self.file.clone(),
                            line: self.line,
                            ch,
                        })
                    }
                },
            },
            KickState::LetterNewline => match ch {
                '\r' => {}
                '\n' => self.state = KickState::Body,
                _ => return Err(self.unexpected(ch, "expected newline after piece letter")),
            },
            KickState::Body => match ch {
                ' ' | '\t' | '\r' | '\n' => {}
                '#' => {
                    self.commit_pair();
                    self.state = KickState::PairFirst;
                }
                ':' => {
                    self.commit_pair();
                    self.state = KickState::PieceLetter;
                }
                '$' => {
                    self.commit_pair();
                    self.state = KickState::Done;
                }
                '-' => {
                    self.require_pair(ch)?;
                    self.state = KickState::NegX;
                }
                '0'..='9' => {
                    self.require_pair(ch)?;
                    self.state = KickState::AwaitComma {
                        dx: digit_value(ch),
                    };
                }
                _ => return Err(self.unexpected(ch, "expected '#', an offset, ':', or '$'")),
            },
            KickState::PairFirst => {
                self.state = KickState::PairSecond {
                    from: self.rotation_digit(ch)?,
                }
            }
            KickState::PairSecond { from } => {
                let to = self.rotation_digit(ch)?;
                self.pair = Some((from, to));
                self.pending.clear();
                self.state = KickState::PairNewline;
            }
            KickState::PairNewline => match ch {
                '\r' => {}
                '\n' => self.state = KickState::Body,
                _ => return Err(self.unexpected(ch, "expected newline after rotation pair")),
            },
            KickState::NegX => match ch {
                '0'..='9' => {
                    self.state = KickState::AwaitComma {
                        dx: -digit_value(ch),
                    }
                }
                _ => return Err(self.unexpected(ch, "expected a digit after '-'")),
            },
            KickState::AwaitComma { dx } => match ch {
                ',' => self.state = KickState::AwaitY { dx },
                _ => return Err(self.unexpected(ch, "expected ',' between offset components")),
            },
            KickState::AwaitY { dx } => match ch {
                '-' => self.state = KickState::NegY { dx },
                '0'..='9' => {
                    self.push_offset(dx, digit_value(ch))?;
                    self.state = KickState::AwaitEol;
                }
                _ => return Err(self.unexpected(ch, "expected the y offset component")),
            },
            KickState::NegY { dx } => match ch {
                '0'..='9' => {
                    self.push_offset(dx, -digit_value(ch))?;
                    self.state = KickState::AwaitEol;
                }
                _ => return Err(self.unexpected(ch, "expected a digit after '-'")),
            },
            KickState::AwaitEol => match ch {
                '\r' => {}
                '\n' => self.state = KickState::Body,
                _ => return Err(self.unexpected(ch, "expected newline after offset pair")),
            },
            KickState::Done => {}
        }

        if ch == '\n' {
            self.line += 1;
        }
        Ok(())
    }

    fn rotation_digit(&self, ch: char) -> Result<usize, DefsError> {
        match ch {
            '0'..='3' => Ok(ch as usize - '0' as usize),
            '4'..='9' => Err(DefsError::RotationIndex {
                file: self.file.clone(),
                line: self.line,
                ch,
            }),
            _ => Err(self.unexpected(ch, "expected a rotation index digit")),
        }
    }

    fn push_offset(&mut self, dx: i8, dy: i8) -> Result<(), DefsError> {
        if self.pending.is_full() {
            return Err(DefsError::TooManyOffsets {
                file: self.file.clone(),
                line: self.line,
            });
        }
        self.pending.push((dx, dy));
        Ok(())
    }

    fn require_pair(&self, ch: char) -> Result<(), DefsError> {
        if self.pair.is_none() {
            return Err(self.unexpected(ch, "offsets must follow a '#' rotation pair"));
        }
        Ok(())
    }

    /// Store the accumulated offsets under the open rotation pair, in file
    /// order. File order is the fallback priority tried at rotation time.
    fn commit_pair(&mut self) {
        if let (Some(kind), Some((from, to))) = (self.kind, self.pair.take()) {
            self.tables[kind.index()][from][to] = std::mem::take(&mut self.pending);
        }
    }

    fn unexpected(&self, ch: char, expected: &'static str) -> DefsError {
        DefsError::Unexpected {
            file: self.file.clone(),
            line: self.line,
            ch,
            expected,
        }
    }
}

fn digit_value(ch: char) -> i8 {
    (ch as u8 - b'0') as i8
}

/// Parse both definition streams and assemble the catalog. Reads each
/// source in fixed-size chunks; the parsers are indifferent to where the
/// boundaries fall.
pub fn load_catalog<R: Read, S: Read>(
    mut shapes: R,
    shapes_name: &str,
    mut kicks: S,
    kicks_name: &str,
    colors: &ColorTable,
) -> Result<PieceCatalog, DefsError> {
    let mut shape_parser = ShapeParser::new(shapes_name, *colors);
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = shapes.read(&mut buf).map_err(|source| DefsError::Io {
            file: shapes_name.to_owned(),
            source,
        })?;
        if n == 0 {
            break;
        }
        shape_parser.feed(&buf[..n])?;
    }
    let rotations = shape_parser.finish()?;

    let mut kick_parser = KickParser::new(kicks_name);
    loop {
        let n = kicks.read(&mut buf).map_err(|source| DefsError::Io {
            file: kicks_name.to_owned(),
            source,
        })?;
        if n == 0 {
            break;
        }
        kick_parser.feed(&buf[..n])?;
    }
    let kick_tables = kick_parser.finish()?;

    let mut defs: [PieceDefinition; 7] = Default::default();
    for kind in PieceKind::ALL {
        let i = kind.index();
        for rot in 0..4 {
            *defs[i].rotation_mut(rot) = rotations[i][rot];
        }
        for from in 0..4 {
            for to in 0..4 {
                defs[i].set_kicks(from, to, kick_tables[i][from][to].clone());
            }
        }
    }
    Ok(PieceCatalog::new(defs))
}

/// Open and parse the two definition files from disk.
pub fn load_catalog_from_paths(
    shapes: &Path,
    kicks: &Path,
    colors: &ColorTable,
) -> Result<PieceCatalog, DefsError> {
    let open = |path: &Path| {
        File::open(path).map_err(|source| DefsError::Io {
            file: path.display().to_string(),
            source,
        })
    };
    let shapes_file = open(shapes)?;
    let kicks_file = open(kicks)?;
    load_catalog(
        shapes_file,
        &shapes.display().to_string(),
        kicks_file,
        &kicks.display().to_string(),
        colors,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    const ONE_SHAPE: &str = "\
:T
0100
1110
0000
0000
>
0100
0110
0100
0000
>
0000
1110
0100
0000
>
0100
1100
0100
0000
$
";

    #[test]
    fn test_shape_block_parses() {
        let mut parser = ShapeParser::new("shapes.txt", ColorTable::default());
        parser.feed(ONE_SHAPE.as_bytes()).unwrap();
        // Only T was defined, so finish reports the first missing kind.
        match parser.finish() {
            Err(DefsError::MissingPiece { letter, .. }) => assert_eq!(letter, 'I'),
            other => panic!("expected MissingPiece, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_shape_cells_recorded() {
        let mut parser = ShapeParser::new("shapes.txt", ColorTable::default());
        parser.feed(ONE_SHAPE.as_bytes()).unwrap();
        let grid = parser.defs[PieceKind::T.index()].unwrap()[0];
        assert!(grid.occupied(0, 1));
        assert!(grid.occupied(1, 0));
        assert!(grid.occupied(1, 1));
        assert!(grid.occupied(1, 2));
        assert!(!grid.occupied(0, 0));
        assert!(!grid.occupied(2, 2));
    }

    #[test]
    fn test_shape_parser_survives_any_chunking() {
        let bytes = ONE_SHAPE.as_bytes();
        for chunk_len in [1, 2, 3, 5, 7] {
            let mut parser = ShapeParser::new("shapes.txt", ColorTable::default());
            for chunk in bytes.chunks(chunk_len) {
                parser.feed(chunk).unwrap();
            }
            assert!(parser.defs[PieceKind::T.index()].is_some());
        }
    }

    #[test]
    fn test_shape_error_names_line() {
        let input = ":T\n0100\n1110\n00x0\n";
        let mut parser = ShapeParser::new("shapes.txt", ColorTable::default());
        match parser.feed(input.as_bytes()) {
            Err(DefsError::Unexpected { line, ch, .. }) => {
                assert_eq!(line, 4);
                assert_eq!(ch, 'x');
            }
            other => panic!("expected Unexpected, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_row_too_long_is_fatal() {
        let input = ":T\n01001\n";
        let mut parser = ShapeParser::new("shapes.txt", ColorTable::default());
        assert!(matches!(
            parser.feed(input.as_bytes()),
            Err(DefsError::Unexpected { line: 2, .. })
        ));
    }

    #[test]
    fn test_shape_truncated_block_is_eof() {
        let mut parser = ShapeParser::new("shapes.txt", ColorTable::default());
        parser.feed(b":T\n0100\n").unwrap();
        assert!(matches!(
            parser.finish(),
            Err(DefsError::UnexpectedEof { .. })
        ));
    }

    const ONE_KICK: &str = "\
:T
#01
-1,0
-1,1
0,-2
-1,-2
#10
1,0
$
";

    #[test]
    fn test_kick_block_parses_in_order() {
        let mut parser = KickParser::new("kicks.txt");
        parser.feed(ONE_KICK.as_bytes()).unwrap();
        let tables = parser.finish().unwrap();
        let t = PieceKind::T.index();
        assert_eq!(
            tables[t][0][1].as_slice(),
            &[(-1, 0), (-1, 1), (0, -2), (-1, -2)]
        );
        assert_eq!(tables[t][1][0].as_slice(), &[(1, 0)]);
        // Undefined pairs stay empty.
        assert!(tables[t][2][3].is_empty());
    }

    #[test]
    fn test_kick_parser_survives_any_chunking() {
        let bytes = ONE_KICK.as_bytes();
        for chunk_len in [1, 2, 3, 5, 11] {
            let mut parser = KickParser::new("kicks.txt");
            for chunk in bytes.chunks(chunk_len) {
                parser.feed(chunk).unwrap();
            }
            let tables = parser.finish().unwrap();
            assert_eq!(tables[PieceKind::T.index()][0][1].len(), 4);
        }
    }

    #[test]
    fn test_kick_rotation_index_out_of_range() {
        let mut parser = KickParser::new("kicks.txt");
        assert!(matches!(
            parser.feed(b":T\n#04\n"),
            Err(DefsError::RotationIndex { ch: '4', .. })
        ));
    }

    #[test]
    fn test_kick_fifth_offset_is_fatal() {
        let input = ":T\n#01\n1,0\n1,1\n0,2\n1,2\n1,-2\n";
        let mut parser = KickParser::new("kicks.txt");
        assert!(matches!(
            parser.feed(input.as_bytes()),
            Err(DefsError::TooManyOffsets { line: 7, .. })
        ));
    }

    #[test]
    fn test_kick_offset_without_pair_is_fatal() {
        let mut parser = KickParser::new("kicks.txt");
        assert!(matches!(
            parser.feed(b":T\n1,0\n"),
            Err(DefsError::Unexpected { line: 2, .. })
        ));
    }

    #[test]
    fn test_kick_input_after_terminator_ignored() {
        let mut parser = KickParser::new("kicks.txt");
        parser.feed(b":T\n#01\n1,0\n$ trailing garbage !!\n").unwrap();
        let tables = parser.finish().unwrap();
        assert_eq!(tables[PieceKind::T.index()][0][1].as_slice(), &[(1, 0)]);
    }

    #[test]
    fn test_kick_unknown_piece_letter() {
        let mut parser = KickParser::new("kicks.txt");
        assert!(matches!(
            parser.feed(b":Q\n"),
            Err(DefsError::UnknownPiece { ch: 'Q', .. })
        ));
    }

    #[test]
    fn test_kick_pair_redefinition_overwrites() {
        let input = ":T\n#01\n1,0\n#01\n2,0\n$";
        let mut parser = KickParser::new("kicks.txt");
        parser.feed(input.as_bytes()).unwrap();
        let tables = parser.finish().unwrap();
        assert_eq!(tables[PieceKind::T.index()][0][1].as_slice(), &[(2, 0)]);
    }

    #[test]
    fn test_load_catalog_assembles_both_files() {
        // Seven minimal single-cell shapes, plus one kick entry for T.
        let mut shapes = String::new();
        for kind in PieceKind::ALL {
            shapes.push(':');
            shapes.push(kind.letter());
            shapes.push('\n');
            for rot in 0..4 {
                if rot > 0 {
                    shapes.push_str(">\n");
                }
                shapes.push_str("1000\n0000\n0000\n0000\n");
            }
            shapes.push_str("$\n");
        }

        let catalog = load_catalog(
            shapes.as_bytes(),
            "shapes.txt",
            ONE_KICK.as_bytes(),
            "kicks.txt",
            &ColorTable::default(),
        )
        .unwrap();

        assert!(catalog
            .rotation(PieceKind::S, Rotation::West)
            .occupied(0, 0));
        assert_eq!(
            catalog.kicks(PieceKind::T, Rotation::North, Rotation::East),
            &[(-1, 0), (-1, 1), (0, -2), (-1, -2)]
        );
        assert!(catalog
            .kicks(PieceKind::I, Rotation::North, Rotation::East)
            .is_empty());
    }
}
