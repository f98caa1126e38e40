//! Engine core - pure, deterministic game logic.
//!
//! This crate holds everything that makes the game tick and nothing that
//! draws it: the data-driven piece catalog and its definition-file parsers,
//! the board state machine, combo classification and scoring, and the 7-bag
//! randomizer. It does no I/O beyond reading the two definition byte
//! streams handed to the loader, and it owns no global state: the catalog
//! and color handles are explicit values passed in at construction, so any
//! number of independent boards (and tests) can coexist.
//!
//! # Module structure
//!
//! - [`catalog`]: immutable piece shape + wall-kick data model
//! - [`defs`]: resumable parsers for the two definition file grammars
//! - [`board`]: the matrix state machine (movement, kicks, locking, clears)
//! - [`scoring`]: combo classifier, score table, level curves
//! - [`rng`]: seedable LCG and the 7-bag piece queue
//!
//! # Timing
//!
//! The engine is frame-stepped and counts ticks, never wall-clock time.
//! The driver applies at most one input per tick and then calls
//! [`Board::update`], which returns liveness: `false` is game over.

pub mod board;
pub mod catalog;
pub mod defs;
pub mod rng;
pub mod scoring;

pub use minofall_types as types;

pub use board::{ActivePiece, Board, BoardSizeError};
pub use catalog::{PieceCatalog, PieceDefinition, RotationGrid};
pub use defs::{load_catalog, load_catalog_from_paths, DefsError, KickParser, ShapeParser};
pub use rng::{SevenBag, SimpleRng};
pub use scoring::{classify, score_value};
