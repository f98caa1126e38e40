//! Terminal input collaborator.
//!
//! Maps crossterm key events to the engine's per-tick input signal. The
//! driver consumes at most one game input per tick, so this crate is a
//! pure key map with no repeat buffering.

pub mod map;

pub use minofall_types as types;

pub use map::{map_key, should_quit, KeyAction};
