//! Minofall (workspace facade crate).
//!
//! This package keeps the public `minofall::{core,term,input,types}` API in
//! one place while the implementation lives in dedicated crates under
//! `crates/`.

pub use minofall_core as core;
pub use minofall_input as input;
pub use minofall_term as term;
pub use minofall_types as types;
