//! Blockfall (workspace facade crate).
//!
//! The engine, shared types, and terminal view live in dedicated crates under
//! `crates/`; this package re-exports them as `blockfall::{core, term, types}`
//! and hosts the line-oriented script driver used by the binary.

pub use blockfall_core as core;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod cli;
pub mod script;
