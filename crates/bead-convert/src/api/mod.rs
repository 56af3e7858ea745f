//! Public API for the bead-convert crate.
//!
//! This module provides the high-level API: the [`PatternConverter`]
//! builder, the [`Stage`] progress checkpoints and the [`ConvertError`]
//! unified error type.

mod builder;
mod error;

pub use builder::{PatternConverter, Stage};
pub use error::ConvertError;
