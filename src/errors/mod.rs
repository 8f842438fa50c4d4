//! Diagnostics recorded while parsing.
//!
//! Parse failures never abort the pass. Each one becomes an [`errors::Error`]
//! carrying the source position it was raised at, and the parser keeps
//! scanning. This module holds:
//!
//! - The error structure and its position
//! - The failure variants and their messages
//! - Short suggestions shown next to rendered diagnostics

pub mod errors;
