//! Core domain models for opinion-contexts.
//!
//! This module contains the fundamental data structures used throughout the
//! pipeline: sentences and the contexts they are merged into. These are pure
//! domain models with no I/O dependencies.

pub mod context;
pub mod sentence;

pub use context::Context;
pub use sentence::Sentence;
