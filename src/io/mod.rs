//! I/O utilities for opinion-contexts.
//!
//! Provides document file reading with memory mapping support, HTML
//! stripping, and Unicode helpers for previews.

pub mod html;
pub mod reader;
pub mod unicode;

pub use html::HtmlStripper;
pub use reader::{FileReader, read_file};
pub use unicode::{find_char_boundary, preview};
