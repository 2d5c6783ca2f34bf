//! devfolio - a developer portfolio presented as a terminal IDE
//!
//! This library provides both CLI and TUI interfaces over a portfolio
//! catalog: a folder/document tree with tabs, light syntax coloring, project
//! demos and a schema.org metadata block.

pub mod cli;
pub mod core;
pub mod error;
pub mod tui;

pub use error::{FolioError, Result};
