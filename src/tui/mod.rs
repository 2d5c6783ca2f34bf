//! Terminal User Interface module
//!
//! This module contains the ratatui-based TUI: an explorer pane over the
//! content tree, an editor pane with tabs, and the project demo dialog.

pub mod app;
pub mod editor;
pub mod event;
pub mod explorer;
pub mod markdown;
pub mod theme;
pub mod ui;

pub use app::App;
