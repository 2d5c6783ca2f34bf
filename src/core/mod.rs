//! Core functionality for devfolio
//!
//! This module contains everything that does not touch the terminal:
//! - The content tree and its copy-on-write expansion
//! - Open-tab bookkeeping
//! - The session view-model
//! - Catalog loading, profile metadata and project demos
//! - The cosmetic line tokenizer
//! - Application configuration

pub mod catalog;
pub mod config;
pub mod content;
pub mod demo;
pub mod highlight;
pub mod profile;
pub mod session;
pub mod tabs;

pub use catalog::{Catalog, ContentSource};
pub use config::Config;
pub use content::{ContentNode, NodeId};
pub use session::Session;
