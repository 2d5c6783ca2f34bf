//! CLI module for devfolio
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod browse;
pub mod commands;
pub mod config;

pub use commands::{Cli, Commands};
