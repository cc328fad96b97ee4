//! gitmenu library
//!
//! Exposes the building blocks of the interactive menu for testing: repository
//! discovery, the git runner port, the prompter and the action handlers.

pub mod actions;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod menu;
pub mod scan;

pub use error::{AppError, Result};
