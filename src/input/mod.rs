//! Input adapters for the explorer.
//!
//! This module turns raw key presses and mouse clicks, whether typed into a
//! window or given as a script on the command line, into session commands.

pub mod keys;

#[cfg(feature = "gui")]
pub mod gui;
