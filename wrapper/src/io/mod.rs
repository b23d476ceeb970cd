//! I/O helpers for wrapper commands.

pub mod config;
pub mod engine;
pub mod locate;
pub mod process;
pub mod registry;
pub mod verify;
