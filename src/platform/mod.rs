//! Platform abstraction layer
//!
//! Handles terminal/headless differences for:
//! - Input events

pub mod input;

pub use input::{Command, InputSource, ScriptedInput, TerminalInput, command_for_key};
