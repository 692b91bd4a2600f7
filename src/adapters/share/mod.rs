//! Share adapters. Native share via command, clipboard fallback.

pub mod clipboard;
pub mod command;

pub use clipboard::{StdoutClipboard, SystemClipboard};
pub use command::CommandShare;
