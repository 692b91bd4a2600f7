//! Implements NotifierPort as coloured one-line terminal notices.

use crate::ports::{Notice, NoticeLevel, NotifierPort};
use crossterm::style::Stylize;

#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotifierPort for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{} {}", "✔".green(), notice.message.green()),
            NoticeLevel::Error => eprintln!("{} {}", "✖".red(), notice.message.red()),
        }
    }
}
