//! Terminal rendering shared by the commands.

use std::io::Write;

use pomoquest_core::{AchievementState, LocalNotifier, NotificationContent};

/// Local notifications for a terminal: a highlighted line plus an optional bell.
pub struct TerminalNotifier {
    pub bell: bool,
}

impl LocalNotifier for TerminalNotifier {
    fn show(&self, content: &NotificationContent) {
        let bell = if self.bell { "\x07" } else { "" };
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "\n{bell}*** {}: {} ***", content.title, content.body);
        let _ = out.flush();
    }
}

pub fn achievement_line(a: &AchievementState) -> String {
    let mark = if a.unlocked { "x" } else { " " };
    match &a.progress_label {
        Some(label) => format!("[{mark}] {} - {} ({label})", a.name, a.description),
        None => format!("[{mark}] {} - {}", a.name, a.description),
    }
}
