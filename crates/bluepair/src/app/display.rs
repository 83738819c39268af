//! Status display collaborator
//!
//! The board display is a handful of fixed text lines; the coordinator only
//! ever replaces a whole line.

use std::fmt;

/// Fixed display regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayLine {
    /// Device title
    Title = 0,
    /// Own address
    Address = 1,
    /// Link and pairing status
    Status = 2,
    /// Peer address
    Peer = 3,
    /// Numeric comparison value
    Comparison = 4,
    /// User decision outcome
    Decision = 5,
}

impl DisplayLine {
    pub const COUNT: usize = 6;

    pub const ALL: [DisplayLine; Self::COUNT] = [
        DisplayLine::Title,
        DisplayLine::Address,
        DisplayLine::Status,
        DisplayLine::Peer,
        DisplayLine::Comparison,
        DisplayLine::Decision,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.index())
    }
}

/// Display output
pub trait StatusDisplay {
    /// Replace the text of one line
    fn write_line(&mut self, line: DisplayLine, text: &str);

    fn clear_line(&mut self, line: DisplayLine) {
        self.write_line(line, "");
    }
}

/// In-memory display, used headless and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    lines: [String; DisplayLine::COUNT],
    writes: Vec<(DisplayLine, String)>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a line
    pub fn line(&self, line: DisplayLine) -> &str {
        &self.lines[line.index()]
    }

    /// Every write in order
    pub fn history(&self) -> &[(DisplayLine, String)] {
        &self.writes
    }

    pub fn clear_history(&mut self) {
        self.writes.clear();
    }
}

impl StatusDisplay for MemoryDisplay {
    fn write_line(&mut self, line: DisplayLine, text: &str) {
        self.lines[line.index()] = text.to_string();
        self.writes.push((line, text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_display_lines() {
        let mut display = MemoryDisplay::new();
        display.write_line(DisplayLine::Status, "Advertising");
        display.write_line(DisplayLine::Status, "Connected");
        display.clear_line(DisplayLine::Peer);

        assert_eq!(display.line(DisplayLine::Status), "Connected");
        assert_eq!(display.line(DisplayLine::Peer), "");
        assert_eq!(display.history().len(), 3);
        assert_eq!(DisplayLine::ALL[4], DisplayLine::Comparison);
    }
}
