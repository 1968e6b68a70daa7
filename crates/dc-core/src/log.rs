//! Append-only session event log
//!
//! Everything the engine wants the player to read goes through here. The
//! backing store is never truncated while the process runs; the presentation
//! layer reads a bounded window of rendered lines.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One logged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogEntry {
    /// Free-form line.
    Info(String),
    /// One weapon strike inside a fight.
    Strike {
        attacker: String,
        defender: String,
        damage: i32,
        strong: bool,
        weak: bool,
        fatal: bool,
    },
    /// Stat-burn damage from a bonus going negative.
    Burn { name: String, damage: i32 },
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Info(msg) => write!(f, "{msg}"),
            LogEntry::Strike {
                attacker,
                defender,
                damage,
                strong,
                weak,
                fatal,
            } => {
                write!(f, "{attacker} hits {defender} for {damage} dmg")?;
                if *strong {
                    write!(f, " (strong)")?;
                }
                if *weak {
                    write!(f, " (weak)")?;
                }
                if *fatal {
                    write!(f, "; {defender} falls!")?;
                }
                Ok(())
            }
            LogEntry::Burn { name, damage } => {
                write!(f, "{name} suffers {damage} stat burn dmg!")
            }
        }
    }
}

/// The session-wide event log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a structured entry.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Append a free-form line.
    pub fn info(&mut self, msg: impl Into<String>) {
        self.entries.push(LogEntry::Info(msg.into()));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `n` entries rendered as display lines, oldest first.
    pub fn recent_lines(&self, n: usize) -> Vec<String> {
        let start = self.entries.len().saturating_sub(n);
        self.entries[start..].iter().map(|e| e.to_string()).collect()
    }
}
