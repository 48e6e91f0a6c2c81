//! Connector log file.
//!
//! One timestamped line per event, append-only. The file is part of the
//! integration surface: practice support reads it to diagnose failed
//! handoffs, so the format stays `<timestamp>: <message>`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one `<timestamp>: <message>` line. Best-effort: a failed log
    /// write goes to the diagnostic subscriber and is otherwise dropped.
    pub fn append(&self, message: &str) {
        if let Err(err) = self.try_append(message) {
            warn!("log file {} not writable: {err}", self.path.display());
        }
    }

    fn try_append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_timestamp_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::new(dir.path().join("bridge.log"));

        log.append("SidexisConnector has started.");
        log.append("mask bit not set");

        let contents = std::fs::read_to_string(dir.path().join("bridge.log")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": SidexisConnector has started."));
        assert!(lines[1].ends_with(": mask bit not set"));
        // 19-character timestamp, `YYYY-MM-DD HH:MM:SS`
        assert_eq!(lines[0].find(": "), Some(19));
    }
}
