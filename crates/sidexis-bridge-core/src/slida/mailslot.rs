//! Mailslot file delivery.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::SlidaResult;

/// Append-only handle to the shared Sidexis integration file.
///
/// The file is opened and closed per message using the OS's shared-write
/// semantics only. Appends are cooperative, not exclusive: Sidexis reads
/// the file concurrently and nothing here serializes other writers.
#[derive(Debug, Clone)]
pub struct Mailslot {
    path: PathBuf,
}

impl Mailslot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one encoded message, creating the file if needed.
    ///
    /// A failure (for example the file is held by the consuming
    /// application) propagates to the caller, which logs and drops the
    /// message; no retry happens at this layer.
    pub fn append(&self, message: &[u8]) -> SlidaResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_accumulate_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mailslot = Mailslot::new(dir.path().join("slida.sdx"));

        mailslot.append(b"first").unwrap();
        mailslot.append(b"second").unwrap();

        let contents = std::fs::read(mailslot.path()).unwrap();
        assert_eq!(contents, b"firstsecond");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let mailslot = Mailslot::new("/nonexistent-dir/slida.sdx");
        assert!(mailslot.append(b"message").is_err());
    }
}
