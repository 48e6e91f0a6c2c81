//! Imaging application boundary.
//!
//! Starting (and on Windows, focusing) Sidexis is plain process plumbing
//! outside the protocol layer; the session only needs a seam to call once
//! the token messages are on disk.

use std::io;
use std::path::PathBuf;
use std::process::Command;

/// Seam for bringing the imaging application up after a handoff.
pub trait ImagingApp {
    /// Start or signal the application so it processes the mailslot.
    fn launch(&self) -> io::Result<()>;
}

/// Launches the configured Sidexis executable.
#[derive(Debug, Clone)]
pub struct SidexisLauncher {
    exe_path: PathBuf,
}

impl SidexisLauncher {
    pub fn new(exe_path: impl Into<PathBuf>) -> Self {
        Self {
            exe_path: exe_path.into(),
        }
    }
}

impl ImagingApp for SidexisLauncher {
    fn launch(&self) -> io::Result<()> {
        Command::new(&self.exe_path).spawn().map(|_| ())
    }
}
