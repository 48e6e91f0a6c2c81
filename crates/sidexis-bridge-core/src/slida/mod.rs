//! SLIDA message layer.
//!
//! Token messages reach Sidexis by appending a small binary record to a
//! shared integration file (the "mailslot") that the application polls.

mod mailslot;
mod message;

pub use mailslot::*;
pub use message::*;

use thiserror::Error;

/// SLIDA delivery errors.
#[derive(Error, Debug)]
pub enum SlidaError {
    #[error("mailslot write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type SlidaResult<T> = Result<T, SlidaError>;
