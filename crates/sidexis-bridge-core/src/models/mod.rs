//! Domain types for patient data.

mod patient;

pub use patient::*;
