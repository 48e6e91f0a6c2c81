//! Sidexis Bridge Core Library
//!
//! Protocol layer for handing patient records from a web client to the
//! Sidexis imaging application.
//!
//! # Architecture
//!
//! ```text
//! raw TCP bytes
//!      │
//!      ├── HTTP GET?  → ws::handshake (101 Switching Protocols)
//!      │
//!      └── otherwise  → ws::frame (unmask, UTF-8 text)
//!                            │
//!                     PatientPayload (JSON)
//!                            │
//!                      PatientRecord
//!                            │
//!                   tokens::TokenBuilder
//!                  plan: N → U (guarded) → A
//!                            │
//!                   slida::encode_message
//!                            │
//!                 slida::Mailslot (file append)
//! ```
//!
//! The session is single-shot: one upgrade, one patient frame, one status
//! reply, then the connection closes. Nothing in this crate holds state
//! across sessions; everything flows by parameter.
//!
//! # Modules
//!
//! - [`ws`]: WebSocket handshake and text-frame codec (server-side subset)
//! - [`slida`]: binary token message layout and mailslot delivery
//! - [`tokens`]: token variants, field normalization, sender/receiver addressing
//! - [`models`]: inbound payload and the working patient record

pub mod models;
pub mod slida;
pub mod tokens;
pub mod ws;

// Re-export commonly used types
pub use models::{PatientPayload, PatientRecord};
pub use slida::Mailslot;
pub use tokens::{Addressing, EmitReport, PracticeContext, Token, TokenBuilder};
pub use ws::{DecodedFrame, FrameAnomaly};
