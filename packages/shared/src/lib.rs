//! Shared helpers for the michizure chat service.
//!
//! Cross-cutting utilities used by the server binary and its tests:
//! timestamp handling and logger setup.

pub mod logger;
pub mod time;
