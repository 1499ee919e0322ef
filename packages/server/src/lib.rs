//! Real-time messaging server library.
//!
//! This library provides the real-time messaging core of the michizure
//! travel-companion platform: presence tracking, thread rooms, live
//! signals and the HTTP-to-WebSocket message delivery bridge.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
