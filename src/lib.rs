// src/lib.rs
//! Client for the Chivalry 2 server-browser backend.
//!
//! A game server registers itself, heartbeats to keep the listing alive,
//! pushes status updates, and deregisters on shutdown; anyone can fetch the
//! current server list. Every call is one HTTP round trip against the
//! backend address the caller supplies. Heartbeat scheduling is deliberately
//! left to the caller (see the `browser-agent` binary for one).

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::BrowserClient;
pub use error::BrowserError;
