//! Core domain + forwarding engine for the channel relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! `RelayPort` trait implemented in the adapter crate.

pub mod classify;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod errors;
pub mod forward;
pub mod logging;
pub mod matcher;
pub mod messaging;
pub mod relay;
pub mod security;
pub mod update;

#[cfg(test)]
mod test_support;

pub use errors::{Error, Result};
