//! # projgit Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! - `browse`: the default mode (flags or interactive menu)
//! - `serve`: the HTTP API
//! - `token`: offline bearer token issuance
//!
//! Each command defines its own arguments struct and a `handle_*` function
//! called from `main.rs`.
//!

/// Flag-driven and interactive browsing and provisioning.
pub mod browse;
/// JSON API over HTTP with bearer token auth.
pub mod serve;
/// Bearer token issuance.
pub mod token;
