//! `stem-trends` library crate.
//!
//! The binary (`stem`) is a thin wrapper around this library so that:
//!
//! - the reconstruction is testable without spawning processes
//! - the CLI and the TUI share one pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod io;
pub mod plot;
pub mod reconstruct;
pub mod report;
pub mod tui;
pub mod view;
