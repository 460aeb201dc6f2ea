//! # Shiftwise - weekly shift definitions for attendance platforms
//!
//! A command-line utility that keeps an institution's catalogue of weekly
//! work shifts free of duplicates and turns every change into a reviewable
//! SQL script for the attendance store.
//!
//! ## Features
//!
//! - **Similarity matching**: Four-tier duplicate detection for candidate shifts
//! - **Change scripts**: Ordered creation and update scripts with allocated ids
//! - **Shift diffs**: Per-weekday classification of edits
//! - **Local store**: SQLite mirror of the shift catalogue with migrations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shiftwise::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
