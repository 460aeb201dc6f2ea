//! Domain logic and shared infrastructure.
//!
//! The schedule model ([`shift`], [`weekday`], [`time_math`], [`naming`]) and
//! the three engines ([`matcher`], [`diff`], [`script`]) read shifts only
//! through the [`repository`] traits and never touch the database or the
//! query cache directly.

pub mod cache;
pub mod candidate;
pub mod config;
pub mod data_storage;
pub mod diff;
pub mod error;
pub mod export;
pub mod matcher;
pub mod messages;
pub mod naming;
pub mod repository;
pub mod script;
pub mod shift;
pub mod time_math;
pub mod view;
pub mod weekday;
