//! Local SQLite persistence.
//!
//! The store mirrors the attendance schema closely enough to dry-run change
//! scripts against: `shifts` holds headers, `shift_details` one row per
//! worked weekday. [`db::Db`] opens and migrates it, [`shifts::Shifts`]
//! reads and writes shifts.

pub mod db;
pub mod migrations;
pub mod shifts;
