//! Candidate shifts read from JSON files.
//!
//! A candidate file describes a shift the user wants to create or an edited
//! version of a stored one:
//!
//! ```json
//! {
//!   "name": "Turno administrativo",
//!   "active": true,
//!   "details": [
//!     { "weekday": "Lunes", "entry": "09:00", "duration": 555 },
//!     { "weekday": "Viernes", "entry": "09:00", "exit": "16:00" }
//!   ]
//! }
//! ```
//!
//! Every detail needs an entry time and either a duration in minutes or an
//! exit time; an exit earlier than the entry means the window crosses
//! midnight. When `name` is omitted the synthesized name is used.

use super::diff::ShiftDiff;
use super::error::ShiftError;
use super::messages::Message;
use super::shift::{Shift, ShiftDetail};
use super::time_math;
use super::weekday::Weekday;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ShiftInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub details: Vec<DetailInput>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DetailInput {
    pub weekday: String,
    pub entry: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub exit: Option<String>,
}

impl DetailInput {
    fn to_detail(&self) -> Result<ShiftDetail, ShiftError> {
        let weekday = Weekday::canonicalize(&self.weekday)?;
        let entry = parse_time(&self.entry)?;
        let duration = match (self.duration, &self.exit) {
            (Some(duration), _) => duration,
            (None, Some(exit)) => time_math::duration_between(entry, parse_time(exit)?),
            (None, None) => {
                return Err(ShiftError::InvalidSchedule(Message::CandidateMissingDuration(weekday.to_string()).to_string()));
            }
        };
        ShiftDetail::new(weekday, entry, duration)
    }
}

impl ShiftInput {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Builds a new shift from the candidate.
    pub fn into_shift(self) -> Result<Shift, ShiftError> {
        let mut shift = match self.id {
            Some(id) => Shift::with_id(id),
            None => Shift::new(),
        };
        for input in &self.details {
            add_unique(&mut shift, input.to_detail()?)?;
        }
        if let Some(active) = self.active {
            shift.active = active;
        }
        if let Some(frequency) = self.frequency {
            shift.frequency = frequency;
        }
        if let Some(name) = self.name.filter(|n| !n.trim().is_empty()) {
            shift.name = name;
        }
        Ok(shift)
    }

    /// Builds the edited version of `original` described by this candidate.
    ///
    /// The detail list replaces the original one. Details whose window did not
    /// change keep their stored ids. Without an explicit name the stored name
    /// survives unless the schedule changed, in which case it is resynthesized.
    pub fn apply_to(self, original: &Shift) -> Result<Shift, ShiftError> {
        let mut edited = match original.shift_id {
            Some(id) => Shift::with_id(id),
            None => Shift::new(),
        };
        for input in &self.details {
            let detail = input.to_detail()?;
            let detail = match original.detail(detail.weekday) {
                Some(stored) if stored.same_window(&detail) => stored.clone(),
                _ => detail,
            };
            add_unique(&mut edited, detail)?;
        }

        edited.active = self.active.unwrap_or(original.active);
        edited.frequency = self.frequency.unwrap_or_else(|| original.frequency.clone());
        match self.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => edited.name = name,
            None if !ShiftDiff::between(original, &edited).has_detail_changes() => edited.name = original.name.clone(),
            None => {}
        }
        Ok(edited)
    }
}

fn add_unique(shift: &mut Shift, detail: ShiftDetail) -> Result<(), ShiftError> {
    let weekday = detail.weekday;
    if !shift.add_detail(detail) {
        return Err(ShiftError::InvalidSchedule(Message::CandidateDuplicateWeekday(weekday.to_string()).to_string()));
    }
    Ok(())
}

fn parse_time(raw: &str) -> Result<chrono::NaiveTime, ShiftError> {
    time_math::parse_time(raw).ok_or_else(|| ShiftError::InvalidSchedule(Message::CandidateInvalidTime(raw.to_string()).to_string()))
}
