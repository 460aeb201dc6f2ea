//! Shift and shift-detail entities.
//!
//! A [`Shift`] is a named weekly pattern owning at most one [`ShiftDetail`]
//! per weekday. Details are kept in a map keyed by canonical weekday, so
//! iteration always runs Monday to Sunday. The weekly-hour total and the
//! synthesized name are recomputed after every successful add or remove.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveTime;
//! use shiftwise::libs::shift::{Shift, ShiftDetail};
//! use shiftwise::libs::weekday::Weekday;
//!
//! let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
//! let mut shift = Shift::with_id(76);
//! for day in [Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday] {
//!     assert!(shift.add_detail(ShiftDetail::new(day, nine, 555)?));
//! }
//! shift.add_detail(ShiftDetail::new(Weekday::Friday, nine, 420)?);
//! assert_eq!(shift.name, "76-44 Lu a Vi");
//! # Ok::<(), shiftwise::libs::error::ShiftError>(())
//! ```

use super::error::ShiftError;
use super::naming;
use super::time_math;
use super::weekday::Weekday;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Frequency tag stored with every shift unless told otherwise.
pub const DEFAULT_FREQUENCY: &str = "Diarios";

/// One weekday's working window inside a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDetail {
    /// Store identifier; `None` until the row is allocated an id.
    pub detail_id: Option<i64>,
    /// Back-reference to the owning shift.
    pub shift_id: Option<i64>,
    pub weekday: Weekday,
    /// Entry time, minute precision.
    pub entry_time: NaiveTime,
    /// Window length in minutes; always positive.
    pub duration_minutes: u32,
}

impl ShiftDetail {
    /// Creates an unpersisted detail.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftError::InvalidSchedule`] for a zero-minute window.
    pub fn new(weekday: Weekday, entry_time: NaiveTime, duration_minutes: u32) -> Result<Self, ShiftError> {
        if duration_minutes == 0 {
            return Err(ShiftError::InvalidSchedule(format!("{} has a zero-minute duration", weekday)));
        }
        Ok(Self {
            detail_id: None,
            shift_id: None,
            weekday,
            entry_time: time_math::from_minutes(time_math::to_minutes(entry_time)),
            duration_minutes,
        })
    }

    /// Creates a detail that already exists in the store.
    pub fn persisted(detail_id: i64, shift_id: i64, weekday: Weekday, entry_time: NaiveTime, duration_minutes: u32) -> Result<Self, ShiftError> {
        let mut detail = Self::new(weekday, entry_time, duration_minutes)?;
        detail.detail_id = Some(detail_id);
        detail.shift_id = Some(shift_id);
        Ok(detail)
    }

    /// Exit time, always re-derived from entry and duration.
    pub fn exit_time(&self) -> NaiveTime {
        time_math::exit_time(self.entry_time, self.duration_minutes)
    }

    /// Entry as minutes since midnight.
    pub fn entry_minutes(&self) -> u32 {
        time_math::to_minutes(self.entry_time)
    }

    /// Exit as minutes since midnight.
    pub fn exit_minutes(&self) -> u32 {
        time_math::to_minutes(self.exit_time())
    }

    /// Whether two details describe the same window, ignoring identifiers.
    pub fn same_window(&self, other: &ShiftDetail) -> bool {
        self.entry_minutes() == other.entry_minutes() && self.duration_minutes == other.duration_minutes
    }
}

/// A named weekly work pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Store identifier; `None` until allocated at confirmation time.
    pub shift_id: Option<i64>,
    pub name: String,
    pub active: bool,
    pub frequency: String,
    details: BTreeMap<Weekday, ShiftDetail>,
    weekly_hours: f64,
}

impl Default for Shift {
    fn default() -> Self {
        Self {
            shift_id: None,
            name: naming::AUTO_NAME.to_string(),
            active: true,
            frequency: DEFAULT_FREQUENCY.to_string(),
            details: BTreeMap::new(),
            weekly_hours: 0.0,
        }
    }
}

impl Shift {
    /// Creates an empty, unidentified, active shift.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shift with a known identifier.
    pub fn with_id(shift_id: i64) -> Self {
        Self {
            shift_id: Some(shift_id),
            ..Self::default()
        }
    }

    /// Adds a detail for a weekday not yet present.
    ///
    /// Returns `false`, leaving the shift untouched, when the weekday already
    /// has a detail. On success the detail is re-parented to this shift and
    /// the weekly hours and name are recomputed.
    pub fn add_detail(&mut self, mut detail: ShiftDetail) -> bool {
        if self.details.contains_key(&detail.weekday) {
            return false;
        }
        if self.shift_id.is_some() {
            detail.shift_id = self.shift_id;
        }
        self.details.insert(detail.weekday, detail);
        self.recompute();
        true
    }

    /// Removes the detail for `weekday`, returning it when present.
    pub fn remove_detail(&mut self, weekday: Weekday) -> Option<ShiftDetail> {
        let removed = self.details.remove(&weekday);
        if removed.is_some() {
            self.recompute();
        }
        removed
    }

    /// Detail for `weekday`, if any.
    pub fn detail(&self, weekday: Weekday) -> Option<&ShiftDetail> {
        self.details.get(&weekday)
    }

    /// Details in weekday order.
    pub fn details(&self) -> impl Iterator<Item = &ShiftDetail> {
        self.details.values()
    }

    pub fn details_mut(&mut self) -> impl Iterator<Item = &mut ShiftDetail> {
        self.details.values_mut()
    }

    pub fn detail_count(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// The set of worked weekdays.
    pub fn weekdays(&self) -> BTreeSet<Weekday> {
        self.details.keys().copied().collect()
    }

    /// Sum of all durations, in hours.
    pub fn weekly_hours(&self) -> f64 {
        self.weekly_hours
    }

    /// Assigns the store identifier and re-parents the details.
    ///
    /// A synthesized name is refreshed to carry the new id; a name the user
    /// chose is kept as is.
    pub fn assign_id(&mut self, shift_id: i64) {
        let synthesized = self.name == self.synthesized_name();
        self.shift_id = Some(shift_id);
        for detail in self.details.values_mut() {
            detail.shift_id = Some(shift_id);
        }
        if synthesized {
            self.name = self.synthesized_name();
        }
    }

    /// Name derived from the current id and details.
    pub fn synthesized_name(&self) -> String {
        naming::synthesize(self.shift_id, self.details.values())
    }

    fn recompute(&mut self) {
        let minutes: u64 = self.details.values().map(|d| u64::from(d.duration_minutes)).sum();
        self.weekly_hours = minutes as f64 / 60.0;
        self.name = self.synthesized_name();
    }
}
