//! Per-weekday comparison of an original shift and its edited copy.
//!
//! The classification drives both the change script and `Shifts::apply`:
//! modified details keep the original row's id so they can be updated in
//! place, removed details are the original rows, and added details stay
//! unidentified until the script synthesizer allocates them an id.

use super::shift::{Shift, ShiftDetail};
use super::weekday::Weekday;
use serde::Serialize;

/// Changes that turn `original` into `edited`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShiftDiff {
    pub added: Vec<ShiftDetail>,
    pub modified: Vec<ShiftDetail>,
    pub removed: Vec<ShiftDetail>,
    pub name_changed: bool,
    pub active_changed: bool,
}

impl ShiftDiff {
    /// Classifies every weekday present in either shift.
    ///
    /// Detail lists come out in weekday order.
    pub fn between(original: &Shift, edited: &Shift) -> Self {
        let mut diff = ShiftDiff {
            name_changed: edited.name != original.name,
            active_changed: edited.active != original.active,
            ..Default::default()
        };

        for weekday in Weekday::ALL {
            match (original.detail(weekday), edited.detail(weekday)) {
                (None, Some(new)) => diff.added.push(new.clone()),
                (Some(old), None) => diff.removed.push(old.clone()),
                (Some(old), Some(new)) if !old.same_window(new) => {
                    let mut changed = new.clone();
                    changed.detail_id = old.detail_id;
                    changed.shift_id = old.shift_id;
                    diff.modified.push(changed);
                }
                _ => {}
            }
        }

        diff
    }

    pub fn has_detail_changes(&self) -> bool {
        !(self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty())
    }

    /// Whether anything at all needs persisting.
    pub fn has_changes(&self) -> bool {
        self.has_detail_changes() || self.name_changed || self.active_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn original() -> Shift {
        let mut shift = Shift::with_id(30);
        let days = [Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday];
        for (i, day) in days.into_iter().enumerate() {
            shift.add_detail(ShiftDetail::persisted(300 + i as i64, 30, day, at(8), 480).unwrap());
        }
        shift
    }

    #[test]
    fn test_identical_copy_has_no_changes() {
        let shift = original();
        let diff = ShiftDiff::between(&shift, &shift.clone());
        assert!(!diff.has_changes());
        assert_eq!(diff, ShiftDiff::default());
    }

    #[test]
    fn test_remove_one_day_add_another() {
        let before = original();
        let mut after = before.clone();
        after.remove_detail(Weekday::Tuesday);
        after.add_detail(ShiftDetail::new(Weekday::Saturday, at(8), 480).unwrap());

        let diff = ShiftDiff::between(&before, &after);
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].weekday, Weekday::Tuesday);
        assert_eq!(diff.removed[0].detail_id, Some(301));
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].weekday, Weekday::Saturday);
        assert_eq!(diff.added[0].detail_id, None);
        assert!(diff.modified.is_empty());
        // Swapping days keeps the hours but not the day ranges.
        assert!(diff.name_changed);
        assert!(diff.has_changes());
    }

    #[test]
    fn test_modified_detail_keeps_original_id() {
        let before = original();
        let mut after = before.clone();
        after.remove_detail(Weekday::Wednesday);
        after.add_detail(ShiftDetail::new(Weekday::Wednesday, at(9), 480).unwrap());

        let diff = ShiftDiff::between(&before, &after);
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified[0].detail_id, Some(302));
        assert_eq!(diff.modified[0].entry_time, at(9));
        assert!(diff.added.is_empty() && diff.removed.is_empty());
        assert!(!diff.name_changed);
    }

    #[test]
    fn test_header_only_change() {
        let before = original();
        let mut after = before.clone();
        after.active = false;

        let diff = ShiftDiff::between(&before, &after);
        assert!(diff.active_changed);
        assert!(!diff.has_detail_changes());
        assert!(diff.has_changes());
    }
}
