//! Display-name synthesis for shifts.
//!
//! Names follow the attendance office convention `"{id}-{hours} {days}"`,
//! for example `76-44 Lu a Vi` or `80-30 Lu a Mi/Vi`: the shift id, the
//! whole weekly hours, and the worked days compressed into runs of
//! consecutive weekdays.

use super::shift::ShiftDetail;
use super::weekday::Weekday;

/// Name used while a shift has no details yet.
pub const AUTO_NAME: &str = "(Auto)";

/// Prefix used in place of an id that has not been allocated yet.
pub const UNASSIGNED_ID: &str = "XX";

/// Builds the display name for a shift from its id and details.
///
/// Details may come in any order. Weekly hours are truncated to whole hours.
pub fn synthesize<'a, I>(shift_id: Option<i64>, details: I) -> String
where
    I: IntoIterator<Item = &'a ShiftDetail>,
{
    let mut days = Vec::new();
    let mut total_minutes: u64 = 0;
    for detail in details {
        days.push(detail.weekday);
        total_minutes += u64::from(detail.duration_minutes);
    }
    if days.is_empty() {
        return AUTO_NAME.to_string();
    }

    let prefix = shift_id.map(|id| id.to_string()).unwrap_or_else(|| UNASSIGNED_ID.to_string());
    format!("{}-{} {}", prefix, total_minutes / 60, day_ranges(days))
}

/// Renders weekdays as `/`-joined runs of consecutive days.
///
/// A run breaks wherever an ordinal is skipped, so Monday, Tuesday and
/// Thursday render as `Lu a Ma/Ju`.
pub fn day_ranges(mut days: Vec<Weekday>) -> String {
    days.sort();
    days.dedup();

    let mut runs: Vec<String> = Vec::new();
    let mut start = 0;
    while start < days.len() {
        let mut end = start;
        while end + 1 < days.len() && days[end + 1].ordinal() == days[end].ordinal() + 1 {
            end += 1;
        }
        if start == end {
            runs.push(days[start].abbrev().to_string());
        } else {
            runs.push(format!("{} a {}", days[start].abbrev(), days[end].abbrev()));
        }
        start = end + 1;
    }
    runs.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn detail(day: Weekday, duration: u32) -> ShiftDetail {
        ShiftDetail::new(day, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), duration).unwrap()
    }

    #[test]
    fn test_weekday_run_name() {
        let details = vec![
            detail(Weekday::Monday, 555),
            detail(Weekday::Tuesday, 555),
            detail(Weekday::Wednesday, 555),
            detail(Weekday::Thursday, 555),
            detail(Weekday::Friday, 420),
        ];
        assert_eq!(synthesize(Some(76), &details), "76-44 Lu a Vi");
    }

    #[test]
    fn test_gap_splits_runs() {
        let details = vec![
            detail(Weekday::Friday, 360),
            detail(Weekday::Monday, 360),
            detail(Weekday::Wednesday, 360),
            detail(Weekday::Tuesday, 360),
        ];
        assert_eq!(synthesize(Some(80), &details), "80-24 Lu a Mi/Vi");
    }

    #[test]
    fn test_single_days_and_weekend() {
        let details = vec![detail(Weekday::Monday, 240), detail(Weekday::Wednesday, 240), detail(Weekday::Saturday, 300), detail(Weekday::Sunday, 300)];
        assert_eq!(synthesize(Some(5), &details), "5-18 Lu/Mi/Sa a Do");
    }

    #[test]
    fn test_unassigned_id_and_empty() {
        let details = vec![detail(Weekday::Thursday, 90)];
        assert_eq!(synthesize(None, &details), "XX-1 Ju");
        assert_eq!(synthesize(Some(3), &Vec::new()), AUTO_NAME);
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let details = vec![detail(Weekday::Sunday, 100), detail(Weekday::Monday, 200)];
        assert_eq!(synthesize(Some(9), &details), synthesize(Some(9), &details));
    }
}
