use super::matcher::ShiftMatch;
use super::messages::Message;
use super::naming;
use super::shift::{Shift, ShiftDetail};
use crate::msg_print;
use prettytable::{row, Table};

/// Matches listed in full before the rest is summarized.
pub const MATCHES_SHOWN: usize = 3;
/// Details listed per match.
pub const MATCH_DETAILS_SHOWN: usize = 3;

pub struct View {}

impl View {
    pub fn shifts(shifts: &[Shift]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DAYS", "HOURS", "ACTIVE", "FREQUENCY"]);
        for shift in shifts {
            table.add_row(row![
                shift.shift_id.map(|id| id.to_string()).unwrap_or_else(|| naming::UNASSIGNED_ID.to_string()),
                shift.name,
                naming::day_ranges(shift.weekdays().into_iter().collect()),
                format!("{:.2}", shift.weekly_hours()),
                if shift.active { "yes" } else { "no" },
                shift.frequency
            ]);
        }
        table.printstd();
    }

    pub fn shift(shift: &Shift) {
        msg_print!(Message::ShiftDetailsHeader(shift.name.clone()), true);
        Self::details(shift.details());
    }

    pub fn details<'a>(details: impl IntoIterator<Item = &'a ShiftDetail>) {
        let mut table = Table::new();

        table.add_row(row!["DETAIL ID", "DAY", "ENTRY", "EXIT", "DURATION"]);
        for detail in details {
            table.add_row(row![
                detail.detail_id.map(|id| id.to_string()).unwrap_or_default(),
                detail.weekday,
                detail.entry_time.format("%H:%M"),
                detail.exit_time().format("%H:%M"),
                format_minutes(detail.duration_minutes)
            ]);
        }
        table.printstd();
    }

    /// Prints the first few matches with a sample of their details.
    pub fn matches(matches: &[ShiftMatch]) {
        if matches.is_empty() {
            msg_print!(Message::NoMatchesFound);
            return;
        }
        msg_print!(Message::MatchesFound(matches.len()));
        for found in matches.iter().take(MATCHES_SHOWN) {
            msg_print!(Message::MatchHeader(found.shift_id, found.name.clone(), found.tier.label().to_string()));
            Self::details(found.details.iter().take(MATCH_DETAILS_SHOWN));
        }
        if matches.len() > MATCHES_SHOWN {
            msg_print!(Message::MatchesMore(matches.len() - MATCHES_SHOWN));
        }
    }
}

/// `555` minutes renders as `09:15`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(555), "09:15");
        assert_eq!(format_minutes(45), "00:45");
        assert_eq!(format_minutes(1440), "24:00");
    }
}
