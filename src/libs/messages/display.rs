//! Display implementation for shiftwise messages.
//!
//! All message text lives in one match so wording stays consistent across
//! commands. Shift names, weekday tokens and table names are interpolated
//! verbatim, since they are the attendance office's own vocabulary.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SHIFT MESSAGES ===
            Message::ShiftNotFound(id) => format!("Shift with ID {} not found.", id),
            Message::ShiftsNotFound => "No shifts stored yet.".to_string(),
            Message::ShiftsHeader => "Shifts".to_string(),
            Message::ShiftDetailsHeader(name) => format!("Shift {}", name),
            Message::ShiftSearchNoResults(text) => format!("No shifts match '{}'.", text),
            Message::ShiftCreated(id, name) => format!("Shift {} created as '{}'", id, name),
            Message::ShiftActivated(id) => format!("Shift {} is now active", id),
            Message::ShiftDeactivated(id) => format!("Shift {} is now inactive", id),
            Message::ShiftAlreadyActive(id) => format!("Shift {} is already active.", id),
            Message::ShiftAlreadyInactive(id) => format!("Shift {} is already inactive.", id),
            Message::ShiftsCreated(count) => format!("{} shift(s) created", count),

            // === SCHEDULE MESSAGES ===
            Message::UnrecognizedWeekday(raw) => format!("Unrecognized weekday '{}', ordering it last", raw),
            Message::SkippedDetailRow(id, raw) => format!("Skipping detail {} with weekday '{}'", id, raw),
            Message::CandidateLoaded(path, name) => format!("Loaded candidate '{}' from {}", name, path),
            Message::CandidateInvalidTime(raw) => format!("Invalid time '{}', expected HH:MM", raw),
            Message::CandidateMissingDuration(day) => format!("{} needs either a duration or an exit time", day),
            Message::CandidateDuplicateWeekday(day) => format!("{} appears more than once", day),
            Message::CandidateNoDetails(path) => format!("Candidate in {} has no details", path),

            // === MATCH MESSAGES ===
            Message::MatchFound(id, tier) => format!("Shift {} matches by {}", id, tier),
            Message::MatchCorpusSize(count) => format!("Comparing against {} shift(s) with the same days", count),
            Message::NoMatchesFound => "No existing shift matches this schedule.".to_string(),
            Message::MatchesFound(count) => format!("{} existing shift(s) match this schedule:", count),
            Message::MatchesMore(count) => format!("... and {} more", count),
            Message::MatchHeader(id, name, tier) => format!("{} - {} ({})", id, name, tier),
            Message::DuplicateShiftsFound(name) => {
                format!("'{}' duplicates an existing shift. Use --force to create it anyway.", name)
            }

            // === SCRIPT MESSAGES ===
            Message::ScriptHeader => "Change script:".to_string(),
            Message::ScriptExported(path) => format!("Script written to {}", path),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::DiffSummary(added, modified, removed) => {
                format!("{} added, {} modified, {} removed", added, modified, removed)
            }
            Message::ChangesApplied(id) => format!("Changes to shift {} applied to the local store", id),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleMatching => "Matching".to_string(),
            Message::ConfigModuleScript => "Script".to_string(),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptMatchPolicy => "Match policy".to_string(),
            Message::PromptEntryTolerance => "Entry time tolerance (minutes)".to_string(),
            Message::PromptDurationTolerance => "Duration tolerance (minutes)".to_string(),
            Message::PromptShiftTable => "Shift table".to_string(),
            Message::PromptDetailTable => "Shift detail table".to_string(),
            Message::PromptAnchorDate => "Anchor date for time literals (YYYY-MM-DD)".to_string(),
            Message::PromptDefaultFrequency => "Default frequency".to_string(),
            Message::InvalidAnchorDate(raw) => format!("'{}' is not a YYYY-MM-DD date", raw),

            // === DATABASE MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::NothingToRollback => "Nothing to rollback".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rolled back to v{}", version),
            Message::DatabaseVersion(version) => format!("Database version: {}", version),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => {
                format!("  v{}: {} (applied: {})", version, name, applied_at)
            }
        };
        write!(f, "{}", text)
    }
}
