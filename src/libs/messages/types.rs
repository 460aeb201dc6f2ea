#[derive(Debug, Clone)]
pub enum Message {
    // === SHIFT MESSAGES ===
    ShiftNotFound(i64),
    ShiftsNotFound,
    ShiftsHeader,
    ShiftDetailsHeader(String),   // name
    ShiftSearchNoResults(String), // search text
    ShiftCreated(i64, String),    // id, name
    ShiftActivated(i64),
    ShiftDeactivated(i64),
    ShiftAlreadyActive(i64),
    ShiftAlreadyInactive(i64),
    ShiftsCreated(usize),

    // === SCHEDULE MESSAGES ===
    UnrecognizedWeekday(String),
    SkippedDetailRow(i64, String), // detail id, weekday
    CandidateLoaded(String, String), // path, name
    CandidateInvalidTime(String),
    CandidateMissingDuration(String), // weekday
    CandidateDuplicateWeekday(String),
    CandidateNoDetails(String), // path

    // === MATCH MESSAGES ===
    MatchFound(i64, String), // id, tier
    MatchCorpusSize(usize),
    NoMatchesFound,
    MatchesFound(usize),
    MatchesMore(usize),
    MatchHeader(i64, String, String), // id, name, tier
    DuplicateShiftsFound(String),     // candidate name

    // === SCRIPT MESSAGES ===
    ScriptHeader,
    ScriptExported(String), // path
    NoChangesDetected,
    DiffSummary(usize, usize, usize), // added, modified, removed
    ChangesApplied(i64),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleMatching,
    ConfigModuleScript,
    PromptSelectModules,
    PromptMatchPolicy,
    PromptEntryTolerance,
    PromptDurationTolerance,
    PromptShiftTable,
    PromptDetailTable,
    PromptAnchorDate,
    PromptDefaultFrequency,
    InvalidAnchorDate(String),

    // === DATABASE MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    NothingToRollback,
    RollingBack(u32, u32), // from, to
    RollbackCompleted(u32),
    DatabaseVersion(u32),
    DatabaseNeedsUpdate,
    DatabaseUpToDate,
    MigrationHistory,
    MigrationHistoryEntry(u32, String, String), // version, name, applied at
}
