#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use shiftwise::db::db::Db;
    use shiftwise::db::shifts::Shifts;
    use shiftwise::libs::config::ScriptConfig;
    use shiftwise::libs::diff::ShiftDiff;
    use shiftwise::libs::matcher::{MatchEngine, MatchPolicy, MatchTier};
    use shiftwise::libs::repository::{IdAllocator, ShiftRepository};
    use shiftwise::libs::script::ScriptSynthesizer;
    use shiftwise::libs::shift::{Shift, ShiftDetail};
    use shiftwise::libs::weekday::Weekday;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ShiftsTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for ShiftsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("shiftwise.db");
            ShiftsTestContext { _temp_dir: temp_dir, db_path }
        }
    }

    impl ShiftsTestContext {
        fn shifts(&self) -> Shifts {
            Shifts::from_db(Db::open(&self.db_path).unwrap())
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    /// Allocates ids through the store and persists a new shift.
    fn create(shifts: &mut Shifts, days: &[Weekday], entry: NaiveTime) -> Shift {
        let mut shift = Shift::new();
        for day in days {
            shift.add_detail(ShiftDetail::new(*day, entry, 480).unwrap());
        }
        let prepared = ScriptSynthesizer::new(ScriptConfig::default()).prepare_creation(&shift, shifts).unwrap();
        shifts.insert(&prepared).unwrap();
        prepared
    }

    #[test_context(ShiftsTestContext)]
    #[test]
    fn test_insert_and_query(ctx: &mut ShiftsTestContext) {
        let mut shifts = ctx.shifts();
        assert!(shifts.query_all().unwrap().is_empty());

        let created = create(&mut shifts, &[Weekday::Friday, Weekday::Monday], at(22, 0));
        assert_eq!(created.shift_id, Some(1));
        assert_eq!(created.name, "1-16 Lu/Vi");

        let fetched = shifts.query_by_id(1).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.detail(Weekday::Monday).unwrap().exit_time(), at(6, 0));
        assert!(shifts.query_by_id(2).unwrap().is_none());
    }

    #[test_context(ShiftsTestContext)]
    #[test]
    fn test_allocator_follows_stored_ids(ctx: &mut ShiftsTestContext) {
        let mut shifts = ctx.shifts();
        assert_eq!(shifts.next_shift_id().unwrap(), 1);
        assert_eq!(shifts.next_detail_id().unwrap(), 1);

        create(&mut shifts, &[Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday], at(9, 0));
        assert_eq!(shifts.next_shift_id().unwrap(), 2);
        assert_eq!(shifts.next_detail_id().unwrap(), 4);
    }

    #[test_context(ShiftsTestContext)]
    #[test]
    fn test_query_by_name_and_weekdays(ctx: &mut ShiftsTestContext) {
        let mut shifts = ctx.shifts();
        let mut night = create(&mut shifts, &[Weekday::Saturday, Weekday::Sunday], at(22, 0));
        create(&mut shifts, &[Weekday::Monday], at(9, 0));

        night.name = "Guardia nocturna".to_string();
        shifts.apply(&night, &ShiftDiff { name_changed: true, ..Default::default() }).unwrap();

        let found = shifts.query_by_name("NOCTURNA").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].shift_id, night.shift_id);

        let weekend = shifts.query_by_weekday_set(&[Weekday::Saturday, Weekday::Sunday].into_iter().collect()).unwrap();
        assert_eq!(weekend.len(), 1);
        assert!(shifts.query_by_weekday_set(&[Weekday::Saturday].into_iter().collect()).unwrap().is_empty());
    }

    #[test_context(ShiftsTestContext)]
    #[test]
    fn test_apply_diff(ctx: &mut ShiftsTestContext) {
        let mut shifts = ctx.shifts();
        let original = create(&mut shifts, &[Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday], at(9, 0));

        let mut edited = original.clone();
        edited.remove_detail(Weekday::Tuesday);
        let monday = edited.remove_detail(Weekday::Monday).unwrap();
        edited.add_detail(ShiftDetail { entry_time: at(8, 30), ..monday });
        edited.add_detail(ShiftDetail::new(Weekday::Saturday, at(10, 0), 240).unwrap());
        edited.active = false;

        let diff = ShiftDiff::between(&original, &edited);
        let prepared = ScriptSynthesizer::new(ScriptConfig::default()).prepare_diff(&edited, &diff, &mut shifts).unwrap();
        shifts.apply(&edited, &prepared).unwrap();

        let stored = shifts.query_by_id(1).unwrap().unwrap();
        assert!(!stored.active);
        assert_eq!(stored.weekdays(), [Weekday::Monday, Weekday::Wednesday, Weekday::Saturday].into_iter().collect());
        let monday = stored.detail(Weekday::Monday).unwrap();
        assert_eq!((monday.detail_id, monday.entry_time), (Some(1), at(8, 30)));
        assert_eq!(stored.detail(Weekday::Saturday).unwrap().detail_id, Some(4));
        assert_eq!(stored.name, "1-20 Lu/Mi/Sa");
    }

    #[test_context(ShiftsTestContext)]
    #[test]
    fn test_set_active(ctx: &mut ShiftsTestContext) {
        let mut shifts = ctx.shifts();
        create(&mut shifts, &[Weekday::Monday], at(9, 0));

        shifts.set_active(1, false).unwrap();
        assert!(!shifts.query_by_id(1).unwrap().unwrap().active);
        shifts.set_active(1, true).unwrap();
        assert!(shifts.query_by_id(1).unwrap().unwrap().active);

        assert!(shifts.set_active(42, true).is_err());
    }

    #[test_context(ShiftsTestContext)]
    #[test]
    fn test_corrupted_rows_are_skipped(ctx: &mut ShiftsTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        db.conn
            .execute_batch(
                "INSERT INTO shifts (id, name, active, frequency) VALUES (5, 'Legacy', 1, 'Diarios');
                 INSERT INTO shift_details (id, shift_id, weekday, entry_time, duration) VALUES (10, 5, 'MARTES', '09:00:00', 480);
                 INSERT INTO shift_details (id, shift_id, weekday, entry_time, duration) VALUES (11, 5, 'Feriado', '09:00:00', 480);
                 INSERT INTO shift_details (id, shift_id, weekday, entry_time, duration) VALUES (12, 5, 'lunes', '08:00:00', 480);
                 INSERT INTO shift_details (id, shift_id, weekday, entry_time, duration) VALUES (13, 5, 'Lunes', '07:00:00', 480);",
            )
            .unwrap();
        let shifts = Shifts::from_db(db);

        let legacy = shifts.query_by_id(5).unwrap().unwrap();
        assert_eq!(legacy.weekdays(), [Weekday::Monday, Weekday::Tuesday].into_iter().collect());
        // First stored row wins for a repeated weekday.
        assert_eq!(legacy.detail(Weekday::Monday).unwrap().detail_id, Some(12));
        assert_eq!(legacy.name, "Legacy");
    }

    #[test_context(ShiftsTestContext)]
    #[test]
    fn test_match_against_store(ctx: &mut ShiftsTestContext) {
        let mut shifts = ctx.shifts();
        create(&mut shifts, &[Weekday::Monday, Weekday::Tuesday], at(9, 0));

        let mut candidate = Shift::new();
        candidate.add_detail(ShiftDetail::new(Weekday::Tuesday, at(9, 0), 480).unwrap());
        candidate.add_detail(ShiftDetail::new(Weekday::Monday, at(9, 0), 480).unwrap());

        let matches = MatchEngine::new(&shifts, MatchPolicy::strict()).find_matches(&candidate).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].shift_id, matches[0].tier), (1, MatchTier::ExactSchedule));
    }
}
