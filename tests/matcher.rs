#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use shiftwise::libs::error::ShiftError;
    use shiftwise::libs::matcher::{MatchEngine, MatchPolicy, MatchTier};
    use shiftwise::libs::repository::MemoryRepository;
    use shiftwise::libs::shift::{Shift, ShiftDetail};
    use shiftwise::libs::weekday::Weekday;
    use std::sync::atomic::AtomicBool;
    use test_context::{test_context, TestContext};

    const WORKWEEK: [Weekday; 5] = [Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday, Weekday::Friday];

    struct MatcherTestContext {
        corpus: MemoryRepository,
    }

    impl TestContext for MatcherTestContext {
        fn setup() -> Self {
            // 76 works Monday to Friday from 08:00, 77 is the office 09:00 week
            // with a short Friday, 78 adds Saturday to the office week.
            let mut detail_id = 100;
            let mut shifts = Vec::new();
            for (id, entry, days) in [
                (76, 8, WORKWEEK.to_vec()),
                (77, 9, WORKWEEK.to_vec()),
                (78, 9, WORKWEEK.iter().copied().chain([Weekday::Saturday]).collect()),
            ] {
                let mut shift = Shift::with_id(id);
                for day in days {
                    let duration = if day == Weekday::Friday { 420 } else { 555 };
                    shift.add_detail(ShiftDetail::persisted(detail_id, id, day, at(entry, 0), duration).unwrap());
                    detail_id += 1;
                }
                shifts.push(shift);
            }
            MatcherTestContext {
                corpus: MemoryRepository::new(shifts),
            }
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn office_week(shift_id: Option<i64>, entry: NaiveTime, long_day: u32) -> Shift {
        let mut shift = match shift_id {
            Some(id) => Shift::with_id(id),
            None => Shift::new(),
        };
        for day in WORKWEEK {
            let duration = if day == Weekday::Friday { 420 } else { long_day };
            shift.add_detail(ShiftDetail::new(day, entry, duration).unwrap());
        }
        shift
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_identity_hit_is_returned_alone(ctx: &mut MatcherTestContext) {
        // Same id as 76 but the schedule of 77.
        let candidate = office_week(Some(76), at(9, 0), 555);
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::strict()).find_matches(&candidate).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].shift_id, 76);
        assert_eq!(matches[0].tier, MatchTier::Identity);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_tolerant_policy_keeps_scanning_after_identity(ctx: &mut MatcherTestContext) {
        let candidate = office_week(Some(76), at(9, 0), 555);
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::tolerant()).find_matches(&candidate).unwrap();

        let found: Vec<_> = matches.iter().map(|m| (m.shift_id, m.tier)).collect();
        assert_eq!(found, vec![(76, MatchTier::Identity), (77, MatchTier::ExactSchedule)]);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_exact_schedule_without_id(ctx: &mut MatcherTestContext) {
        let candidate = office_week(None, at(9, 0), 555);
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::strict()).find_matches(&candidate).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].shift_id, 77);
        assert_eq!(matches[0].tier, MatchTier::ExactSchedule);
        assert_eq!(matches[0].details.len(), 5);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_id_embedded_in_name(ctx: &mut MatcherTestContext) {
        let mut candidate = office_week(None, at(7, 0), 600);
        candidate.name = "78-50 Lu a Sa".to_string();
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::strict()).find_matches(&candidate).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].shift_id, 78);
        assert_eq!(matches[0].tier, MatchTier::EmbeddedId);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_embedded_id_is_not_reported_twice(ctx: &mut MatcherTestContext) {
        let mut candidate = office_week(None, at(9, 0), 555);
        candidate.name = "77-44 Lu a Vi".to_string();
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::strict()).find_matches(&candidate).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tier, MatchTier::EmbeddedId);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_tolerance_only_under_tolerant_policy(ctx: &mut MatcherTestContext) {
        let candidate = office_week(None, at(9, 4), 563);

        let strict = MatchEngine::new(&ctx.corpus, MatchPolicy::strict()).find_matches(&candidate).unwrap();
        assert!(strict.is_empty());

        let tolerant = MatchEngine::new(&ctx.corpus, MatchPolicy::tolerant()).find_matches(&candidate).unwrap();
        assert_eq!(tolerant.len(), 1);
        assert_eq!(tolerant[0].shift_id, 77);
        assert_eq!(tolerant[0].tier, MatchTier::TolerantSchedule);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_tolerance_bounds_are_inclusive(ctx: &mut MatcherTestContext) {
        let policy = MatchPolicy::tolerant();

        let edge = office_week(None, at(9, 5), 565);
        assert_eq!(MatchEngine::new(&ctx.corpus, policy).find_matches(&edge).unwrap().len(), 1);

        let past_entry = office_week(None, at(9, 6), 555);
        assert!(MatchEngine::new(&ctx.corpus, policy).find_matches(&past_entry).unwrap().is_empty());

        let past_duration = office_week(None, at(9, 0), 566);
        assert!(MatchEngine::new(&ctx.corpus, policy).find_matches(&past_duration).unwrap().is_empty());
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_weekday_sets_must_be_equal(ctx: &mut MatcherTestContext) {
        // 77's windows without Friday.
        let mut candidate = office_week(None, at(9, 0), 555);
        candidate.remove_detail(Weekday::Friday);
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::tolerant()).find_matches(&candidate).unwrap();
        assert!(matches.is_empty());
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_empty_candidate_only_checks_ids(ctx: &mut MatcherTestContext) {
        let candidate = Shift::new();
        assert!(MatchEngine::new(&ctx.corpus, MatchPolicy::tolerant()).find_matches(&candidate).unwrap().is_empty());

        let candidate = Shift::with_id(78);
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::strict()).find_matches(&candidate).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_unknown_id_falls_through_to_schedule(ctx: &mut MatcherTestContext) {
        let candidate = office_week(Some(500), at(9, 0), 555);
        let matches = MatchEngine::new(&ctx.corpus, MatchPolicy::strict()).find_matches(&candidate).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].shift_id, 77);
    }

    #[test_context(MatcherTestContext)]
    #[test]
    fn test_cancellation_aborts_scan(ctx: &mut MatcherTestContext) {
        let cancel = AtomicBool::new(true);
        let candidate = office_week(None, at(9, 0), 555);
        let result = MatchEngine::new(&ctx.corpus, MatchPolicy::strict())
            .with_cancellation(&cancel)
            .find_matches(&candidate);
        assert!(matches!(result, Err(ShiftError::Cancelled)));
    }

    #[test]
    fn test_unreachable_store_is_an_error() {
        let repository = MemoryRepository::unavailable();
        let candidate = office_week(None, at(9, 0), 555);
        let result = MatchEngine::new(&repository, MatchPolicy::strict()).find_matches(&candidate);
        assert!(matches!(result, Err(ShiftError::Repository(_))));
    }
}
