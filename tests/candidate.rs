#[cfg(test)]
mod tests {
    use shiftwise::libs::candidate::ShiftInput;
    use shiftwise::libs::weekday::Weekday;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CandidateTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for CandidateTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("turno.json");
            CandidateTestContext { _temp_dir: temp_dir, path }
        }
    }

    #[test_context(CandidateTestContext)]
    #[test]
    fn test_candidate_from_file(ctx: &mut CandidateTestContext) {
        std::fs::write(
            &ctx.path,
            r#"{
                "details": [
                    { "weekday": "viernes", "entry": "22:00", "exit": "06:00" },
                    { "weekday": "Miercoles", "entry": "22:00", "duration": 480 }
                ]
            }"#,
        )
        .unwrap();

        let shift = ShiftInput::from_file(&ctx.path).unwrap().into_shift().unwrap();
        assert_eq!(shift.shift_id, None);
        assert_eq!(shift.name, "XX-16 Mi/Vi");
        assert!(shift.active);
        let weekdays: Vec<_> = shift.details().map(|d| d.weekday).collect();
        assert_eq!(weekdays, vec![Weekday::Wednesday, Weekday::Friday]);
        assert_eq!(shift.detail(Weekday::Friday).unwrap().duration_minutes, 480);
    }

    #[test_context(CandidateTestContext)]
    #[test]
    fn test_unreadable_candidates(ctx: &mut CandidateTestContext) {
        assert!(ShiftInput::from_file(&ctx.path).is_err());

        std::fs::write(&ctx.path, r#"{ "details": [], "color": "red" }"#).unwrap();
        let error = ShiftInput::from_file(&ctx.path).unwrap_err();
        assert!(error.to_string().contains("turno.json"));
    }
}
