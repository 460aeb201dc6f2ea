//! Update scripts for an existing shift.
//!
//! The candidate file describes the shift as it should look afterwards. Only
//! the weekdays whose window actually changed end up in the script.

use super::output::ScriptOutputArgs;
use crate::{
    db::shifts::Shifts,
    libs::{
        cache::CachedRepository,
        candidate::ShiftInput,
        config::Config,
        diff::ShiftDiff,
        matcher::{MatchEngine, MatchPolicy},
        messages::Message,
        repository::ShiftRepository,
        script::ScriptSynthesizer,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the shift to edit
    id: i64,
    /// Edited shift file (JSON)
    file: PathBuf,
    #[command(flatten)]
    output: ScriptOutputArgs,
}

pub fn cmd(args: EditArgs) -> Result<()> {
    let config = Config::read()?;
    let mut repository = CachedRepository::new(Shifts::new()?);

    let Some(original) = repository.query_by_id(args.id)? else {
        msg_bail_anyhow!(Message::ShiftNotFound(args.id));
    };
    let edited = ShiftInput::from_file(&args.file)?.apply_to(&original)?;
    if edited.is_empty() {
        msg_bail_anyhow!(Message::CandidateNoDetails(args.file.display().to_string()));
    }
    let diff = ShiftDiff::between(&original, &edited);

    if !diff.has_changes() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }
    msg_info!(Message::DiffSummary(diff.added.len(), diff.modified.len(), diff.removed.len()));

    if diff.has_detail_changes() {
        let engine = MatchEngine::new(&repository, MatchPolicy::from(&config.matching));
        let others: Vec<_> = engine.find_matches(&edited)?.into_iter().filter(|m| m.shift_id != args.id).collect();
        if !others.is_empty() {
            msg_warning!(Message::DuplicateShiftsFound(edited.name.clone()));
            View::matches(&others);
        }
    }

    let synthesizer = ScriptSynthesizer::new(config.script);
    let prepared = synthesizer.prepare_diff(&edited, &diff, repository.inner_mut())?;
    let script = synthesizer.render_update(&edited, &prepared)?;
    args.output.emit(&script, &prepared)?;

    if args.output.apply {
        repository.inner_mut().apply(&edited, &prepared)?;
        repository.invalidate();
        msg_success!(Message::ChangesApplied(args.id));
    }
    Ok(())
}
