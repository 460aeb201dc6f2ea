//! Creation scripts for one or more new shifts.
//!
//! Every candidate is checked against the store first. A candidate that
//! duplicates an existing shift stops the whole batch unless `--force` is
//! given, so a script is never produced for only part of the files.

use super::output::ScriptOutputArgs;
use crate::{
    db::shifts::Shifts,
    libs::{
        cache::CachedRepository,
        candidate::ShiftInput,
        config::Config,
        matcher::{MatchEngine, MatchPolicy},
        messages::Message,
        script::ScriptSynthesizer,
        shift::Shift,
        view::View,
    },
    msg_bail_anyhow, msg_debug, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Candidate shift files (JSON), created in the given order
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Create candidates even when they duplicate existing shifts
    #[arg(long)]
    force: bool,
    #[command(flatten)]
    output: ScriptOutputArgs,
}

pub fn cmd(args: CreateArgs) -> Result<()> {
    let config = Config::read()?;
    let mut repository = CachedRepository::new(Shifts::new()?);

    let mut candidates: Vec<Shift> = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let candidate = ShiftInput::from_file(path)?.into_shift()?;
        if candidate.is_empty() {
            msg_bail_anyhow!(Message::CandidateNoDetails(path.display().to_string()));
        }
        msg_debug!(Message::CandidateLoaded(path.display().to_string(), candidate.name.clone()));
        candidates.push(candidate);
    }

    {
        let engine = MatchEngine::new(&repository, MatchPolicy::from(&config.matching));
        for candidate in &candidates {
            let matches = engine.find_matches(candidate)?;
            if matches.is_empty() {
                continue;
            }
            View::matches(&matches);
            if !args.force {
                msg_bail_anyhow!(Message::DuplicateShiftsFound(candidate.name.clone()));
            }
            msg_warning!(Message::DuplicateShiftsFound(candidate.name.clone()));
        }
    }

    let synthesizer = ScriptSynthesizer::new(config.script);
    let (script, prepared) = synthesizer.batch_creation_script(&candidates, repository.inner_mut())?;
    args.output.emit(&script, &prepared)?;

    if args.output.apply {
        let shifts = repository.inner_mut();
        for shift in &prepared {
            shifts.insert(shift)?;
            msg_success!(Message::ShiftCreated(shift.shift_id.unwrap_or_default(), shift.name.clone()));
        }
        repository.invalidate();
        msg_success!(Message::ShiftsCreated(prepared.len()));
    }
    Ok(())
}
