//! Duplicate check for candidate shift files.

use crate::{
    db::shifts::Shifts,
    libs::{
        cache::CachedRepository,
        candidate::ShiftInput,
        config::Config,
        matcher::{MatchEngine, MatchPolicy},
        messages::Message,
        view::View,
    },
    msg_bail_anyhow, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Candidate shift files (JSON)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Also report shifts within the configured tolerances
    #[arg(short, long)]
    tolerant: bool,
}

pub fn cmd(args: CheckArgs) -> Result<()> {
    let config = Config::read()?;
    let mut policy = MatchPolicy::from(&config.matching);
    policy.tolerant |= args.tolerant;

    let repository = CachedRepository::new(Shifts::new()?);
    let engine = MatchEngine::new(&repository, policy);

    for path in &args.files {
        let candidate = ShiftInput::from_file(path)?.into_shift()?;
        if candidate.is_empty() {
            msg_bail_anyhow!(Message::CandidateNoDetails(path.display().to_string()));
        }
        msg_print!(Message::CandidateLoaded(path.display().to_string(), candidate.name.clone()), true);
        View::matches(&engine.find_matches(&candidate)?);
    }
    Ok(())
}
