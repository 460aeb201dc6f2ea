use super::output::ScriptOutputArgs;
use crate::{
    db::shifts::Shifts,
    libs::{config::Config, diff::ShiftDiff, messages::Message, repository::ShiftRepository, script::ScriptSynthesizer},
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Shift ID
    id: i64,
    #[command(flatten)]
    output: ScriptOutputArgs,
}

/// Emits the VIGENCIA update for one shift. `active` is the state to reach.
pub fn cmd(args: StatusArgs, active: bool) -> Result<()> {
    let config = Config::read()?;
    let mut shifts = Shifts::new()?;

    let Some(original) = shifts.query_by_id(args.id)? else {
        msg_bail_anyhow!(Message::ShiftNotFound(args.id));
    };
    if original.active == active {
        let message = if active { Message::ShiftAlreadyActive(args.id) } else { Message::ShiftAlreadyInactive(args.id) };
        msg_info!(message);
        return Ok(());
    }

    let mut edited = original.clone();
    edited.active = active;
    let diff = ShiftDiff::between(&original, &edited);

    let script = ScriptSynthesizer::new(config.script).render_update(&edited, &diff)?;
    args.output.emit(&script, &diff)?;

    if args.output.apply {
        shifts.set_active(args.id, active)?;
        let message = if active { Message::ShiftActivated(args.id) } else { Message::ShiftDeactivated(args.id) };
        msg_success!(message);
    }
    Ok(())
}
