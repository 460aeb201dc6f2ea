use crate::{
    db::shifts::Shifts,
    libs::{messages::Message, repository::ShiftRepository, view::View},
    msg_info,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Part of the shift name, case-insensitive
    text: String,
}

pub fn cmd(args: SearchArgs) -> Result<()> {
    let shifts = Shifts::new()?.query_by_name(&args.text)?;
    if shifts.is_empty() {
        msg_info!(Message::ShiftSearchNoResults(args.text));
        return Ok(());
    }
    View::shifts(&shifts);
    Ok(())
}
