use crate::{
    db::shifts::Shifts,
    libs::{messages::Message, repository::ShiftRepository, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show active shifts
    #[arg(short, long)]
    active: bool,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let shifts: Vec<_> = Shifts::new()?
        .query_all()?
        .into_iter()
        .filter(|shift| !args.active || shift.active)
        .collect();

    if shifts.is_empty() {
        msg_info!(Message::ShiftsNotFound);
        return Ok(());
    }
    msg_print!(Message::ShiftsHeader, true);
    View::shifts(&shifts);
    Ok(())
}
