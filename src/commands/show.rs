use crate::{
    db::shifts::Shifts,
    libs::{messages::Message, repository::ShiftRepository, view::View},
    msg_bail_anyhow,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Shift ID
    id: i64,
}

pub fn cmd(args: ShowArgs) -> Result<()> {
    let Some(shift) = Shifts::new()?.query_by_id(args.id)? else {
        msg_bail_anyhow!(Message::ShiftNotFound(args.id));
    };
    View::shifts(std::slice::from_ref(&shift));
    View::shift(&shift);
    Ok(())
}
