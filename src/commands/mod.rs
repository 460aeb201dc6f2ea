pub mod check;
pub mod create;
pub mod edit;
pub mod init;
pub mod list;
pub mod migrations;
mod output;
pub mod search;
pub mod show;
pub mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List stored shifts")]
    List(list::ListArgs),
    #[command(about = "Search shifts by name")]
    Search(search::SearchArgs),
    #[command(about = "Show a shift and its weekly details")]
    Show(show::ShowArgs),
    #[command(about = "Find existing shifts similar to candidate files")]
    Check(check::CheckArgs),
    #[command(about = "Generate the creation script for new shifts")]
    Create(create::CreateArgs),
    #[command(about = "Generate the update script for an edited shift")]
    Edit(edit::EditArgs),
    #[command(about = "Generate the script that activates a shift")]
    Activate(status::StatusArgs),
    #[command(about = "Generate the script that deactivates a shift")]
    Deactivate(status::StatusArgs),
    #[command(about = "Database migration status and history")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Search(args) => search::cmd(args),
            Commands::Show(args) => show::cmd(args),
            Commands::Check(args) => check::cmd(args),
            Commands::Create(args) => create::cmd(args),
            Commands::Edit(args) => edit::cmd(args),
            Commands::Activate(args) => status::cmd(args, true),
            Commands::Deactivate(args) => status::cmd(args, false),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
