//! Flags shared by the commands that produce change scripts.

use crate::{
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
    },
    msg_print,
};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ScriptOutputArgs {
    /// Also write the result to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// What to write to --output
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Sql)]
    pub format: ExportFormat,
    /// Persist the changes to the local store as well
    #[arg(long)]
    pub apply: bool,
}

impl ScriptOutputArgs {
    /// Prints the script and exports it, or the data behind it, when `--output` is set.
    pub fn emit<T: Serialize>(&self, script: &str, data: &T) -> Result<()> {
        msg_print!(Message::ScriptHeader, true);
        print!("{}", script);

        if let Some(path) = &self.output {
            let exporter = Exporter::new(self.format, Some(path.clone()));
            match exporter.format() {
                ExportFormat::Sql => exporter.export_script(script)?,
                ExportFormat::Json => exporter.export_json(data)?,
            }
        }
        Ok(())
    }
}
