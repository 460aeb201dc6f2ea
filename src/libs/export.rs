//! Writing generated artifacts to disk.
//!
//! Change scripts are exported as `.sql` files for the DBA to review and run.
//! The prepared shifts or diff behind a script can also be exported as JSON,
//! which is handy for attaching to a change request.
//!
//! ```rust,no_run
//! use shiftwise::libs::export::{ExportFormat, Exporter};
//!
//! let exporter = Exporter::new(ExportFormat::Sql, None);
//! exporter.export_script("COMMIT;\n")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::{libs::messages::Message, msg_bail_anyhow, msg_success};
use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// The change script itself.
    Sql,
    /// The shifts or diff the script was rendered from.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Sql => "sql",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without a path, writes `shiftwise_<timestamp>.<ext>` in the working directory.
    /// A given path always gets the format's extension.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = match output_path {
            Some(path) => path.with_extension(format.extension()),
            None => PathBuf::from(format!("shiftwise_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), format.extension())),
        };
        Self { format, output_path }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export_script(&self, script: &str) -> Result<()> {
        if self.format != ExportFormat::Sql {
            msg_bail_anyhow!(format!("{} export expects structured data, not a script", self.format.extension()));
        }
        self.write(script.as_bytes())
    }

    pub fn export_json<T: Serialize>(&self, data: &T) -> Result<()> {
        if self.format != ExportFormat::Json {
            msg_bail_anyhow!(format!("{} export expects a script, not structured data", self.format.extension()));
        }
        let json = serde_json::to_string_pretty(data)?;
        self.write(json.as_bytes())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        File::create(&self.output_path)?.write_all(bytes)?;
        msg_success!(Message::ScriptExported(self.output_path.display().to_string()));
        Ok(())
    }
}
