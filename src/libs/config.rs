//! Configuration for matching and script rendering.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! application data directory resolved by [`DataStorage`]. A missing file is
//! not an error: every section has defaults matching the attendance store in
//! production, so the tool works before `shiftwise init` has ever run.
//!
//! ```json
//! {
//!   "matching": { "policy": "strict", "entry_tolerance_minutes": 5, "duration_tolerance_minutes": 10 },
//!   "script": {
//!     "shift_table": "ASISTENCIAS.TURNO",
//!     "detail_table": "ASISTENCIAS.TURNO_DETALLE_DIARIO",
//!     "anchor_date": "2025-01-01",
//!     "default_frequency": "Diarios"
//!   }
//! }
//! ```

use super::data_storage::DataStorage;
use super::messages::Message;
use super::shift::DEFAULT_FREQUENCY;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Which tiers the match engine runs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicyKind {
    /// Identity, embedded id and exact schedule.
    #[default]
    Strict,
    /// Adds the tolerant-schedule tier.
    Tolerant,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    pub policy: MatchPolicyKind,
    /// Largest entry time difference accepted by the tolerant tier.
    pub entry_tolerance_minutes: u32,
    /// Largest duration difference accepted by the tolerant tier.
    pub duration_tolerance_minutes: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicyKind::Strict,
            entry_tolerance_minutes: 5,
            duration_tolerance_minutes: 10,
        }
    }
}

/// Target schema details baked into generated scripts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScriptConfig {
    pub shift_table: String,
    pub detail_table: String,
    /// Date part of every entry time literal, `YYYY-MM-DD`.
    pub anchor_date: String,
    /// Frequency written for shifts that carry none.
    pub default_frequency: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            shift_table: "ASISTENCIAS.TURNO".to_string(),
            detail_table: "ASISTENCIAS.TURNO_DETALLE_DIARIO".to_string(),
            anchor_date: "2025-01-01".to_string(),
            default_frequency: DEFAULT_FREQUENCY.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub matching: MatchConfig,
    pub script: ScriptConfig,
}

impl Config {
    /// Reads the configuration from the data directory, or defaults when no file exists.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Rejects values that would produce unusable scripts.
    pub fn validate(&self) -> Result<()> {
        if NaiveDate::parse_from_str(&self.script.anchor_date, "%Y-%m-%d").is_err() {
            msg_bail_anyhow!(Message::InvalidAnchorDate(self.script.anchor_date.clone()));
        }
        Ok(())
    }

    /// Interactive wizard over the existing (or default) configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        let modules = [Message::ConfigModuleMatching.to_string(), Message::ConfigModuleScript.to_string()];
        let selected = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for index in selected {
            match index {
                0 => {
                    msg_print!(Message::ConfigModuleMatching);
                    let policies = ["strict", "tolerant"];
                    let current = match config.matching.policy {
                        MatchPolicyKind::Strict => 0,
                        MatchPolicyKind::Tolerant => 1,
                    };
                    let policy = Select::with_theme(&theme)
                        .with_prompt(Message::PromptMatchPolicy.to_string())
                        .items(&policies)
                        .default(current)
                        .interact()?;
                    config.matching = MatchConfig {
                        policy: if policy == 1 { MatchPolicyKind::Tolerant } else { MatchPolicyKind::Strict },
                        entry_tolerance_minutes: Input::with_theme(&theme)
                            .with_prompt(Message::PromptEntryTolerance.to_string())
                            .default(config.matching.entry_tolerance_minutes)
                            .interact_text()?,
                        duration_tolerance_minutes: Input::with_theme(&theme)
                            .with_prompt(Message::PromptDurationTolerance.to_string())
                            .default(config.matching.duration_tolerance_minutes)
                            .interact_text()?,
                    };
                }
                1 => {
                    msg_print!(Message::ConfigModuleScript);
                    let default = config.script.clone();
                    config.script = ScriptConfig {
                        shift_table: Input::with_theme(&theme)
                            .with_prompt(Message::PromptShiftTable.to_string())
                            .default(default.shift_table)
                            .interact_text()?,
                        detail_table: Input::with_theme(&theme)
                            .with_prompt(Message::PromptDetailTable.to_string())
                            .default(default.detail_table)
                            .interact_text()?,
                        anchor_date: Input::with_theme(&theme)
                            .with_prompt(Message::PromptAnchorDate.to_string())
                            .default(default.anchor_date)
                            .validate_with(|input: &String| -> Result<(), String> {
                                NaiveDate::parse_from_str(input, "%Y-%m-%d")
                                    .map(|_| ())
                                    .map_err(|_| Message::InvalidAnchorDate(input.clone()).to_string())
                            })
                            .interact_text()?,
                        default_frequency: Input::with_theme(&theme)
                            .with_prompt(Message::PromptDefaultFrequency.to_string())
                            .default(default.default_frequency)
                            .interact_text()?,
                    };
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "matching": { "policy": "tolerant" } }"#).unwrap();
        assert_eq!(config.matching.policy, MatchPolicyKind::Tolerant);
        assert_eq!(config.matching.entry_tolerance_minutes, 5);
        assert_eq!(config.script, ScriptConfig::default());
    }

    #[test]
    fn test_invalid_anchor_date_is_rejected() {
        let mut config = Config::default();
        config.script.anchor_date = "01/01/2025".to_string();
        assert!(config.validate().is_err());
    }
}
