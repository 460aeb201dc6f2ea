//! Weekday canonicalization.
//!
//! The attendance store and its historical front-ends spell weekdays in
//! several ways ("Miércoles", "MIERCOLES", "miercoles"). Every comparison in
//! the crate goes through [`Weekday::canonicalize`], which folds case and
//! accents and maps the result onto one of seven canonical days ordered
//! Monday (1) to Sunday (7).
//!
//! ## Usage
//!
//! ```rust
//! use shiftwise::libs::weekday::Weekday;
//!
//! let day = Weekday::canonicalize("MIÉRCOLES")?;
//! assert_eq!(day, Weekday::Wednesday);
//! assert_eq!(day.ordinal(), 3);
//! assert_eq!(day.abbrev(), "Mi");
//! # Ok::<(), shiftwise::libs::error::ShiftError>(())
//! ```

use super::error::ShiftError;
use super::messages::Message;
use crate::msg_warning;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal assigned to weekday text that cannot be canonicalized.
///
/// Such entries sort after every real weekday.
pub const UNRECOGNIZED_ORDINAL: u8 = 99;

/// One of the seven canonical weekdays.
///
/// Ordering follows the ordinal, so collections keyed by `Weekday` iterate
/// from Monday to Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Maps a weekday name variant onto its canonical day.
    ///
    /// Matching ignores case, surrounding whitespace and Spanish accents.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftError::UnrecognizedWeekday`] when the text names no
    /// known weekday.
    pub fn canonicalize(raw: &str) -> Result<Self, ShiftError> {
        match fold(raw).as_str() {
            "lunes" => Ok(Weekday::Monday),
            "martes" => Ok(Weekday::Tuesday),
            "miercoles" => Ok(Weekday::Wednesday),
            "jueves" => Ok(Weekday::Thursday),
            "viernes" => Ok(Weekday::Friday),
            "sabado" => Ok(Weekday::Saturday),
            "domingo" => Ok(Weekday::Sunday),
            _ => Err(ShiftError::UnrecognizedWeekday(raw.to_string())),
        }
    }

    /// Position in the week, Monday = 1 through Sunday = 7.
    pub fn ordinal(self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    /// Canonical token as stored in the `JORNADA` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miércoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }

    /// Two-letter abbreviation used in synthesized shift names.
    ///
    /// Accents are dropped, so Saturday renders as `Sa` rather than `Sá`.
    pub fn abbrev(self) -> &'static str {
        match self {
            Weekday::Monday => "Lu",
            Weekday::Tuesday => "Ma",
            Weekday::Wednesday => "Mi",
            Weekday::Thursday => "Ju",
            Weekday::Friday => "Vi",
            Weekday::Saturday => "Sa",
            Weekday::Sunday => "Do",
        }
    }
}

/// Sort key for raw weekday text coming from outside the typed model.
///
/// Unrecognized text is not fatal: a warning is logged and the entry gets
/// [`UNRECOGNIZED_ORDINAL`] so it sorts last.
pub fn ordinal_or_last(raw: &str) -> u8 {
    match Weekday::canonicalize(raw) {
        Ok(day) => day.ordinal(),
        Err(_) => {
            msg_warning!(Message::UnrecognizedWeekday(raw.to_string()));
            UNRECOGNIZED_ORDINAL
        }
    }
}

fn fold(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::canonicalize(s)
    }
}

impl TryFrom<String> for Weekday {
    type Error = ShiftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Weekday::canonicalize(&value)
    }
}

impl From<Weekday> for String {
    fn from(day: Weekday) -> Self {
        day.as_str().to_string()
    }
}
