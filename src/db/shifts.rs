//! SQLite persistence for shifts.
//!
//! [`Shifts`] is the concrete store behind the [`ShiftRepository`] and
//! [`IdAllocator`] contracts. Shifts are rebuilt from their detail rows by
//! re-adding every row through [`Shift::add_detail`], so a corrupted row
//! (unknown weekday, second row for the same day) is skipped with a warning
//! instead of producing a shift that breaks the model's invariants.

use crate::db::db::Db;
use crate::libs::diff::ShiftDiff;
use crate::libs::error::ShiftError;
use crate::libs::messages::Message;
use crate::libs::repository::{IdAllocator, ShiftRepository};
use crate::libs::shift::{Shift, ShiftDetail};
use crate::libs::weekday::{self, Weekday};
use crate::{msg_error_anyhow, msg_warning};
use anyhow::Result;
use chrono::NaiveTime;
use rusqlite::{params, Connection, Params};
use std::collections::HashMap;

const SELECT_SHIFTS: &str = "SELECT id, name, active, frequency FROM shifts ORDER BY id";
const SELECT_SHIFT_BY_ID: &str = "SELECT id, name, active, frequency FROM shifts WHERE id = ?1";
const SELECT_SHIFTS_BY_NAME: &str = "SELECT id, name, active, frequency FROM shifts WHERE UPPER(name) LIKE UPPER(?1) ORDER BY id";
const SELECT_DETAILS: &str = "SELECT id, shift_id, weekday, entry_time, duration FROM shift_details ORDER BY shift_id, id";
const SELECT_DETAILS_BY_SHIFT: &str = "SELECT id, shift_id, weekday, entry_time, duration FROM shift_details WHERE shift_id = ?1 ORDER BY id";
const INSERT_SHIFT: &str = "INSERT INTO shifts (id, name, active, frequency) VALUES (?1, ?2, ?3, ?4)";
const INSERT_DETAIL: &str = "INSERT INTO shift_details (id, shift_id, weekday, entry_time, duration) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_ACTIVE: &str = "UPDATE shifts SET active = ?2 WHERE id = ?1";
const UPDATE_NAME: &str = "UPDATE shifts SET name = ?2 WHERE id = ?1";
const UPDATE_DETAIL: &str = "UPDATE shift_details SET entry_time = ?2, duration = ?3 WHERE id = ?1";
const DELETE_DETAIL: &str = "DELETE FROM shift_details WHERE id = ?1";
const NEXT_SHIFT_ID: &str = "SELECT COALESCE(MAX(id), 0) + 1 FROM shifts";
const NEXT_DETAIL_ID: &str = "SELECT COALESCE(MAX(id), 0) + 1 FROM shift_details";

struct ShiftRow {
    id: i64,
    name: String,
    active: bool,
    frequency: String,
}

struct DetailRow {
    id: i64,
    shift_id: i64,
    weekday: String,
    entry_time: NaiveTime,
    duration: u32,
}

pub struct Shifts {
    conn: Connection,
}

impl Shifts {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    /// Persists a fully identified shift and its details in one transaction.
    pub fn insert(&mut self, shift: &Shift) -> Result<()> {
        let shift_id = require_shift_id(shift)?;
        let tx = self.conn.transaction()?;
        tx.execute(INSERT_SHIFT, params![shift_id, shift.name, shift.active, shift.frequency])?;
        for detail in shift.details() {
            tx.execute(INSERT_DETAIL, detail_params(shift_id, detail)?)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn set_active(&mut self, shift_id: i64, active: bool) -> Result<()> {
        let affected = self.conn.execute(UPDATE_ACTIVE, params![shift_id, active])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::ShiftNotFound(shift_id)));
        }
        Ok(())
    }

    /// Persists a prepared diff: header updates, detail updates, deletes, then inserts.
    pub fn apply(&mut self, shift: &Shift, diff: &ShiftDiff) -> Result<()> {
        let shift_id = require_shift_id(shift)?;
        let tx = self.conn.transaction()?;

        if diff.active_changed {
            tx.execute(UPDATE_ACTIVE, params![shift_id, shift.active])?;
        }
        if diff.name_changed {
            tx.execute(UPDATE_NAME, params![shift_id, shift.name])?;
        }
        for detail in &diff.modified {
            let detail_id = require_detail_id(detail)?;
            tx.execute(UPDATE_DETAIL, params![detail_id, detail.entry_time, detail.duration_minutes])?;
        }
        for detail in &diff.removed {
            tx.execute(DELETE_DETAIL, params![require_detail_id(detail)?])?;
        }
        for detail in &diff.added {
            tx.execute(INSERT_DETAIL, detail_params(shift_id, detail)?)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn load<P: Params>(&self, sql: &str, params: P, single: Option<i64>) -> Result<Vec<Shift>, ShiftError> {
        let mut stmt = self.conn.prepare(sql)?;
        let headers = stmt
            .query_map(params, |row| {
                Ok(ShiftRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    active: row.get(2)?,
                    frequency: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let mut details: HashMap<i64, Vec<DetailRow>> = HashMap::new();
        let rows = match single {
            Some(shift_id) => self.detail_rows(SELECT_DETAILS_BY_SHIFT, params![shift_id])?,
            None => self.detail_rows(SELECT_DETAILS, [])?,
        };
        for row in rows {
            details.entry(row.shift_id).or_default().push(row);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let rows = details.remove(&header.id).unwrap_or_default();
                build_shift(header, rows)
            })
            .collect())
    }

    fn detail_rows<P: Params>(&self, sql: &str, params: P) -> Result<Vec<DetailRow>, ShiftError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| {
                Ok(DetailRow {
                    id: row.get(0)?,
                    shift_id: row.get(1)?,
                    weekday: row.get(2)?,
                    entry_time: row.get(3)?,
                    duration: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn next_id(&self, sql: &str) -> Result<i64, ShiftError> {
        self.conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(|e| ShiftError::Allocation(e.to_string()))
    }
}

/// Rebuilds a shift from its stored rows. Rows the model cannot hold are skipped.
fn build_shift(header: ShiftRow, mut rows: Vec<DetailRow>) -> Shift {
    rows.sort_by_cached_key(|row| weekday::ordinal_or_last(&row.weekday));

    let mut shift = Shift::with_id(header.id);
    for row in rows {
        let detail = Weekday::canonicalize(&row.weekday)
            .and_then(|day| ShiftDetail::persisted(row.id, row.shift_id, day, row.entry_time, row.duration));
        let added = match detail {
            Ok(detail) => shift.add_detail(detail),
            Err(_) => false,
        };
        if !added {
            msg_warning!(Message::SkippedDetailRow(row.id, row.weekday));
        }
    }

    shift.name = header.name;
    shift.active = header.active;
    shift.frequency = header.frequency;
    shift
}

fn detail_params(shift_id: i64, detail: &ShiftDetail) -> Result<(i64, i64, &'static str, NaiveTime, u32)> {
    Ok((require_detail_id(detail)?, shift_id, detail.weekday.as_str(), detail.entry_time, detail.duration_minutes))
}

fn require_shift_id(shift: &Shift) -> Result<i64, ShiftError> {
    shift
        .shift_id
        .ok_or_else(|| ShiftError::InvalidSchedule(format!("shift '{}' has no id", shift.name)))
}

fn require_detail_id(detail: &ShiftDetail) -> Result<i64, ShiftError> {
    detail
        .detail_id
        .ok_or_else(|| ShiftError::InvalidSchedule(format!("{} detail has no id", detail.weekday)))
}

impl ShiftRepository for Shifts {
    fn query_all(&self) -> Result<Vec<Shift>, ShiftError> {
        self.load(SELECT_SHIFTS, [], None)
    }

    fn query_by_id(&self, shift_id: i64) -> Result<Option<Shift>, ShiftError> {
        Ok(self.load(SELECT_SHIFT_BY_ID, params![shift_id], Some(shift_id))?.into_iter().next())
    }

    fn query_by_name(&self, text: &str) -> Result<Vec<Shift>, ShiftError> {
        self.load(SELECT_SHIFTS_BY_NAME, params![format!("%{}%", text)], None)
    }
}

impl IdAllocator for Shifts {
    fn next_shift_id(&mut self) -> Result<i64, ShiftError> {
        self.next_id(NEXT_SHIFT_ID)
    }

    fn next_detail_id(&mut self) -> Result<i64, ShiftError> {
        self.next_id(NEXT_DETAIL_ID)
    }
}
