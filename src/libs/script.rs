//! Change-script synthesis for the attendance store.
//!
//! Scripts are line-oriented SQL in the target store's dialect: `--` banners
//! between sections, one `;`-terminated statement per line, and a trailing
//! `COMMIT;`. Edit scripts always run header updates, then detail updates,
//! then deletes, then inserts.
//!
//! Synthesis is split in two phases. The `prepare_*` methods allocate every
//! missing identifier through an [`IdAllocator`] and fail before any text
//! exists; the `render_*` methods are pure and refuse input with missing
//! identifiers. A caller therefore gets either a complete script or an error.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveTime;
//! use shiftwise::libs::config::ScriptConfig;
//! use shiftwise::libs::repository::MemoryRepository;
//! use shiftwise::libs::script::ScriptSynthesizer;
//! use shiftwise::libs::shift::{Shift, ShiftDetail};
//! use shiftwise::libs::weekday::Weekday;
//!
//! let mut shift = Shift::new();
//! shift.add_detail(ShiftDetail::new(Weekday::Monday, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 480)?);
//!
//! let mut allocator = MemoryRepository::default();
//! let script = ScriptSynthesizer::new(ScriptConfig::default()).synthesize(&shift, None, &mut allocator)?;
//! assert!(script.contains("VALUES (1, 1, 'Lunes', TO_DATE('2025-01-01 09:00:00', 'YYYY-MM-DD HH24:MI:SS'), 480);"));
//! assert!(script.ends_with("COMMIT;\n"));
//! # Ok::<(), shiftwise::libs::error::ShiftError>(())
//! ```

use super::config::ScriptConfig;
use super::diff::ShiftDiff;
use super::error::ShiftError;
use super::repository::IdAllocator;
use super::shift::{Shift, ShiftDetail};
use chrono::{Local, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders creation and update scripts for shifts.
#[derive(Debug, Clone)]
pub struct ScriptSynthesizer {
    config: ScriptConfig,
    generated_at: Option<NaiveDateTime>,
}

impl ScriptSynthesizer {
    pub fn new(config: ScriptConfig) -> Self {
        Self { config, generated_at: None }
    }

    /// Pins the timestamp written into script headers. Defaults to the local clock.
    pub fn with_timestamp(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Creation script when `diff` is `None`, update script otherwise.
    ///
    /// For updates `shift` is the edited shift and must already be persisted.
    pub fn synthesize(&self, shift: &Shift, diff: Option<&ShiftDiff>, allocator: &mut dyn IdAllocator) -> Result<String, ShiftError> {
        match diff {
            None => {
                let prepared = self.prepare_creation(shift, allocator)?;
                self.render_creation(&prepared)
            }
            Some(diff) => {
                let prepared = self.prepare_diff(shift, diff, allocator)?;
                self.render_update(shift, &prepared)
            }
        }
    }

    /// Copy of `shift` with a shift id and a contiguous block of detail ids.
    ///
    /// Ids already present are kept. The synthesized name is refreshed when
    /// the shift id is allocated here.
    pub fn prepare_creation(&self, shift: &Shift, allocator: &mut dyn IdAllocator) -> Result<Shift, ShiftError> {
        if shift.is_empty() {
            return Err(ShiftError::InvalidSchedule(format!("shift '{}' has no details", shift.name)));
        }
        let mut prepared = shift.clone();
        if prepared.shift_id.is_none() {
            prepared.assign_id(allocator.next_shift_id()?);
        }
        if prepared.details().any(|d| d.detail_id.is_none()) {
            let base = allocator.next_detail_id()?;
            assign_detail_block(&mut prepared, base);
        }
        Ok(prepared)
    }

    /// Copy of `diff` whose added details carry a contiguous block of ids.
    pub fn prepare_diff(&self, shift: &Shift, diff: &ShiftDiff, allocator: &mut dyn IdAllocator) -> Result<ShiftDiff, ShiftError> {
        let shift_id = require_shift_id(shift)?;
        let mut prepared = diff.clone();
        if prepared.added.iter().any(|d| d.detail_id.is_none()) {
            let mut next = allocator.next_detail_id()?;
            for detail in prepared.added.iter_mut().filter(|d| d.detail_id.is_none()) {
                detail.detail_id = Some(next);
                next += 1;
            }
        }
        for detail in &mut prepared.added {
            detail.shift_id = Some(shift_id);
        }
        Ok(prepared)
    }

    /// Renders an update script for an already prepared diff.
    pub fn render_update(&self, shift: &Shift, diff: &ShiftDiff) -> Result<String, ShiftError> {
        let shift_id = require_shift_id(shift)?;
        let mut script = ScriptWriter::default();

        script.line("-- Script de actualización de turno");
        script.line(format!("-- Generado el {}", self.timestamp()));
        script.line(format!("-- Turno: {} (ID: {})", shift.name, shift_id));
        script.blank();

        if diff.active_changed {
            script.line("-- Actualización del estado del turno");
            script.line(format!(
                "UPDATE {} SET VIGENCIA = {} WHERE ID_TURNO = {};",
                self.config.shift_table,
                flag(shift.active),
                shift_id
            ));
            script.blank();
        }

        if diff.name_changed {
            script.line("-- Actualización del nombre del turno");
            script.line(format!(
                "UPDATE {} SET NOMBRE = {} WHERE ID_TURNO = {};",
                self.config.shift_table,
                quote(&shift.name),
                shift_id
            ));
            script.blank();
        }

        if !diff.modified.is_empty() {
            script.line("-- Actualización de detalles modificados");
            for detail in &diff.modified {
                script.line(format!(
                    "UPDATE {} SET HORA_INGRESO = {}, DURACION = {} WHERE ID_TURNO_DETALLE_DIARIO = {};",
                    self.config.detail_table,
                    self.time_literal(detail.entry_time),
                    detail.duration_minutes,
                    require_detail_id(detail)?
                ));
            }
            script.blank();
        }

        if !diff.removed.is_empty() {
            script.line("-- Eliminación de detalles");
            for detail in &diff.removed {
                script.line(format!(
                    "DELETE FROM {} WHERE ID_TURNO_DETALLE_DIARIO = {};",
                    self.config.detail_table,
                    require_detail_id(detail)?
                ));
            }
            script.blank();
        }

        if !diff.added.is_empty() {
            script.line("-- Inserción de nuevos detalles");
            for detail in &diff.added {
                script.line(self.detail_insert(shift_id, detail)?);
            }
            script.blank();
        }

        script.line("COMMIT;");
        Ok(script.finish())
    }

    /// Renders a creation script for a shift whose ids are all assigned.
    pub fn render_creation(&self, shift: &Shift) -> Result<String, ShiftError> {
        let shift_id = require_shift_id(shift)?;
        let mut script = ScriptWriter::default();

        script.line("-- Script de creación de turno");
        script.line(format!("-- Generado el {}", self.timestamp()));
        script.line(format!("-- Turno: {} (ID: {})", shift.name, shift_id));
        script.blank();
        self.write_creation_body(&mut script, shift)?;
        script.line("COMMIT;");
        Ok(script.finish())
    }

    /// Creation script for several new shifts in one transaction.
    ///
    /// One shift id and one detail id are requested from the allocator; each
    /// shift then takes the next shift id not already carried by another
    /// member of the batch, and a contiguous detail block right after the
    /// previous shift's block. Returns the script and the shifts with their
    /// ids filled in.
    pub fn batch_creation_script(&self, shifts: &[Shift], allocator: &mut dyn IdAllocator) -> Result<(String, Vec<Shift>), ShiftError> {
        if shifts.is_empty() {
            return Err(ShiftError::InvalidSchedule("no shifts to create".to_string()));
        }
        if let Some(empty) = shifts.iter().find(|s| s.is_empty()) {
            return Err(ShiftError::InvalidSchedule(format!("shift '{}' has no details", empty.name)));
        }
        let mut explicit_ids = BTreeSet::new();
        for id in shifts.iter().filter_map(|s| s.shift_id) {
            if !explicit_ids.insert(id) {
                return Err(ShiftError::InvalidSchedule(format!("shift id {} appears more than once in the batch", id)));
            }
        }

        let mut next_shift = if shifts.iter().any(|s| s.shift_id.is_none()) { allocator.next_shift_id()? } else { 0 };
        let mut next_detail = if shifts.iter().flat_map(|s| s.details()).any(|d| d.detail_id.is_none()) {
            allocator.next_detail_id()?
        } else {
            0
        };

        let mut prepared = Vec::with_capacity(shifts.len());
        for shift in shifts {
            let mut shift = shift.clone();
            if shift.shift_id.is_none() {
                while explicit_ids.contains(&next_shift) {
                    next_shift += 1;
                }
                shift.assign_id(next_shift);
                next_shift += 1;
            }
            next_detail = assign_detail_block(&mut shift, next_detail);
            prepared.push(shift);
        }

        let mut script = ScriptWriter::default();
        script.line("-- Script SQL para todos los turnos creados");
        script.line(format!("-- Total de turnos: {}", prepared.len()));
        script.line(format!("-- Fecha de generación: {}", self.timestamp()));
        script.blank();
        for (i, shift) in prepared.iter().enumerate() {
            script.line(format!("-- ======== TURNO {}: {} ========", i + 1, shift.name));
            self.write_creation_body(&mut script, shift)?;
        }
        script.line("COMMIT;");

        Ok((script.finish(), prepared))
    }

    fn write_creation_body(&self, script: &mut ScriptWriter, shift: &Shift) -> Result<(), ShiftError> {
        let shift_id = require_shift_id(shift)?;
        let frequency = match shift.frequency.trim() {
            "" => self.config.default_frequency.as_str(),
            frequency => frequency,
        };

        script.line(format!("-- Inserción de un nuevo turno con ID {}", shift_id));
        script.line(format!(
            "INSERT INTO {} (ID_TURNO, NOMBRE, VIGENCIA, FRECUENCIA) VALUES ({}, {}, {}, {});",
            self.config.shift_table,
            shift_id,
            quote(&shift.name),
            flag(shift.active),
            quote(frequency)
        ));
        script.blank();

        script.line(format!("-- Inserción de detalles para el turno {}", shift_id));
        for detail in shift.details() {
            script.line(self.detail_insert(shift_id, detail)?);
        }
        script.blank();
        Ok(())
    }

    fn detail_insert(&self, shift_id: i64, detail: &ShiftDetail) -> Result<String, ShiftError> {
        Ok(format!(
            "INSERT INTO {} (ID_TURNO_DETALLE_DIARIO, ID_TURNO, JORNADA, HORA_INGRESO, DURACION) VALUES ({}, {}, {}, {}, {});",
            self.config.detail_table,
            require_detail_id(detail)?,
            shift_id,
            quote(detail.weekday.as_str()),
            self.time_literal(detail.entry_time),
            detail.duration_minutes
        ))
    }

    /// The store keeps entry times in a full timestamp column, pinned to the anchor date.
    fn time_literal(&self, time: NaiveTime) -> String {
        format!("TO_DATE('{} {}:00', 'YYYY-MM-DD HH24:MI:SS')", self.config.anchor_date, time.format("%H:%M"))
    }

    fn timestamp(&self) -> String {
        self.generated_at
            .unwrap_or_else(|| Local::now().naive_local())
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}

#[derive(Default)]
struct ScriptWriter {
    out: String,
}

impl ScriptWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Gives every unidentified detail the next id from `next`; returns the first unused id.
fn assign_detail_block(shift: &mut Shift, mut next: i64) -> i64 {
    let shift_id = shift.shift_id;
    for detail in shift.details_mut() {
        if detail.detail_id.is_none() {
            detail.detail_id = Some(next);
            next += 1;
        }
        detail.shift_id = shift_id;
    }
    next
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

/// SQL string literal with embedded quotes doubled.
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn flag(active: bool) -> u8 {
    u8::from(active)
}
