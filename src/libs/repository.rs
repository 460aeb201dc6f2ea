//! Collaborator contracts consumed by the shift engines.
//!
//! The engines never talk to a database directly. They read the corpus of
//! existing shifts through [`ShiftRepository`] and obtain fresh identifiers
//! through [`IdAllocator`]. The SQLite store in `db::shifts` implements both;
//! [`MemoryRepository`] is an in-memory corpus for tests and dry runs.

use super::error::ShiftError;
use super::shift::Shift;
use super::weekday::Weekday;
use std::collections::BTreeSet;

/// Read-only access to persisted shifts.
///
/// Every returned shift is a fully populated snapshot. Implementations must
/// report an unreachable store as [`ShiftError::Repository`] rather than an
/// empty result.
pub trait ShiftRepository {
    /// All shifts, ordered by id.
    fn query_all(&self) -> Result<Vec<Shift>, ShiftError>;

    fn query_by_id(&self, shift_id: i64) -> Result<Option<Shift>, ShiftError>;

    /// Shifts whose worked weekdays are exactly `days`.
    fn query_by_weekday_set(&self, days: &BTreeSet<Weekday>) -> Result<Vec<Shift>, ShiftError> {
        Ok(self.query_all()?.into_iter().filter(|shift| &shift.weekdays() == days).collect())
    }

    /// Shifts whose name contains `text`, ignoring case.
    fn query_by_name(&self, text: &str) -> Result<Vec<Shift>, ShiftError> {
        let needle = text.to_lowercase();
        Ok(self.query_all()?.into_iter().filter(|shift| shift.name.to_lowercase().contains(&needle)).collect())
    }
}

/// Issues identifiers for rows about to be persisted.
///
/// Each call returns a value greater than any persisted id at call time.
/// Uniqueness across concurrent, unflushed allocators is not guaranteed.
pub trait IdAllocator {
    fn next_shift_id(&mut self) -> Result<i64, ShiftError>;

    fn next_detail_id(&mut self) -> Result<i64, ShiftError>;
}

/// In-memory shift corpus and allocator.
///
/// Allocation is monotonic over both stored ids and ids already handed out.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    shifts: Vec<Shift>,
    issued_shift_id: i64,
    issued_detail_id: i64,
    unavailable: bool,
}

impl MemoryRepository {
    pub fn new(shifts: Vec<Shift>) -> Self {
        let mut repo = Self::default();
        for shift in shifts {
            repo.insert(shift);
        }
        repo
    }

    /// A repository whose every call fails, standing in for an unreachable store.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Stores or replaces a shift, keeping the corpus ordered by id.
    pub fn insert(&mut self, shift: Shift) {
        if let Some(id) = shift.shift_id {
            self.shifts.retain(|s| s.shift_id != Some(id));
        }
        self.shifts.push(shift);
        self.shifts.sort_by_key(|s| s.shift_id);
    }

    fn check(&self) -> Result<(), ShiftError> {
        if self.unavailable {
            return Err(ShiftError::Repository("store unavailable".to_string()));
        }
        Ok(())
    }

    fn max_detail_id(&self) -> i64 {
        self.shifts.iter().flat_map(|s| s.details()).filter_map(|d| d.detail_id).max().unwrap_or(0)
    }

    fn max_shift_id(&self) -> i64 {
        self.shifts.iter().filter_map(|s| s.shift_id).max().unwrap_or(0)
    }
}

impl ShiftRepository for MemoryRepository {
    fn query_all(&self) -> Result<Vec<Shift>, ShiftError> {
        self.check()?;
        Ok(self.shifts.clone())
    }

    fn query_by_id(&self, shift_id: i64) -> Result<Option<Shift>, ShiftError> {
        self.check()?;
        Ok(self.shifts.iter().find(|s| s.shift_id == Some(shift_id)).cloned())
    }
}

impl IdAllocator for MemoryRepository {
    fn next_shift_id(&mut self) -> Result<i64, ShiftError> {
        if self.unavailable {
            return Err(ShiftError::Allocation("store unavailable".to_string()));
        }
        self.issued_shift_id = self.issued_shift_id.max(self.max_shift_id()) + 1;
        Ok(self.issued_shift_id)
    }

    fn next_detail_id(&mut self) -> Result<i64, ShiftError> {
        if self.unavailable {
            return Err(ShiftError::Allocation("store unavailable".to_string()));
        }
        self.issued_detail_id = self.issued_detail_id.max(self.max_detail_id()) + 1;
        Ok(self.issued_detail_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::ShiftDetail;
    use chrono::NaiveTime;

    fn shift(id: i64, days: &[Weekday], first_detail: i64) -> Shift {
        let mut shift = Shift::with_id(id);
        for (i, day) in days.iter().enumerate() {
            let detail = ShiftDetail::persisted(first_detail + i as i64, id, *day, NaiveTime::from_hms_opt(8, 0, 0).unwrap(), 480).unwrap();
            shift.add_detail(detail);
        }
        shift
    }

    #[test]
    fn test_weekday_set_query_requires_equal_sets() {
        let repo = MemoryRepository::new(vec![
            shift(1, &[Weekday::Monday, Weekday::Tuesday], 1),
            shift(2, &[Weekday::Monday], 3),
            shift(3, &[Weekday::Tuesday, Weekday::Monday], 4),
        ]);
        let days: BTreeSet<Weekday> = [Weekday::Monday, Weekday::Tuesday].into_iter().collect();
        let ids: Vec<Option<i64>> = repo.query_by_weekday_set(&days).unwrap().iter().map(|s| s.shift_id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut repo = MemoryRepository::new(vec![shift(7, &[Weekday::Monday, Weekday::Friday], 40)]);
        assert_eq!(repo.next_shift_id().unwrap(), 8);
        assert_eq!(repo.next_shift_id().unwrap(), 9);
        assert_eq!(repo.next_detail_id().unwrap(), 42);
        assert_eq!(repo.next_detail_id().unwrap(), 43);
    }

    #[test]
    fn test_unavailable_store_fails_loudly() {
        let mut repo = MemoryRepository::unavailable();
        assert!(matches!(repo.query_all(), Err(ShiftError::Repository(_))));
        assert!(matches!(repo.next_detail_id(), Err(ShiftError::Allocation(_))));
    }
}
