//! Duplicate and conflict detection for candidate shifts.
//!
//! Given a candidate shift, [`MatchEngine`] looks for existing shifts that
//! the candidate would duplicate or overwrite. Rules are evaluated as
//! ordered tiers and every hit is kept, deduplicated by shift id:
//!
//! 1. **Identity**: the candidate carries an id that exists in the store.
//! 2. **Embedded id**: the candidate's name starts with a numeric token
//!    before `-` (`"77-44 Lu a Vi"` names shift 77) that exists in the store.
//! 3. **Exact schedule**: same weekday set, and on every weekday the same
//!    entry minute and exit minute.
//! 4. **Tolerant schedule** (tolerant policy only): same weekday set, entry
//!    within 5 minutes and duration within 10 minutes on every weekday.
//!
//! Identity and embedded-id hits come first, then exact, then tolerant hits,
//! each group in store order. Under the strict policy an identity hit is
//! returned on its own, as the record being edited.
//!
//! A store failure propagates as [`ShiftError::Repository`]; an empty list
//! always means "no duplicates", never "could not look".

use super::config::{MatchConfig, MatchPolicyKind};
use super::error::ShiftError;
use super::messages::Message;
use super::repository::ShiftRepository;
use super::shift::{Shift, ShiftDetail};
use crate::msg_debug;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MatchTier {
    Identity,
    EmbeddedId,
    ExactSchedule,
    TolerantSchedule,
}

impl MatchTier {
    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Identity => "same id",
            MatchTier::EmbeddedId => "id in name",
            MatchTier::ExactSchedule => "exact schedule",
            MatchTier::TolerantSchedule => "similar schedule",
        }
    }
}

/// An existing shift that overlaps the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftMatch {
    pub shift_id: i64,
    pub name: String,
    pub details: Vec<ShiftDetail>,
    pub tier: MatchTier,
}

impl ShiftMatch {
    fn new(shift: &Shift, shift_id: i64, tier: MatchTier) -> Self {
        Self {
            shift_id,
            name: shift.name.clone(),
            details: shift.details().cloned().collect(),
            tier,
        }
    }
}

/// Tolerances applied by the matching tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    /// Enables the tolerant-schedule tier and keeps scanning after an identity hit.
    pub tolerant: bool,
    pub entry_tolerance_minutes: u32,
    pub duration_tolerance_minutes: u32,
}

impl MatchPolicy {
    /// Identity, embedded id and exact schedule only.
    pub fn strict() -> Self {
        Self {
            tolerant: false,
            ..Self::tolerant()
        }
    }

    /// All four tiers with the default 5/10 minute tolerances.
    pub fn tolerant() -> Self {
        Self {
            tolerant: true,
            entry_tolerance_minutes: 5,
            duration_tolerance_minutes: 10,
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

impl From<&MatchConfig> for MatchPolicy {
    fn from(config: &MatchConfig) -> Self {
        Self {
            tolerant: config.policy == MatchPolicyKind::Tolerant,
            entry_tolerance_minutes: config.entry_tolerance_minutes,
            duration_tolerance_minutes: config.duration_tolerance_minutes,
        }
    }
}

/// Resolves a candidate shift against the store's corpus.
pub struct MatchEngine<'a, R: ShiftRepository + ?Sized> {
    repository: &'a R,
    policy: MatchPolicy,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, R: ShiftRepository + ?Sized> MatchEngine<'a, R> {
    pub fn new(repository: &'a R, policy: MatchPolicy) -> Self {
        Self {
            repository,
            policy,
            cancel: None,
        }
    }

    /// Aborts corpus scans with [`ShiftError::Cancelled`] once `flag` is set.
    pub fn with_cancellation(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Finds every existing shift the candidate duplicates or overwrites.
    pub fn find_matches(&self, candidate: &Shift) -> Result<Vec<ShiftMatch>, ShiftError> {
        let mut matches: Vec<ShiftMatch> = Vec::new();

        if let Some(id) = candidate.shift_id.filter(|id| *id > 0) {
            if let Some(existing) = self.repository.query_by_id(id)? {
                msg_debug!(Message::MatchFound(id, MatchTier::Identity.label().to_string()));
                matches.push(ShiftMatch::new(&existing, id, MatchTier::Identity));
                if !self.policy.tolerant {
                    return Ok(matches);
                }
            }
        }

        if let Some(id) = embedded_id(&candidate.name) {
            if !contains(&matches, id) {
                if let Some(existing) = self.repository.query_by_id(id)? {
                    msg_debug!(Message::MatchFound(id, MatchTier::EmbeddedId.label().to_string()));
                    matches.push(ShiftMatch::new(&existing, id, MatchTier::EmbeddedId));
                }
            }
        }

        if candidate.is_empty() {
            return Ok(matches);
        }

        let days = candidate.weekdays();
        let corpus = self.repository.query_by_weekday_set(&days)?;
        msg_debug!(Message::MatchCorpusSize(corpus.len()));

        let mut tolerant_hits = Vec::new();
        for existing in &corpus {
            if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(ShiftError::Cancelled);
            }
            let Some(id) = existing.shift_id else { continue };
            if contains(&matches, id) || existing.weekdays() != days {
                continue;
            }
            if same_schedule(candidate, existing) {
                msg_debug!(Message::MatchFound(id, MatchTier::ExactSchedule.label().to_string()));
                matches.push(ShiftMatch::new(existing, id, MatchTier::ExactSchedule));
            } else if self.policy.tolerant && similar_schedule(candidate, existing, &self.policy) {
                msg_debug!(Message::MatchFound(id, MatchTier::TolerantSchedule.label().to_string()));
                tolerant_hits.push(ShiftMatch::new(existing, id, MatchTier::TolerantSchedule));
            }
        }
        matches.extend(tolerant_hits);

        Ok(matches)
    }
}

/// Numeric id at the start of a shift name, as in `"77-44 Lu a Vi"`.
pub fn embedded_id(name: &str) -> Option<i64> {
    let (token, _) = name.split_once('-')?;
    let token = token.trim();
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|id| *id > 0)
}

fn contains(matches: &[ShiftMatch], shift_id: i64) -> bool {
    matches.iter().any(|m| m.shift_id == shift_id)
}

/// Zero-tolerance comparison, keyed by weekday. Callers guarantee equal weekday sets.
fn same_schedule(candidate: &Shift, existing: &Shift) -> bool {
    candidate.details().all(|wanted| {
        existing
            .detail(wanted.weekday)
            .is_some_and(|found| found.entry_minutes() == wanted.entry_minutes() && found.exit_minutes() == wanted.exit_minutes())
    })
}

fn similar_schedule(candidate: &Shift, existing: &Shift, policy: &MatchPolicy) -> bool {
    candidate.details().all(|wanted| {
        existing.detail(wanted.weekday).is_some_and(|found| {
            found.entry_minutes().abs_diff(wanted.entry_minutes()) <= policy.entry_tolerance_minutes
                && found.duration_minutes.abs_diff(wanted.duration_minutes) <= policy.duration_tolerance_minutes
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_id() {
        assert_eq!(embedded_id("77-44 Lu a Vi"), Some(77));
        assert_eq!(embedded_id(" 12 -8 Lu"), Some(12));
        assert_eq!(embedded_id("XX-44 Lu a Vi"), None);
        assert_eq!(embedded_id("Turno noche"), None);
        assert_eq!(embedded_id("-44"), None);
        assert_eq!(embedded_id("0-10 Lu"), None);
    }
}
