//! Time-bounded query cache for shift repositories.
//!
//! Corpus queries against the attendance store are slow and repeated while a
//! user iterates on a candidate shift. [`ShiftCache`] keeps query results for
//! a fixed time-to-live and is owned by [`CachedRepository`]; the matching,
//! diff and script engines never see it.

use super::error::ShiftError;
use super::repository::ShiftRepository;
use super::shift::Shift;
use super::weekday::Weekday;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

/// Default lifetime of a cached query result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Key-value cache of query results with per-entry expiry.
#[derive(Debug)]
pub struct ShiftCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, Vec<Shift>)>,
}

impl Default for ShiftCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ShiftCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: HashMap::new() }
    }

    /// Cached value for `key`, unless missing or expired.
    pub fn get(&self, key: &str) -> Option<Vec<Shift>> {
        self.entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, shifts)| shifts.clone())
    }

    pub fn set(&mut self, key: impl Into<String>, shifts: Vec<Shift>) {
        self.entries.insert(key.into(), (Instant::now(), shifts));
    }

    /// Drops one entry.
    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Repository decorator that answers repeated queries from a [`ShiftCache`].
///
/// Writers must call [`CachedRepository::invalidate`] after persisting
/// changes through [`CachedRepository::inner_mut`].
pub struct CachedRepository<R> {
    inner: R,
    cache: Mutex<ShiftCache>,
}

impl<R: ShiftRepository> CachedRepository<R> {
    pub fn new(inner: R) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: R, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Mutex::new(ShiftCache::new(ttl)),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn invalidate(&self) {
        self.cache.lock().clear();
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn cached<F>(&self, key: String, query: F) -> Result<Vec<Shift>, ShiftError>
    where
        F: FnOnce(&R) -> Result<Vec<Shift>, ShiftError>,
    {
        if let Some(hit) = self.cache.lock().get(&key) {
            return Ok(hit);
        }
        // Failures are never cached.
        let shifts = query(&self.inner)?;
        self.cache.lock().set(key, shifts.clone());
        Ok(shifts)
    }
}

impl<R: ShiftRepository> ShiftRepository for CachedRepository<R> {
    fn query_all(&self) -> Result<Vec<Shift>, ShiftError> {
        self.cached("all".to_string(), |repo| repo.query_all())
    }

    fn query_by_id(&self, shift_id: i64) -> Result<Option<Shift>, ShiftError> {
        let shifts = self.cached(format!("id:{}", shift_id), |repo| Ok(repo.query_by_id(shift_id)?.into_iter().collect()))?;
        Ok(shifts.into_iter().next())
    }

    fn query_by_weekday_set(&self, days: &BTreeSet<Weekday>) -> Result<Vec<Shift>, ShiftError> {
        let key = days.iter().map(|d| d.abbrev()).collect::<Vec<_>>().join(",");
        self.cached(format!("days:{}", key), |repo| repo.query_by_weekday_set(days))
    }

    fn query_by_name(&self, text: &str) -> Result<Vec<Shift>, ShiftError> {
        self.cached(format!("name:{}", text.to_lowercase()), |repo| repo.query_by_name(text))
    }
}
