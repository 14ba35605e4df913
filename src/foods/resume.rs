// ABOUTME: Keyed store of caller-supplied resume URLs, one entry per job id
// ABOUTME: Replaces a process-wide "last resume URL" with explicit job-scoped records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::resume::{ENTRY_TTL_SECS, SWEEP_THRESHOLD};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// A remembered callback URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEntry {
    /// Job the URL belongs to
    pub job_id: String,
    /// Callback URL as supplied
    pub resume_url: String,
    /// When it was last registered
    pub registered_at: DateTime<Utc>,
}

/// Concurrent job id to resume URL map, shared by all requests
///
/// Entries expire `ttl` after registration. Expired entries are dropped when
/// read, and swept in bulk once the map grows past `sweep_threshold`.
#[derive(Debug)]
pub struct ResumeStore {
    entries: DashMap<String, ResumeEntry>,
    ttl: Duration,
    sweep_threshold: usize,
}

impl ResumeStore {
    /// Create an empty store with the default expiry and sweep threshold
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Duration::seconds(ENTRY_TTL_SECS), SWEEP_THRESHOLD)
    }

    /// Create an empty store with custom limits
    #[must_use]
    pub fn with_limits(ttl: Duration, sweep_threshold: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            sweep_threshold,
        }
    }

    /// Remember `resume_url` for `job_id`, generating an id when none is given.
    /// Re-registering a job replaces its URL. Returns the job id used.
    pub fn register(&self, job_id: Option<String>, resume_url: impl Into<String>) -> String {
        let now = Utc::now();
        if self.entries.len() >= self.sweep_threshold {
            self.sweep_expired(now);
        }

        let job_id = job_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let entry = ResumeEntry {
            job_id: job_id.clone(),
            resume_url: resume_url.into(),
            registered_at: now,
        };
        self.entries.insert(job_id.clone(), entry);
        job_id
    }

    /// Entry registered for `job_id`, unless it has expired
    #[must_use]
    pub fn get(&self, job_id: &str) -> Option<ResumeEntry> {
        let now = Utc::now();
        if self
            .entries
            .remove_if(job_id, |_, entry| self.is_expired(entry, now))
            .is_some()
        {
            debug!(job.id = %job_id, "Resume URL expired");
            return None;
        }
        self.entries.get(job_id).map(|entry| entry.value().clone())
    }

    /// Number of stored entries, expired ones included until swept
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &ResumeEntry, now: DateTime<Utc>) -> bool {
        now - entry.registered_at >= self.ttl
    }

    /// Drop every expired entry
    fn sweep_expired(&self, now: DateTime<Utc>) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !self.is_expired(entry, now));
        debug!(
            removed = before.saturating_sub(self.entries.len()),
            "Swept expired resume URLs"
        );
    }
}

impl Default for ResumeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_with_explicit_job_id() {
        let store = ResumeStore::new();
        let job_id = store.register(Some("job-7".to_owned()), "https://example.com/r/7");

        assert_eq!(job_id, "job-7");
        assert_eq!(
            store.get("job-7").map(|e| e.resume_url),
            Some("https://example.com/r/7".to_owned())
        );
    }

    #[test]
    fn test_generated_job_ids_keep_entries_apart() {
        let store = ResumeStore::new();
        let first = store.register(None, "https://example.com/a");
        let second = store.register(None, "https://example.com/b");

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&first).unwrap().resume_url, "https://example.com/a");
        assert_eq!(store.get(&second).unwrap().resume_url, "https://example.com/b");
    }

    #[test]
    fn test_reregistering_replaces() {
        let store = ResumeStore::new();
        store.register(Some("job".to_owned()), "https://example.com/old");
        store.register(Some("job".to_owned()), "https://example.com/new");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("job").unwrap().resume_url, "https://example.com/new");
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let store = ResumeStore::with_limits(Duration::zero(), SWEEP_THRESHOLD);
        store.register(Some("job".to_owned()), "https://example.com/r");
        assert_eq!(store.len(), 1);

        assert!(store.get("job").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_registering_past_threshold_sweeps_expired_entries() {
        let store = ResumeStore::with_limits(Duration::zero(), 2);
        for n in 0..5 {
            store.register(None, format!("https://example.com/{n}"));
            assert!(store.len() <= 2);
        }
    }

    #[test]
    fn test_sweep_keeps_live_entries() {
        let store = ResumeStore::with_limits(Duration::hours(1), 2);
        let ids: Vec<String> = (0..4)
            .map(|n| store.register(None, format!("https://example.com/{n}")))
            .collect();

        assert_eq!(store.len(), 4);
        for id in &ids {
            assert!(store.get(id).is_some());
        }
    }
}
