//! Recent searches, newest first, capped.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use camsearch_resolve::{MatchType, SearchOutcome};

pub const HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub id: String,
    pub query: String,
    pub keyword: String,
    pub result_count: usize,
    pub match_type: MatchType,
    pub timestamp: DateTime<Utc>,
}

pub struct SearchHistory {
    records: RwLock<VecDeque<SearchRecord>>,
    capacity: usize,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Push a search to the front, dropping the oldest past capacity.
    pub fn record(&self, query: &str, outcome: &SearchOutcome) -> SearchRecord {
        let record = SearchRecord {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.trim().to_string(),
            keyword: outcome.keyword.clone(),
            result_count: outcome.matches.len(),
            match_type: outcome.match_type,
            timestamp: Utc::now(),
        };

        let mut records = self.records.write();
        records.push_front(record.clone());
        records.truncate(self.capacity);
        record
    }

    pub fn list(&self) -> Vec<SearchRecord> {
        self.records.read().iter().cloned().collect()
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id != id);
        records.len() != before
    }

    /// Drop everything. Returns how many records were removed.
    pub fn clear(&self) -> usize {
        let mut records = self.records.write();
        let removed = records.len();
        records.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
