use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use lanward_common::models::ScanRecord;

/// Rolling, newest-first record of finished scans.
pub struct ScanHistory {
    capacity: usize,
    records: Mutex<VecDeque<ScanRecord>>,
}

impl ScanHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Inserts `record` and evicts the oldest beyond capacity in one critical section.
    pub fn push(&self, record: ScanRecord) {
        let mut records = self.lock();
        records.push_front(record);
        records.truncate(self.capacity);
    }

    pub fn snapshot(&self) -> Vec<ScanRecord> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the deque half-written.
    fn lock(&self) -> MutexGuard<'_, VecDeque<ScanRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lanward_common::models::Stats;

    fn record(scan_id: u64) -> ScanRecord {
        ScanRecord {
            scan_id,
            timestamp: Utc::now(),
            duration_ms: 1,
            device_count: 0,
            succeeded: true,
            stats: Stats::default(),
        }
    }

    #[test]
    fn newest_first_and_capped() {
        let history = ScanHistory::new(10);
        for id in 1..=11 {
            history.push(record(id));
        }

        let ids: Vec<u64> = history.snapshot().iter().map(|r| r.scan_id).collect();
        assert_eq!(ids, (2..=11).rev().collect::<Vec<u64>>());
        assert_eq!(history.len(), 10);
    }

    #[test]
    fn starts_empty() {
        let history = ScanHistory::new(3);
        assert!(history.is_empty());
        assert!(history.snapshot().is_empty());
    }

    #[test]
    fn concurrent_pushes_never_exceed_capacity() {
        let history = std::sync::Arc::new(ScanHistory::new(5));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let history = std::sync::Arc::clone(&history);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        history.push(record(t * 100 + i));
                        assert!(history.len() <= 5);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(history.len(), 5);
    }
}
