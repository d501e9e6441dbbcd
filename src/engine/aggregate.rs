//! Result aggregation: dedup, source merge, and deterministic ordering.
//!
//! Probe outcomes arrive in completion order, which varies run to run. The
//! aggregator folds them into a `BTreeMap` keyed by the probe identity, so
//! the final report is always sorted ascending by key (numeric for ports,
//! lexicographic for hostnames) no matter how the pool scheduled the work.

use super::ProbeOutcome;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// A deduplicated discovery with its display payload and provenance tag.
#[derive(Debug, Clone, Serialize)]
pub struct FoundEntry<K> {
    pub key: K,
    pub payload: BTreeMap<String, String>,
    /// Which phase discovered this entry first, e.g. "crt.sh" or "dns".
    pub source: String,
}

/// Final, immutable result set of one scan run.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport<K> {
    /// Unique entries, sorted ascending by key.
    pub entries: Vec<FoundEntry<K>>,
    /// Number of brute-force jobs that were executed.
    ///
    /// When a passive phase contributed entries, `found_count()` may exceed
    /// this; it is then bounded by `total_jobs` plus the passive count.
    pub total_jobs: usize,
}

impl<K> AggregateReport<K> {
    pub fn found_count(&self) -> usize {
        self.entries.len()
    }
}

/// Accumulates discoveries from one or more phases of a scan.
///
/// Merge policy: first write wins. The passive phase is absorbed to
/// completion before any brute-force job runs, so provenance tagging is
/// deterministic, not a race.
#[derive(Debug)]
pub struct Aggregator<K: Ord + Clone> {
    entries: BTreeMap<K, FoundEntry<K>>,
    total_jobs: usize,
}

impl<K: Ord + Clone> Aggregator<K> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            total_jobs: 0,
        }
    }

    /// Record one discovery. A key already present keeps its original
    /// payload and source tag.
    pub fn insert(&mut self, key: K, payload: BTreeMap<String, String>, source: &str) {
        if let Entry::Vacant(slot) = self.entries.entry(key.clone()) {
            slot.insert(FoundEntry {
                key,
                payload,
                source: source.to_string(),
            });
        }
    }

    /// Absorb a batch of pool outcomes, keeping the successes and counting
    /// every outcome toward the job total.
    pub fn absorb(&mut self, outcomes: Vec<ProbeOutcome<K>>, source: &str) {
        self.total_jobs += outcomes.len();
        for outcome in outcomes {
            if outcome.success {
                self.insert(outcome.key, outcome.payload, source);
            }
        }
    }

    /// Finalize into the sorted, immutable report.
    pub fn finish(self) -> AggregateReport<K> {
        AggregateReport {
            entries: self.entries.into_values().collect(),
            total_jobs: self.total_jobs,
        }
    }
}

impl<K: Ord + Clone> Default for Aggregator<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FailureKind;

    fn payload(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_write_wins() {
        let mut agg = Aggregator::new();
        agg.insert("shop.example.test".to_string(), payload(&[]), "crt.sh");
        agg.insert(
            "shop.example.test".to_string(),
            payload(&[("ip", "10.0.0.9")]),
            "dns",
        );

        let report = agg.finish();
        assert_eq!(report.found_count(), 1);
        assert_eq!(report.entries[0].source, "crt.sh");
        assert!(report.entries[0].payload.is_empty());
    }

    #[test]
    fn test_overlapping_sources_never_double_count() {
        let mut agg = Aggregator::new();
        for name in ["a.test", "b.test", "c.test"] {
            agg.insert(name.to_string(), payload(&[]), "crt.sh");
        }
        let outcomes = vec![
            ProbeOutcome::found("b.test".to_string(), payload(&[("ip", "1.1.1.1")])),
            ProbeOutcome::found("d.test".to_string(), payload(&[("ip", "2.2.2.2")])),
            ProbeOutcome::missed("e.test".to_string(), FailureKind::NxDomain),
        ];
        agg.absorb(outcomes, "dns");

        let report = agg.finish();
        assert_eq!(report.found_count(), 4); // a, b, c, d — b merged, e missed
        assert_eq!(report.total_jobs, 3);
    }

    #[test]
    fn test_ordering_independent_of_arrival() {
        let names = ["ns1.example.test", "api.example.test", "www.example.test"];

        let mut forward = Aggregator::new();
        for n in names {
            forward.insert(n.to_string(), payload(&[]), "dns");
        }

        let mut reverse = Aggregator::new();
        for n in names.iter().rev() {
            reverse.insert(n.to_string(), payload(&[]), "dns");
        }

        let a: Vec<String> = forward.finish().entries.into_iter().map(|e| e.key).collect();
        let b: Vec<String> = reverse.finish().entries.into_iter().map(|e| e.key).collect();
        assert_eq!(a, b);
        assert_eq!(
            a,
            vec!["api.example.test", "ns1.example.test", "www.example.test"]
        );
    }

    #[test]
    fn test_numeric_keys_sort_ascending() {
        let mut agg = Aggregator::new();
        for port in [443u16, 22, 8080, 80] {
            agg.insert(port, payload(&[]), "tcp");
        }
        let keys: Vec<u16> = agg.finish().entries.into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![22, 80, 443, 8080]);
    }

    #[test]
    fn test_passive_entries_can_exceed_job_total() {
        let mut agg = Aggregator::new();
        for n in ["x.test", "y.test", "z.test"] {
            agg.insert(n.to_string(), payload(&[]), "crt.sh");
        }
        agg.absorb(
            vec![ProbeOutcome::<String>::missed(
                "w.test".to_string(),
                FailureKind::NxDomain,
            )],
            "dns",
        );

        let report = agg.finish();
        assert_eq!(report.total_jobs, 1);
        assert!(report.found_count() > report.total_jobs);
    }
}
