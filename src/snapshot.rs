//! Per-generation count snapshots

use std::collections::HashMap;

/// Invocation counts captured for one completed generation
///
/// Snapshots are produced by [`crate::Tracker::tick`] and never change
/// afterwards. Identifiers registered after the generation closed are not
/// present; [`Snapshot::count`] reports them as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    counts: HashMap<String, u64>,
}

impl Snapshot {
    /// Create a snapshot from a name → count map
    pub fn new(counts: HashMap<String, u64>) -> Self {
        Self { counts }
    }

    /// Count recorded for `name`, if it was registered when the generation closed
    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts.get(name).copied()
    }

    /// Count recorded for `name`, zero when absent
    pub fn count(&self, name: &str) -> u64 {
        self.get(name).unwrap_or(0)
    }

    /// Number of identifiers carried by this snapshot
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no identifier was registered when the generation closed
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts in this generation
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over (name, count) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl From<HashMap<String, u64>> for Snapshot {
    fn from(counts: HashMap<String, u64>) -> Self {
        Self::new(counts)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, count)| (name.into(), count))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_count_zero_fills() {
        let snap: Snapshot = [("f", 3)].into_iter().collect();
        assert_eq!(snap.count("f"), 3);
        assert_eq!(snap.count("late"), 0);
        assert_eq!(snap.get("late"), None);
    }

    #[test]
    fn test_snapshot_total() {
        let snap: Snapshot = [("f", 3), ("g", 4)].into_iter().collect();
        assert_eq!(snap.total(), 7);
        assert_eq!(snap.len(), 2);
    }

    #[test]
    fn test_snapshot_iter() {
        let snap: Snapshot = [("f", 3), ("g", 0)].into_iter().collect();
        let mut pairs: Vec<_> = snap.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("f", 3), ("g", 0)]);
    }

    #[test]
    fn test_snapshot_default_is_empty() {
        let snap = Snapshot::default();
        assert!(snap.is_empty());
        assert_eq!(snap.total(), 0);
    }
}
