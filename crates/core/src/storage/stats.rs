use serde::{Deserialize, Serialize};

/// Summary of one store write.
///
/// `added + skipped == total` and `skipped == pending + existing` always hold
/// for stats produced by the bookkeeper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveStats {
    pub name: String,
    pub table: String,
    pub total: usize,
    pub added: usize,
    pub pending: usize,
    pub existing: usize,
    pub skipped: usize,
}

impl SaveStats {
    pub fn new(name: impl Into<String>, table: impl Into<String>, total: usize) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            total,
            ..Default::default()
        }
    }

    pub(crate) fn count_pending(&mut self) {
        self.pending += 1;
        self.skipped += 1;
    }

    pub(crate) fn count_existing(&mut self) {
        self.existing += 1;
        self.skipped += 1;
    }

    /// Whether the counters satisfy the save invariants.
    pub fn is_consistent(&self) -> bool {
        self.added + self.skipped == self.total && self.skipped == self.pending + self.existing
    }
}
