//! Stability records and the per-package stats table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Slash-separated package path, e.g. `github.com/acme/tool/cmd`.
///
/// A package is the directory a file lives in. Equality is plain string
/// equality; no hierarchy is implied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PackageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Incoming and outgoing local import edges of one package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityRecord {
    /// Local import edges pointing into the package
    pub fan_in: u64,
    /// Local import edges originating from the package
    pub fan_out: u64,
}

impl StabilityRecord {
    /// `fan_out / (fan_in + fan_out)`, or exactly 0.0 when both are zero.
    pub fn instability(&self) -> f64 {
        let total = self.fan_in + self.fan_out;
        if total == 0 {
            return 0.0;
        }
        self.fan_out as f64 / total as f64
    }
}

/// Package identifier to stability record mapping.
///
/// Records are created on first reference with both counts at zero and are
/// only ever incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTable {
    records: HashMap<PackageId, StabilityRecord>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record for `id`, inserting a zeroed one if absent
    pub fn entry(&mut self, id: &PackageId) -> &mut StabilityRecord {
        self.records.entry(id.clone()).or_default()
    }

    /// Make sure `owner` has a record without touching any count
    pub fn touch(&mut self, owner: &PackageId) {
        self.entry(owner);
    }

    /// Record one local import edge `owner -> target`.
    ///
    /// Both increments happen together; a self edge bumps both counts of the
    /// same record.
    pub fn add_edge(&mut self, owner: &PackageId, target: &PackageId) {
        self.entry(owner).fan_out += 1;
        self.entry(target).fan_in += 1;
    }

    pub fn get(&self, id: &PackageId) -> Option<&StabilityRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageId, &StabilityRecord)> {
        self.records.iter()
    }

    /// Sum of all fan-in counts; always equal to [`StatsTable::total_fan_out`]
    pub fn total_fan_in(&self) -> u64 {
        self.records.values().map(|r| r.fan_in).sum()
    }

    /// Sum of all fan-out counts
    pub fn total_fan_out(&self) -> u64 {
        self.records.values().map(|r| r.fan_out).sum()
    }
}
