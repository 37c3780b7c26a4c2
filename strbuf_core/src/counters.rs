use serde::Serialize;

/// Caller-owned usage totals.
///
/// There is no global instance: code that wants to record usage takes a
/// `&mut UsageCounters`. Both totals only grow and saturate at `u64::MAX`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UsageCounters {
    bytes: u64,
    operations: u64,
}

/// Point-in-time copy of a [`UsageCounters`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct UsageSnapshot {
    pub bytes_total: u64,
    pub operations_total: u64,
}

impl UsageCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_bytes(&mut self, n: usize) {
        let n = u64::try_from(n).unwrap_or(u64::MAX);
        self.bytes = self.bytes.saturating_add(n);
    }

    pub fn record_operation(&mut self) {
        self.operations = self.operations.saturating_add(1);
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            bytes_total: self.bytes,
            operations_total: self.operations,
        }
    }
}

impl UsageSnapshot {
    /// Renders the snapshot as a compact JSON object for diagnostics output.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
