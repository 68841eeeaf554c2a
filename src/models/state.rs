use serde::{Deserialize, Serialize};

/// Progress of an rsync run as derived from its `--progress` output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(rename = "remain")]
    pub remaining: u64,
    pub total: u64,
    pub speed: String,
    #[serde(rename = "progress")]
    pub percent: f64,
}

impl State {
    const MAX_PERCENT: f64 = 100.0;
    const MIN_DIVIDER: f64 = 1.0;

    /// Stores the counters and recomputes `percent` from them.
    /// `total` is floored at 1 so a zero total never divides by zero.
    pub fn set_counts(&mut self, remaining: u64, total: u64) {
        self.remaining = remaining;
        self.total = total;

        let copied = total as f64 - remaining as f64;
        self.percent = copied / (total as f64).max(Self::MIN_DIVIDER) * Self::MAX_PERCENT;
    }
}
