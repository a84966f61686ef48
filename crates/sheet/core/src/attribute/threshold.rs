//! Pool thresholds - the state bands of a pool attribute.
//!
//! A pool (HP, FP) moves through named states as damage accumulates. Each
//! state is a [`PoolThreshold`] whose cutoff is an affine function of the
//! pool's maximum. States are scanned in list order and the first one whose
//! cutoff is at or above the current value wins, so lists are authored from
//! most severe (lowest cutoff) to least severe.

use bitflags::bitflags;

bitflags! {
    /// Rule-book side effects in force while a threshold is active.
    ///
    /// Applying them to derived stats is the caller's job.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ThresholdOps: u8 {
        const HALVE_MOVE  = 1 << 0;
        const HALVE_DODGE = 1 << 1;
        const HALVE_ST    = 1 << 2;
    }
}

impl ThresholdOps {
    /// Lowercase names of the contained ops, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        keys.sort();
        keys
    }

    /// Parse a single lowercase op name (`"halve_move"`).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::from_name(&key.to_ascii_uppercase())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ThresholdOps {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.keys())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ThresholdOps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let keys = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;
        keys.iter().try_fold(ThresholdOps::empty(), |ops, key| {
            ThresholdOps::from_key(key)
                .map(|op| ops | op)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown threshold op: {key}")))
        })
    }
}

/// One state band of a pool attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolThreshold {
    pub state: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub explanation: String,
    pub multiplier: i32,
    pub divisor: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub addition: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ops: ThresholdOps,
}

impl PoolThreshold {
    pub fn new(state: impl Into<String>, multiplier: i32, divisor: i32, addition: i32) -> Self {
        Self {
            state: state.into(),
            explanation: String::new(),
            multiplier,
            divisor,
            addition,
            ops: ThresholdOps::empty(),
        }
    }

    /// Attaches an explanation (builder pattern).
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Attaches ops (builder pattern).
    #[must_use]
    pub fn with_ops(mut self, ops: ThresholdOps) -> Self {
        self.ops = ops;
        self
    }

    /// Cutoff of this band for a pool whose maximum is `max`.
    ///
    /// Formula:
    /// - divisor ≤ 1: `max × multiplier + addition`
    /// - divisor > 1: `max(ceil(max × multiplier / divisor) − 1, 0) + addition`
    ///
    /// Divisors below 1 are treated as 1.
    pub fn threshold(&self, max: i32) -> i32 {
        let divisor = self.divisor.max(1);
        let mut value = max.saturating_mul(self.multiplier);
        if divisor > 1 {
            let remainder = value % divisor;
            value /= divisor;
            if remainder > 0 {
                value += 1;
            }
            value = (value - 1).max(0);
        }
        value.saturating_add(self.addition)
    }

    /// Returns true if a pool at `current` out of `max` falls in this band
    /// or a more severe one.
    pub fn contains(&self, max: i32, current: i32) -> bool {
        current <= self.threshold(max)
    }
}

/// Select the active threshold: the first band whose cutoff is at or above
/// `current`.
pub fn select(thresholds: &[PoolThreshold], max: i32, current: i32) -> Option<&PoolThreshold> {
    thresholds.iter().find(|threshold| threshold.contains(max, current))
}
