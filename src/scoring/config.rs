use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{Effort, Pillar};

/// Integer percentage weight per pillar. A usable weighting covers all ten
/// pillars and sums to exactly 100.
///
/// Example YAML:
/// ```yaml
/// weights: { P1: 12, P2: 12, P3: 12, P4: 12, P5: 10, P6: 10, P7: 10, P8: 8, P9: 7, P10: 7 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PillarWeights(BTreeMap<Pillar, u32>);

impl PillarWeights {
    pub fn new(weights: BTreeMap<Pillar, u32>) -> Self {
        Self(weights)
    }

    pub fn get(&self, pillar: Pillar) -> Option<u32> {
        self.0.get(&pillar).copied()
    }

    /// Weight of a pillar, or zero when it has none.
    pub fn weight_or_zero(&self, pillar: Pillar) -> u32 {
        self.get(pillar).unwrap_or(0)
    }

    /// Sum of all weights, widened so oversized entries cannot wrap.
    pub fn total(&self) -> u64 {
        self.0.values().map(|w| u64::from(*w)).sum()
    }

    /// Pillars present with a weight of zero.
    pub fn zero_weighted(&self) -> Vec<Pillar> {
        self.iter().filter(|(_, w)| *w == 0).map(|(p, _)| p).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pillar, u32)> + '_ {
        self.0.iter().map(|(p, w)| (*p, *w))
    }

    pub fn missing(&self) -> Vec<Pillar> {
        Pillar::ALL
            .into_iter()
            .filter(|p| !self.0.contains_key(p))
            .collect()
    }
}

impl Default for PillarWeights {
    /// Ten pillars at 10% each.
    fn default() -> Self {
        Self(Pillar::ALL.into_iter().map(|p| (p, 10)).collect())
    }
}

impl FromIterator<(Pillar, u32)> for PillarWeights {
    fn from_iter<I: IntoIterator<Item = (Pillar, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Thresholds and bounds used by the scoring engine.
///
/// Every section is optional in YAML and falls back to its defaults:
/// ```yaml
/// rules:
///   rag: { amber_from: 40, green_from: 75 }
///   gates: { fail_at_or_below: 0, conditional_at_or_below: 1, pass_mean: 2.0 }
///   decision: { conditional_below: 75 }
///   ranking: { top_n: 5, risk_max_score: 1, quick_win_max_effort: M }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringRules {
    #[serde(default)]
    pub rag: RagThresholds,
    #[serde(default)]
    pub gates: GateRules,
    #[serde(default)]
    pub decision: DecisionRules,
    #[serde(default)]
    pub ranking: RankingRules,
}

/// Pillar scores below `amber_from` are Red, below `green_from` Amber,
/// otherwise Green.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RagThresholds {
    pub amber_from: u8,
    pub green_from: u8,
}

impl Default for RagThresholds {
    fn default() -> Self {
        Self {
            amber_from: 40,
            green_from: 75,
        }
    }
}

/// Rule set applied to the answers tagged with a gate.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GateRules {
    /// Any answer at or below this score fails the gate.
    pub fail_at_or_below: u8,
    /// Any answer at or below this score makes the gate conditional.
    pub conditional_at_or_below: u8,
    /// A gate whose mean answer score is below this is conditional.
    pub pass_mean: f64,
}

impl Default for GateRules {
    fn default() -> Self {
        Self {
            fail_at_or_below: 0,
            conditional_at_or_below: 1,
            pass_mean: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DecisionRules {
    /// With a conditional gate, an overall score below this yields
    /// "GO with conditions".
    pub conditional_below: u8,
}

impl Default for DecisionRules {
    fn default() -> Self {
        Self {
            conditional_below: 75,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RankingRules {
    /// Maximum length of the top risk and quick win lists.
    pub top_n: usize,
    /// Answers at or below this score are risk candidates.
    pub risk_max_score: u8,
    /// Highest effort class still counted as a quick win.
    pub quick_win_max_effort: Effort,
}

impl Default for RankingRules {
    fn default() -> Self {
        Self {
            top_n: 5,
            risk_max_score: 1,
            quick_win_max_effort: Effort::Medium,
        }
    }
}
