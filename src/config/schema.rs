use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::scoring::{PillarWeights, ScoringRules};

/// Process-wide settings: pillar weights, scoring rules, pricing and links.
///
/// `version` increases with every admin update and is stamped onto each
/// results document.
///
/// Example YAML:
/// ```yaml
/// version: 2
/// weights: { P1: 12, P2: 12, P3: 12, P4: 12, P5: 10, P6: 10, P7: 10, P8: 8, P9: 7, P10: 7 }
/// currency: AED
/// pricing:
///   tier_a: { INR: 15999, AED: 599 }
///   tier_b: { INR: 159999, AED: 5999 }
/// guided_review_link: "https://calendly.com/acme/guided-review"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub weights: PillarWeights,

    #[serde(default)]
    pub rules: ScoringRules,

    /// Currency prices are shown in
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub pricing: Pricing,

    #[serde(default)]
    pub guided_review_link: Option<String>,

    #[serde(default)]
    pub tier_c_booking_link: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            weights: PillarWeights::default(),
            rules: ScoringRules::default(),
            currency: Currency::default(),
            pricing: Pricing::default(),
            guided_review_link: None,
            tier_c_booking_link: None,
        }
    }
}

impl Settings {
    /// Replace the weights and bump the version.
    pub fn with_weights(&self, weights: PillarWeights) -> Settings {
        Settings {
            version: self.version.saturating_add(1),
            weights,
            ..self.clone()
        }
    }

    /// Apply a partial admin update and bump the version.
    ///
    /// Absent fields keep their current value. Pricing entries are merged per
    /// currency; an empty link clears it. The result is not validated.
    pub fn with_update(&self, update: SettingsUpdate) -> Settings {
        let mut next = self.clone();
        next.version = self.version.saturating_add(1);

        if let Some(weights) = update.weights {
            next.weights = weights;
        }
        if let Some(currency) = update.currency {
            next.currency = currency;
        }
        if let Some(pricing) = update.pricing {
            next.pricing.tier_a.extend(pricing.tier_a);
            next.pricing.tier_b.extend(pricing.tier_b);
        }
        if let Some(link) = update.guided_review_link {
            next.guided_review_link = non_empty(link);
        }
        if let Some(link) = update.tier_c_booking_link {
            next.tier_c_booking_link = non_empty(link);
        }
        next
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Partial settings update submitted by an admin.
///
/// Example YAML:
/// ```yaml
/// currency: AED
/// pricing:
///   tier_a: { AED: 649 }
/// guided_review_link: ""
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub weights: Option<PillarWeights>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub pricing: Option<PricingUpdate>,
    #[serde(default)]
    pub guided_review_link: Option<String>,
    #[serde(default)]
    pub tier_c_booking_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PricingUpdate {
    #[serde(default)]
    pub tier_a: BTreeMap<Currency, u64>,
    #[serde(default)]
    pub tier_b: BTreeMap<Currency, u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    #[default]
    Inr,
    Aed,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Aed => "AED",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "AED" => Ok(Currency::Aed),
            other => Err(format!("unsupported currency '{}' (expected INR or AED)", other)),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}

/// Offer tiers with a whole-unit price per currency.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Pricing {
    /// Self-serve detailed report
    pub tier_a: BTreeMap<Currency, u64>,
    /// Guided review with a consultant
    pub tier_b: BTreeMap<Currency, u64>,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tier_a: BTreeMap::from([(Currency::Inr, 15999), (Currency::Aed, 599)]),
            tier_b: BTreeMap::from([(Currency::Inr, 159999), (Currency::Aed, 5999)]),
        }
    }
}

impl Pricing {
    pub fn tier_a_price(&self, currency: Currency) -> Option<u64> {
        self.tier_a.get(&currency).copied()
    }

    pub fn tier_b_price(&self, currency: Currency) -> Option<u64> {
        self.tier_b.get(&currency).copied()
    }
}
