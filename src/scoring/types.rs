use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest score an answer can carry. Answers range over `0..=MAX_ANSWER_SCORE`.
pub const MAX_ANSWER_SCORE: u8 = 3;

/// One of the ten readiness categories, `P1` through `P10`.
///
/// Serialized as its code so it can key JSON and YAML maps directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Pillar {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
    P10,
}

impl Pillar {
    pub const ALL: [Pillar; 10] = [
        Pillar::P1,
        Pillar::P2,
        Pillar::P3,
        Pillar::P4,
        Pillar::P5,
        Pillar::P6,
        Pillar::P7,
        Pillar::P8,
        Pillar::P9,
        Pillar::P10,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Pillar::P1 => "P1",
            Pillar::P2 => "P2",
            Pillar::P3 => "P3",
            Pillar::P4 => "P4",
            Pillar::P5 => "P5",
            Pillar::P6 => "P6",
            Pillar::P7 => "P7",
            Pillar::P8 => "P8",
            Pillar::P9 => "P9",
            Pillar::P10 => "P10",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Pillar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pillar::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown pillar '{}' (expected P1..P10)", s))
    }
}

impl TryFrom<String> for Pillar {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pillar> for String {
    fn from(value: Pillar) -> Self {
        value.code().to_string()
    }
}

/// One of the five compliance checkpoints, `G1` through `G5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gate {
    G1,
    G2,
    G3,
    G4,
    G5,
}

impl Gate {
    pub const ALL: [Gate; 5] = [Gate::G1, Gate::G2, Gate::G3, Gate::G4, Gate::G5];

    pub fn code(self) -> &'static str {
        match self {
            Gate::G1 => "G1",
            Gate::G2 => "G2",
            Gate::G3 => "G3",
            Gate::G4 => "G4",
            Gate::G5 => "G5",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gate::ALL
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown gate '{}' (expected G1..G5)", s))
    }
}

impl TryFrom<String> for Gate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gate> for String {
    fn from(value: Gate) -> Self {
        value.code().to_string()
    }
}

/// Remediation effort class. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Effort {
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    High,
}

impl Effort {
    pub const ALL: [Effort; 3] = [Effort::Low, Effort::Medium, Effort::High];

    pub fn code(self) -> &'static str {
        match self {
            Effort::Low => "L",
            Effort::Medium => "M",
            Effort::High => "H",
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Red / Amber / Green status of a pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rag {
    Green,
    Amber,
    Red,
}

impl fmt::Display for Rag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rag::Green => f.write_str("Green"),
            Rag::Amber => f.write_str("Amber"),
            Rag::Red => f.write_str("Red"),
        }
    }
}

/// Outcome of a gate. Variant order is severity order, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateStatus {
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "CONDITIONAL")]
    Conditional,
    #[serde(rename = "PASS")]
    Pass,
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateStatus::Fail => f.write_str("FAIL"),
            GateStatus::Conditional => f.write_str("CONDITIONAL"),
            GateStatus::Pass => f.write_str("PASS"),
        }
    }
}

/// Overall migration recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "GO with conditions")]
    GoWithConditions,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Go, Decision::GoWithConditions, Decision::NoGo];

    pub fn label(self) -> &'static str {
        match self {
            Decision::Go => "GO",
            Decision::GoWithConditions => "GO with conditions",
            Decision::NoGo => "NO-GO",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pillar_parse_and_display() {
        assert_eq!("P7".parse::<Pillar>().unwrap(), Pillar::P7);
        assert_eq!("p10".parse::<Pillar>().unwrap(), Pillar::P10);
        assert_eq!(Pillar::P10.to_string(), "P10");
        assert!("P11".parse::<Pillar>().is_err());
        assert!("".parse::<Pillar>().is_err());
    }

    #[test]
    fn test_pillar_order_is_numeric() {
        // P10 sorts after P9, not after P1
        let mut pillars = vec![Pillar::P10, Pillar::P2, Pillar::P1, Pillar::P9];
        pillars.sort();
        assert_eq!(pillars, vec![Pillar::P1, Pillar::P2, Pillar::P9, Pillar::P10]);
    }

    #[test]
    fn test_gate_parse() {
        assert_eq!("G3".parse::<Gate>().unwrap(), Gate::G3);
        assert!("G6".parse::<Gate>().is_err());
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(serde_json::to_string(&Pillar::P4).unwrap(), "\"P4\"");
        assert_eq!(serde_json::to_string(&Effort::Low).unwrap(), "\"L\"");
        assert_eq!(serde_json::to_string(&Rag::Amber).unwrap(), "\"Amber\"");
        assert_eq!(
            serde_json::to_string(&GateStatus::Conditional).unwrap(),
            "\"CONDITIONAL\""
        );
        assert_eq!(
            serde_json::to_string(&Decision::GoWithConditions).unwrap(),
            "\"GO with conditions\""
        );
        assert_eq!(serde_json::to_string(&Decision::NoGo).unwrap(), "\"NO-GO\"");
    }

    #[test]
    fn test_pillar_deserialize_rejects_unknown() {
        let result: Result<Pillar, _> = serde_json::from_str("\"P0\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_gate_status_severity_order() {
        assert!(GateStatus::Fail < GateStatus::Conditional);
        assert!(GateStatus::Conditional < GateStatus::Pass);
    }
}
