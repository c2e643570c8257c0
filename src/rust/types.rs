//! Value types shared by the feature pipeline and the decision engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::SerializeMap;

use crate::classifier::ClassifierError;
use crate::decision::DecisionRule;

/// Maximum deviation from 1.0 tolerated when validating a distribution.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// The four waste categories, in canonical order.
///
/// The canonical order is also the order of the text scores in the feature
/// vector and of the model's probability output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WasteClass {
    Organic,
    Recyclable,
    Reject,
    Hazardous,
}

impl WasteClass {
    pub const ALL: [WasteClass; 4] = [
        WasteClass::Organic,
        WasteClass::Recyclable,
        WasteClass::Reject,
        WasteClass::Hazardous,
    ];

    pub fn index(self) -> usize {
        match self {
            WasteClass::Organic => 0,
            WasteClass::Recyclable => 1,
            WasteClass::Reject => 2,
            WasteClass::Hazardous => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WasteClass::Organic => "Organic",
            WasteClass::Recyclable => "Recyclable",
            WasteClass::Reject => "Reject",
            WasteClass::Hazardous => "Hazardous",
        }
    }

    /// Parses a class label. Accepts the English names (any case) and the
    /// Portuguese labels used by the labelled datasets.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "organic" | "orgânico" | "organico" => Some(WasteClass::Organic),
            "recyclable" | "reciclável" | "reciclavel" => Some(WasteClass::Recyclable),
            "reject" | "rejeito" => Some(WasteClass::Reject),
            "hazardous" | "perigoso" | "dangerous" => Some(WasteClass::Hazardous),
            _ => None,
        }
    }
}

impl fmt::Display for WasteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final label of a classification: one of the four classes, or `Unknown`
/// when there was no evidence at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Class(WasteClass),
    Unknown,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Class(class) => class.as_str(),
            Label::Unknown => "Unknown",
        }
    }

    pub fn class(self) -> Option<WasteClass> {
        match self {
            Label::Class(class) => Some(class),
            Label::Unknown => None,
        }
    }
}

impl From<WasteClass> for Label {
    fn from(class: WasteClass) -> Self {
        Label::Class(class)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case("unknown") {
            return Ok(Label::Unknown);
        }
        WasteClass::from_label(&raw)
            .map(Label::Class)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown waste class '{}'", raw)))
    }
}

/// Per-class probabilities in canonical class order.
///
/// Values built through [`ProbabilityDistribution::new`] are validated: every
/// entry is finite and within [0, 1], and the entries sum to 1.0 within
/// [`PROBABILITY_SUM_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct ProbabilityDistribution {
    values: [f64; 4],
}

impl ProbabilityDistribution {
    pub fn new(values: [f64; 4]) -> Result<Self, ClassifierError> {
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(ClassifierError::MalformedProbabilityVector(format!(
                "probability for {} is {} (expected a value in [0, 1])",
                WasteClass::ALL[i],
                v
            )));
        }

        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(ClassifierError::MalformedProbabilityVector(format!(
                "probabilities sum to {} instead of 1.0",
                sum
            )));
        }

        Ok(Self { values })
    }

    /// Validates a model output of arbitrary length.
    pub fn from_slice(values: &[f64]) -> Result<Self, ClassifierError> {
        let values: [f64; 4] = values.try_into().map_err(|_| {
            ClassifierError::MalformedProbabilityVector(format!(
                "expected 4 class probabilities, got {}",
                values.len()
            ))
        })?;
        Self::new(values)
    }

    pub fn uniform() -> Self {
        Self { values: [0.25; 4] }
    }

    /// Wraps raw scores without the sum check. Used by the text-only fallback,
    /// where keyword scores stand in for probabilities.
    pub(crate) fn from_scores(values: [f64; 4]) -> Self {
        Self { values }
    }

    pub fn get(&self, class: WasteClass) -> f64 {
        self.values[class.index()]
    }

    pub fn values(&self) -> &[f64; 4] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (WasteClass, f64)> + '_ {
        WasteClass::ALL.into_iter().map(move |class| (class, self.get(class)))
    }

    /// Classes sorted by probability, highest first. Equal probabilities keep
    /// canonical class order.
    pub fn ranked(&self) -> [(WasteClass, f64); 4] {
        let mut ranked = WasteClass::ALL.map(|class| (class, self.get(class)));
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

impl Serialize for ProbabilityDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (class, p) in self.iter() {
            map.serialize_entry(class.as_str(), &p)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, f64>> for ProbabilityDistribution {
    type Error = ClassifierError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut values = [f64::NAN; 4];
        for (label, p) in map {
            let class = WasteClass::from_label(&label).ok_or_else(|| {
                ClassifierError::MalformedProbabilityVector(format!("unknown class '{}'", label))
            })?;
            values[class.index()] = p;
        }
        Self::new(values)
    }
}

/// Outcome of a single classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub predicted_class: Label,
    pub confidence: f64,
    pub probabilities: ProbabilityDistribution,
    pub explanation: String,
    pub disposal_tip: String,
    pub needs_feedback: bool,
    /// The decision rule that produced this result
    pub decided_by: DecisionRule,
}
