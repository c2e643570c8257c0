//! The ordered decision rules.
//!
//! Each rule is a guard plus an action: [`DecisionRule::evaluate`] returns
//! `Some(verdict)` when the rule applies and `None` to pass the request on to
//! the next rule in [`DecisionRule::PRIMARY_ORDER`].

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::thresholds::DecisionThresholds;
use crate::lexicon::matching_keywords;
use crate::types::{Label, ProbabilityDistribution, WasteClass};

/// Pipe and plumbing terms that tip a near tie towards Recyclable.
pub const RECYCLABLE_TIE_KEYWORDS: &[&str] = &[
    "cano", "tubo", "pvc", "encanamento", "tubulação", "conduíte",
    "conexões", "conexão", "hidráulic", "pipe", "tube", "plumbing",
];

/// Battery, chemical, medical and lamp terms. Detected during a near tie but
/// not acted on: only the Recyclable tie-break is implemented.
pub const HAZARDOUS_TIE_KEYWORDS: &[&str] = &[
    "bateria", "pilha", "tóxico", "químico", "veneno", "remédio",
    "medicamento", "hospitalar", "seringa", "agulha", "lâmpada",
    "fluorescente", "battery", "toxic", "chemical", "medical", "fluorescent",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Top two classes nearly tied and the description names a pipe or tube
    NearTieKeyword,
    /// Top-class probability below the confidence threshold
    LowConfidence,
    /// Hazardous is the top class
    HazardousTop,
    /// A non-hazardous call with a meaningful hazardous probability
    HazardousSignal,
    /// Plain acceptance of the top class
    Accept,
    /// No model: keyword scores decided
    FallbackText,
    /// No model and no keyword evidence
    FallbackNoEvidence,
}

impl DecisionRule {
    /// Evaluation order when a model is available; the first rule that
    /// returns a verdict wins.
    pub const PRIMARY_ORDER: [DecisionRule; 5] = [
        DecisionRule::NearTieKeyword,
        DecisionRule::LowConfidence,
        DecisionRule::HazardousTop,
        DecisionRule::HazardousSignal,
        DecisionRule::Accept,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionRule::NearTieKeyword => "near_tie_keyword",
            DecisionRule::LowConfidence => "low_confidence",
            DecisionRule::HazardousTop => "hazardous_top",
            DecisionRule::HazardousSignal => "hazardous_signal",
            DecisionRule::Accept => "accept",
            DecisionRule::FallbackText => "fallback_text",
            DecisionRule::FallbackNoEvidence => "fallback_no_evidence",
        }
    }

    pub(crate) fn evaluate(self, ctx: &DecisionContext<'_>) -> Option<Verdict> {
        match self {
            DecisionRule::NearTieKeyword => near_tie_keyword(ctx),
            DecisionRule::LowConfidence => low_confidence(ctx),
            DecisionRule::HazardousTop => hazardous_top(ctx),
            DecisionRule::HazardousSignal => hazardous_signal(ctx),
            DecisionRule::Accept => Some(accept(ctx)),
            DecisionRule::FallbackText | DecisionRule::FallbackNoEvidence => None,
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a rule may look at for one request.
pub(crate) struct DecisionContext<'a> {
    pub probabilities: &'a ProbabilityDistribution,
    pub ranked: [(WasteClass, f64); 4],
    pub text: &'a str,
    pub lowercase_text: String,
    pub thresholds: &'a DecisionThresholds,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        probabilities: &'a ProbabilityDistribution,
        text: &'a str,
        thresholds: &'a DecisionThresholds,
    ) -> Self {
        Self {
            probabilities,
            ranked: probabilities.ranked(),
            text,
            lowercase_text: text.to_lowercase(),
            thresholds,
        }
    }

    fn top1(&self) -> (WasteClass, f64) {
        self.ranked[0]
    }

    fn top2(&self) -> (WasteClass, f64) {
        self.ranked[1]
    }

    fn hazardous(&self) -> f64 {
        self.probabilities.get(WasteClass::Hazardous)
    }
}

/// A rule's decision, before the disposal tip and probabilities are attached.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verdict {
    pub label: Label,
    pub confidence: f64,
    pub explanation: String,
    pub needs_feedback: bool,
    pub rule: DecisionRule,
}

fn pct(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

fn near_tie_keyword(ctx: &DecisionContext<'_>) -> Option<Verdict> {
    let (top1_class, top1) = ctx.top1();
    let (top2_class, top2) = ctx.top2();
    if top1 - top2 >= ctx.thresholds.top2_tie || ctx.text.is_empty() {
        return None;
    }

    let hazardous_hits = matching_keywords(HAZARDOUS_TIE_KEYWORDS, &ctx.lowercase_text);
    if !hazardous_hits.is_empty() {
        debug!(
            "Near tie with hazardous keywords {:?}; no hazardous tie-break is applied",
            hazardous_hits
        );
    }

    let recyclable_hits = matching_keywords(RECYCLABLE_TIE_KEYWORDS, &ctx.lowercase_text);
    let recyclable_in_top2 = top1_class == WasteClass::Recyclable || top2_class == WasteClass::Recyclable;
    if recyclable_hits.is_empty() || !recyclable_in_top2 {
        return None;
    }

    let confidence = ctx.probabilities.get(WasteClass::Recyclable);
    Some(Verdict {
        label: Label::Class(WasteClass::Recyclable),
        confidence,
        explanation: format!(
            "Near tie between {} ({}) and {} ({}); the description mentions {}, so the item is treated as Recyclable.",
            top1_class,
            pct(top1),
            top2_class,
            pct(top2),
            recyclable_hits.join(", ")
        ),
        needs_feedback: confidence < ctx.thresholds.confidence,
        rule: DecisionRule::NearTieKeyword,
    })
}

fn low_confidence(ctx: &DecisionContext<'_>) -> Option<Verdict> {
    let (class, top1) = ctx.top1();
    if top1 >= ctx.thresholds.confidence {
        return None;
    }
    Some(Verdict {
        label: Label::Class(class),
        confidence: top1,
        explanation: format!(
            "Low confidence ({}). Please check manually or provide more details.",
            pct(top1)
        ),
        needs_feedback: true,
        rule: DecisionRule::LowConfidence,
    })
}

fn hazardous_top(ctx: &DecisionContext<'_>) -> Option<Verdict> {
    let (class, top1) = ctx.top1();
    if class != WasteClass::Hazardous {
        return None;
    }
    let (explanation, needs_feedback) = if top1 < ctx.thresholds.hazardous_moderate {
        (
            format!(
                "Moderate confidence hazardous ({}). Treat it as hazardous and confirm the material.",
                pct(top1)
            ),
            true,
        )
    } else {
        (format!("Strong evidence of hazardous material ({}).", pct(top1)), false)
    };
    Some(Verdict {
        label: Label::Class(class),
        confidence: top1,
        explanation,
        needs_feedback,
        rule: DecisionRule::HazardousTop,
    })
}

fn hazardous_signal(ctx: &DecisionContext<'_>) -> Option<Verdict> {
    let (class, top1) = ctx.top1();
    let hazardous = ctx.hazardous();
    let t = ctx.thresholds;
    if hazardous < t.danger || top1 >= t.strong_confidence || hazardous < t.hazardous_verify {
        return None;
    }
    Some(Verdict {
        label: Label::Class(class),
        confidence: top1,
        explanation: format!(
            "Classified as {} ({}), but the hazardous probability is {}: possible hazardous material, please verify.",
            class,
            pct(top1),
            pct(hazardous)
        ),
        needs_feedback: true,
        rule: DecisionRule::HazardousSignal,
    })
}

pub(crate) fn accept(ctx: &DecisionContext<'_>) -> Verdict {
    let (class, top1) = ctx.top1();
    Verdict {
        label: Label::Class(class),
        confidence: top1,
        explanation: format!("Classified with {} confidence.", pct(top1)),
        needs_feedback: false,
        rule: DecisionRule::Accept,
    }
}
