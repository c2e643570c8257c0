use log::{debug, info, warn};

use super::rules::{accept, DecisionContext, DecisionRule, Verdict};
use super::thresholds::DecisionThresholds;
use super::tips::disposal_tip;
use crate::classifier::utils::argmax;
use crate::classifier::ClassifierError;
use crate::features::TextFeatures;
use crate::types::{ClassificationResult, Label, ProbabilityDistribution, WasteClass};

/// Turns class probabilities (or, without a model, keyword scores) into a
/// final label, a confidence and a feedback flag.
///
/// The engine holds only its thresholds, so one instance can serve any number
/// of threads.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    thresholds: DecisionThresholds,
}

impl DecisionEngine {
    pub fn new(thresholds: DecisionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    /// Applies the rule cascade to a model's output.
    ///
    /// The distribution is checked again before any rule runs; a malformed
    /// one fails instead of producing a confident but wrong label.
    pub fn decide(
        &self,
        probabilities: &ProbabilityDistribution,
        text: &str,
    ) -> Result<ClassificationResult, ClassifierError> {
        let probabilities = ProbabilityDistribution::new(*probabilities.values())?;
        let ctx = DecisionContext::new(&probabilities, text, &self.thresholds);

        let verdict = DecisionRule::PRIMARY_ORDER
            .iter()
            .find_map(|rule| rule.evaluate(&ctx))
            .unwrap_or_else(|| accept(&ctx));

        debug!(
            "Rule '{}' decided {} ({:.3}) from {:?}",
            verdict.rule,
            verdict.label,
            verdict.confidence,
            probabilities.values()
        );
        if verdict.needs_feedback {
            info!("Result for {} needs feedback: {}", verdict.label, verdict.explanation);
        }

        Ok(finish(verdict, probabilities))
    }

    /// Same as [`decide`](Self::decide) for a raw model output of any length.
    pub fn decide_raw(&self, probabilities: &[f64], text: &str) -> Result<ClassificationResult, ClassifierError> {
        let probabilities = ProbabilityDistribution::from_slice(probabilities)?;
        self.decide(&probabilities, text)
    }

    /// Decision without a model: the normalized keyword scores stand in for
    /// probabilities and are echoed as-is.
    pub fn decide_fallback(
        &self,
        text_scores: &TextFeatures,
        text: &str,
    ) -> Result<ClassificationResult, ClassifierError> {
        let scores = text_scores.scores();
        if scores.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ClassifierError::MalformedFeatureVector(format!(
                "text scores must be finite and non-negative, got {:?}",
                scores
            )));
        }

        if text_scores.is_empty() {
            warn!("No model available and no keyword evidence in {:?}", text);
            return Ok(finish(
                Verdict {
                    label: Label::Unknown,
                    confidence: 0.0,
                    explanation: "No trained model is available and the description has no known keywords."
                        .to_string(),
                    needs_feedback: true,
                    rule: DecisionRule::FallbackNoEvidence,
                },
                ProbabilityDistribution::uniform(),
            ));
        }

        let best = argmax(scores).unwrap_or(0);
        let class = WasteClass::ALL[best];
        let confidence = scores[best];
        info!("No model available; {} chosen from keyword scores {:?}", class, scores);

        Ok(finish(
            Verdict {
                label: Label::Class(class),
                confidence,
                explanation: format!(
                    "Classified from the description only (no trained model). Keyword score: {:.1}%.",
                    confidence * 100.0
                ),
                needs_feedback: confidence < self.thresholds.fallback_confidence,
                rule: DecisionRule::FallbackText,
            },
            ProbabilityDistribution::from_scores(*scores),
        ))
    }
}

fn finish(verdict: Verdict, probabilities: ProbabilityDistribution) -> ClassificationResult {
    ClassificationResult {
        predicted_class: verdict.label,
        confidence: verdict.confidence,
        probabilities,
        explanation: verdict.explanation,
        disposal_tip: disposal_tip(verdict.label).to_string(),
        needs_feedback: verdict.needs_feedback,
        decided_by: verdict.rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(values: [f64; 4], text: &str) -> ClassificationResult {
        let probabilities = ProbabilityDistribution::new(values).unwrap();
        DecisionEngine::default().decide(&probabilities, text).unwrap()
    }

    #[test]
    fn test_strong_hazardous() {
        let result = decide([0.10, 0.12, 0.08, 0.70], "");
        assert_eq!(result.predicted_class, Label::Class(WasteClass::Hazardous));
        assert_eq!(result.confidence, 0.70);
        assert!(!result.needs_feedback);
        assert_eq!(result.decided_by, DecisionRule::HazardousTop);
    }

    #[test]
    fn test_weak_hazard_signal_is_accepted() {
        let result = decide([0.55, 0.10, 0.10, 0.25], "");
        assert_eq!(result.predicted_class, Label::Class(WasteClass::Organic));
        assert!(!result.needs_feedback);
        assert_eq!(result.decided_by, DecisionRule::Accept);
    }

    #[test]
    fn test_pipe_keyword_breaks_near_tie() {
        let result = decide([0.30, 0.28, 0.22, 0.20], "cano de pvc");
        assert_eq!(result.predicted_class, Label::Class(WasteClass::Recyclable));
        assert_eq!(result.confidence, 0.28);
        assert_eq!(result.decided_by, DecisionRule::NearTieKeyword);
        assert!(result.needs_feedback);
    }

    #[test]
    fn test_near_tie_without_keyword_is_low_confidence() {
        let result = decide([0.30, 0.28, 0.22, 0.20], "garrafa");
        assert_eq!(result.predicted_class, Label::Class(WasteClass::Organic));
        assert_eq!(result.decided_by, DecisionRule::LowConfidence);
        assert!(result.needs_feedback);
    }

    #[test]
    fn test_confident_accept_is_not_flagged() {
        let result = decide([0.05, 0.80, 0.10, 0.05], "garrafa pet");
        assert_eq!(result.predicted_class, Label::Class(WasteClass::Recyclable));
        assert!(!result.needs_feedback);
        assert_eq!(result.disposal_tip, disposal_tip(Label::Class(WasteClass::Recyclable)));
    }

    #[test]
    fn test_probabilities_are_echoed() {
        let values = [0.15, 0.60, 0.0, 0.25];
        let result = decide(values, "");
        assert_eq!(result.probabilities.values(), &values);
    }

    #[test]
    fn test_monotonic_acceptance() {
        let engine = DecisionEngine::default();
        for step in 0..=40 {
            let top = 0.50 + step as f64 * 0.01;
            let rest = 1.0 - top;
            let values = [rest * 0.5, top, rest * 0.3, rest * 0.2];
            if values[3] >= DecisionThresholds::default().danger || top - values[0] < 0.05 {
                continue;
            }
            let probabilities = ProbabilityDistribution::new(values).unwrap();
            let result = engine.decide(&probabilities, "cano").unwrap();
            assert_eq!(result.predicted_class, Label::Class(WasteClass::Recyclable));
            assert!(!result.needs_feedback, "flagged at top = {}", top);
        }
    }

    #[test]
    fn test_malformed_raw_probabilities() {
        let engine = DecisionEngine::default();
        assert!(matches!(
            engine.decide_raw(&[0.0; 4], ""),
            Err(ClassifierError::MalformedProbabilityVector(_))
        ));
        assert!(matches!(
            engine.decide_raw(&[0.5, 0.5, 0.0], ""),
            Err(ClassifierError::MalformedProbabilityVector(_))
        ));
        assert!(engine.decide_raw(&[0.1, 0.2, 0.3, 0.4], "").is_ok());
    }

    #[test]
    fn test_fallback_without_evidence() {
        let result = DecisionEngine::default()
            .decide_fallback(&TextFeatures::zeros(), "")
            .unwrap();
        assert_eq!(result.predicted_class, Label::Unknown);
        assert_eq!(result.confidence, 0.0);
        assert!(result.needs_feedback);
        assert_eq!(result.probabilities, ProbabilityDistribution::uniform());
        assert_eq!(result.decided_by, DecisionRule::FallbackNoEvidence);
    }

    #[test]
    fn test_fallback_uses_scores_as_is() {
        let engine = DecisionEngine::default();
        let scores = TextFeatures([0.0, 2.0 / 3.0, 0.0, 1.0 / 3.0]);
        let result = engine.decide_fallback(&scores, "garrafa de vidro com pilha").unwrap();
        assert_eq!(result.predicted_class, Label::Class(WasteClass::Recyclable));
        assert_eq!(result.confidence, 2.0 / 3.0);
        assert!(!result.needs_feedback);
        assert_eq!(result.probabilities.values(), scores.scores());

        let split = TextFeatures([0.5, 0.5, 0.0, 0.0]);
        let result = engine.decide_fallback(&split, "").unwrap();
        assert_eq!(result.predicted_class, Label::Class(WasteClass::Organic));
        assert!(result.needs_feedback);
    }

    #[test]
    fn test_fallback_rejects_bad_scores() {
        let result = DecisionEngine::default().decide_fallback(&TextFeatures([f64::NAN, 0.0, 0.0, 0.0]), "");
        assert!(matches!(result, Err(ClassifierError::MalformedFeatureVector(_))));
    }
}
