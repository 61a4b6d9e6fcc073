//! Explanation generator.
//!
//! Derives ranked, human-readable reasons from the exact signals fusion
//! consumed — never re-scoring. Every reason is a template bound to signal
//! name and category: identical inputs always produce identical output.

use smallvec::SmallVec;

use harmlens_core::config::{ExplainConfig, SignalWeights};
use harmlens_core::signal::{Evidence, SignalName, CHILD_FLAG};

use crate::signals::{SignalResult, SignalSet};

/// Fallback reason when no signal contributes enough to explain on its own.
/// An assessment must always be explainable.
const FALLBACK_REASON: &str =
    "Content flagged for precautionary review based on combined risk factors.";

/// Reason prepended when the child-safety override fired.
const CHILD_OVERRIDE_REASON: &str =
    "CRITICAL: Child safety concern detected. Automatic escalation triggered for immediate human review.";

/// Ranked reasons plus pass-through evidence references.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Most significant first.
    pub reasons: SmallVec<[String; 5]>,
    pub evidence: Vec<Evidence>,
}

/// Generates explanations from fused signal sets.
pub struct ExplanationGenerator {
    weights: SignalWeights,
    max_reasons: usize,
    min_contribution: f64,
    max_evidence: usize,
}

impl ExplanationGenerator {
    pub fn new(weights: SignalWeights, config: &ExplainConfig) -> Self {
        Self {
            weights,
            max_reasons: config.effective_max_reasons(),
            min_contribution: config.effective_min_contribution(),
            max_evidence: config.effective_max_evidence(),
        }
    }

    /// Produce reasons and evidence for a signal set.
    ///
    /// `child_override` marks that fusion applied the child-safety floor;
    /// the corresponding critical reason is always placed first.
    pub fn explain(&self, signals: &SignalSet, child_override: bool) -> Explanation {
        let mut ranked: Vec<(&SignalResult, f64)> = signals
            .iter()
            .map(|s| (s, self.weights.weight(s.name) * s.score))
            .collect();
        // Weighted contribution descending; ties broken by fixed severity
        // precedence (child_safety > toxicity > emotion > cta > context).
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.name.severity_rank().cmp(&b.0.name.severity_rank()))
        });

        let qualifying: Vec<&SignalResult> = ranked
            .iter()
            .filter(|(_, contribution)| *contribution >= self.min_contribution)
            .map(|(s, _)| *s)
            .collect();

        let mut reasons: SmallVec<[String; 5]> = SmallVec::new();
        if child_override {
            reasons.push(CHILD_OVERRIDE_REASON.to_string());
        }

        if qualifying.len() < 2 {
            if reasons.is_empty() {
                reasons.push(FALLBACK_REASON.to_string());
            }
        } else {
            for signal in qualifying {
                if reasons.len() >= self.max_reasons {
                    break;
                }
                let reason = reason_for(signal);
                if !reasons.contains(&reason) {
                    reasons.push(reason);
                }
            }
        }
        reasons.truncate(self.max_reasons);

        Explanation {
            reasons,
            evidence: self.collect_evidence(signals),
        }
    }

    /// Pass-through evidence in signal insertion order, deduplicated by
    /// snippet. This component never locates evidence itself.
    fn collect_evidence(&self, signals: &SignalSet) -> Vec<Evidence> {
        let mut evidence: Vec<Evidence> = Vec::new();
        for signal in signals.iter() {
            for item in &signal.evidence {
                if evidence.len() >= self.max_evidence {
                    return evidence;
                }
                if !evidence.iter().any(|e| e.snippet == item.snippet) {
                    evidence.push(item.clone());
                }
            }
        }
        evidence
    }
}

/// Template for one signal's reason, bound to name, categories, flags, and
/// detector-provided triggers.
fn reason_for(signal: &SignalResult) -> String {
    match signal.name {
        SignalName::Emotion => {
            if signal.categories.is_empty() {
                "Elevated emotional tone that may influence reader response.".to_string()
            } else {
                format!(
                    "High emotional intensity detected ({}), which increases likelihood of impulsive sharing and emotional reactions.",
                    join_first(&signal.categories, 2)
                )
            }
        }
        SignalName::Cta => {
            let triggers: Vec<String> = signal
                .evidence
                .iter()
                .take(3)
                .map(|e| format!("\"{}\"", e.trigger))
                .collect();
            if triggers.is_empty() {
                "Contains language urging immediate action or sharing.".to_string()
            } else {
                format!(
                    "Contains mobilizing calls-to-action ({}) encouraging people to act or share quickly, amplifying potential spread.",
                    triggers.join(", ")
                )
            }
        }
        SignalName::Toxicity => {
            if signal.has_flag("targeted") {
                "Includes targeting or dehumanizing framing toward groups, which can inflame hostility and trigger harassment.".to_string()
            } else {
                "Contains toxic or hostile language that may escalate conflict.".to_string()
            }
        }
        SignalName::Context => {
            if let Some(topic) = signal.categories.first() {
                format!(
                    "Addresses {topic}, a high-stakes context where misinformation can escalate real-world harm."
                )
            } else {
                "Touches on context-sensitive topics requiring extra scrutiny.".to_string()
            }
        }
        SignalName::ChildSafety => {
            if signal.has_flag(CHILD_FLAG) {
                "References minors with potentially risky framing; requires immediate review under child-safety policy.".to_string()
            } else {
                "Contains child-related content that warrants review.".to_string()
            }
        }
    }
}

fn join_first(values: &[String], n: usize) -> String {
    values
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use harmlens_core::config::ExplainConfig;
    use harmlens_core::events::EventDispatcher;
    use harmlens_core::signal::RawSignal;

    use crate::signals::SignalNormalizer;

    fn build_set(pairs: &[(&str, f64)]) -> SignalSet {
        let normalizer = SignalNormalizer::new(Arc::new(EventDispatcher::new()));
        let raws: Vec<RawSignal> = pairs
            .iter()
            .map(|(name, score)| RawSignal::new(*name, *score))
            .collect();
        normalizer.normalize_all(&raws).unwrap()
    }

    fn generator() -> ExplanationGenerator {
        ExplanationGenerator::new(SignalWeights::default(), &ExplainConfig::default())
    }

    #[test]
    fn all_zero_signals_produce_single_fallback() {
        let set = build_set(&[
            ("emotion", 0.0),
            ("cta", 0.0),
            ("toxicity", 0.0),
            ("context", 0.0),
            ("child_safety", 0.0),
        ]);
        let explanation = generator().explain(&set, false);
        assert_eq!(explanation.reasons.len(), 1);
        assert_eq!(explanation.reasons[0], FALLBACK_REASON);
    }

    #[test]
    fn identical_inputs_identical_reasons() {
        let set = build_set(&[
            ("emotion", 0.9),
            ("cta", 0.8),
            ("toxicity", 0.4),
            ("context", 0.6),
            ("child_safety", 0.0),
        ]);
        let gen = generator();
        let a = gen.explain(&set, false);
        let b = gen.explain(&set, false);
        assert_eq!(a.reasons, b.reasons);
    }

    #[test]
    fn ties_break_by_severity_precedence() {
        // emotion 0.30 x 0.2 = 0.06, toxicity 0.20 x 0.3 = 0.06: toxicity
        // outranks emotion on severity despite equal contribution.
        let set = build_set(&[
            ("emotion", 0.2),
            ("cta", 0.0),
            ("toxicity", 0.3),
            ("context", 0.0),
            ("child_safety", 0.0),
        ]);
        let explanation = generator().explain(&set, false);
        assert!(explanation.reasons[0].contains("toxic"));
    }

    #[test]
    fn child_override_reason_comes_first() {
        let set = build_set(&[
            ("emotion", 0.9),
            ("cta", 0.8),
            ("toxicity", 0.5),
            ("context", 0.6),
            ("child_safety", 0.7),
        ]);
        let explanation = generator().explain(&set, true);
        assert!(explanation.reasons[0].starts_with("CRITICAL"));
    }

    #[test]
    fn reason_cap_respected() {
        let set = build_set(&[
            ("emotion", 0.9),
            ("cta", 0.8),
            ("toxicity", 0.7),
            ("context", 0.6),
            ("child_safety", 0.9),
        ]);
        let config = ExplainConfig {
            max_reasons: Some(2),
            ..Default::default()
        };
        let gen = ExplanationGenerator::new(SignalWeights::default(), &config);
        let explanation = gen.explain(&set, false);
        assert!(explanation.reasons.len() <= 2);
    }
}
