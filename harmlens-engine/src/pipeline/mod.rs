//! The synchronous analysis pipeline: normalize → fuse → explain → route.
//!
//! No suspension points and no shared mutable state — independent content
//! items may be analyzed fully in parallel. Detector calls, persistence,
//! and audit mirroring all happen outside, at the boundary.

use std::sync::Arc;

use harmlens_core::config::HarmlensConfig;
use harmlens_core::errors::{FusionError, HarmlensErrorCode, PipelineError};
use harmlens_core::events::types::{AssessmentCompletedEvent, AssessmentFailedEvent};
use harmlens_core::events::EventDispatcher;
use harmlens_core::signal::RawSignal;
use harmlens_core::traits::SignalSource;

use crate::assessment::RiskAssessment;
use crate::explain::ExplanationGenerator;
use crate::fusion::RiskFusionEngine;
use crate::routing;
use crate::signals::SignalNormalizer;

/// One-stop analysis of raw detector output into a finalized assessment.
pub struct AnalysisPipeline {
    config_version: u32,
    normalizer: SignalNormalizer,
    fusion: RiskFusionEngine,
    explainer: ExplanationGenerator,
    dispatcher: Arc<EventDispatcher>,
}

impl AnalysisPipeline {
    /// Build a pipeline with no event handlers.
    pub fn new(config: &HarmlensConfig) -> Result<Self, FusionError> {
        Self::with_dispatcher(config, Arc::new(EventDispatcher::new()))
    }

    /// Build a pipeline emitting events to the given dispatcher.
    ///
    /// Fails fast if the configured weights do not sum to 1.0.
    pub fn with_dispatcher(
        config: &HarmlensConfig,
        dispatcher: Arc<EventDispatcher>,
    ) -> Result<Self, FusionError> {
        let fusion = RiskFusionEngine::new(&config.fusion, dispatcher.clone())?;
        let explainer = ExplanationGenerator::new(fusion.weights(), &config.explain);
        Ok(Self {
            config_version: config.version,
            normalizer: SignalNormalizer::new(dispatcher.clone()),
            fusion,
            explainer,
            dispatcher,
        })
    }

    /// Analyze one content item from pre-collected raw detector output.
    ///
    /// Failure yields no assessment: callers retry or surface the error,
    /// never a default score.
    pub fn analyze(
        &self,
        content_id: &str,
        raw_signals: &[RawSignal],
    ) -> Result<RiskAssessment, PipelineError> {
        match self.analyze_inner(content_id, raw_signals) {
            Ok(assessment) => {
                self.dispatcher
                    .emit_assessment_completed(&AssessmentCompletedEvent {
                        content_id: assessment.content_id.clone(),
                        score: assessment.score,
                        label: assessment.label.name().to_string(),
                        action: assessment.action.clone(),
                        queue: assessment.queue.clone(),
                    });
                Ok(assessment)
            }
            Err(error) => {
                self.dispatcher
                    .emit_assessment_failed(&AssessmentFailedEvent {
                        content_id: content_id.to_string(),
                        error_code: error.error_code().to_string(),
                        message: error.to_string(),
                    });
                Err(error)
            }
        }
    }

    /// Analyze by driving an injected detector collaborator.
    pub fn analyze_with_source(
        &self,
        content_id: &str,
        text: &str,
        source: &dyn SignalSource,
    ) -> Result<RiskAssessment, PipelineError> {
        let raw_signals = source.signals(content_id, text);
        self.analyze(content_id, &raw_signals)
    }

    fn analyze_inner(
        &self,
        content_id: &str,
        raw_signals: &[RawSignal],
    ) -> Result<RiskAssessment, PipelineError> {
        let signals = self.normalizer.normalize_all(raw_signals)?;
        let outcome = self.fusion.fuse(content_id, &signals)?;
        let explanation = self.explainer.explain(&signals, outcome.child_override);
        let routing = routing::route(outcome.label, signals.child_flag());

        Ok(RiskAssessment {
            content_id: content_id.to_string(),
            config_version: self.config_version,
            signals,
            score: outcome.score,
            label: outcome.label,
            categories: outcome.categories,
            breakdown: outcome.breakdown,
            reasons: explanation.reasons,
            evidence: explanation.evidence,
            action: routing.action,
            priority: routing.priority,
            queue: routing.queue,
        })
    }
}
