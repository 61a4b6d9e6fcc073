//! End-to-end tests for the analysis pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use harmlens_core::config::HarmlensConfig;
use harmlens_core::errors::{FusionError, PipelineError, SignalError};
use harmlens_core::events::types::{AssessmentCompletedEvent, AssessmentFailedEvent};
use harmlens_core::events::{EventDispatcher, HarmlensEventHandler};
use harmlens_core::priority::Priority;
use harmlens_core::signal::{Evidence, RawSignal, CHILD_FLAG};
use harmlens_core::traits::StaticSignalSource;
use harmlens_engine::fusion::RiskLabel;
use harmlens_engine::pipeline::AnalysisPipeline;

fn pipeline() -> AnalysisPipeline {
    AnalysisPipeline::new(&HarmlensConfig::default()).unwrap()
}

fn five_signals(
    emotion: f64,
    cta: f64,
    toxicity: f64,
    context: f64,
    child_safety: f64,
    child_flag: bool,
) -> Vec<RawSignal> {
    let mut child = RawSignal::new("child_safety", child_safety);
    if child_flag {
        child.flags = Some(vec![CHILD_FLAG.to_string()]);
    }
    vec![
        RawSignal::new("emotion", emotion),
        RawSignal::new("cta", cta),
        RawSignal::new("toxicity", toxicity),
        RawSignal::new("context", context),
        child,
    ]
}

#[test]
fn medium_risk_content_gets_warning_route() {
    let assessment = pipeline()
        .analyze("c1", &five_signals(0.9, 0.8, 0.1, 0.6, 0.0, false))
        .unwrap();

    assert_eq!(assessment.score, 58);
    assert_eq!(assessment.label, RiskLabel::Medium);
    assert_eq!(assessment.action, "Add Warning / Reduce Reach");
    assert_eq!(assessment.priority, Priority::Medium);
    assert_eq!(assessment.queue, "Standard Review Queue");
    assert_eq!(assessment.config_version, 1);
    assert_eq!(assessment.breakdown.len(), 5);
    assert!(!assessment.reasons.is_empty());
}

#[test]
fn child_flagged_content_routes_to_child_safety() {
    let assessment = pipeline()
        .analyze("c2", &five_signals(0.9, 0.8, 0.1, 0.6, 0.7, true))
        .unwrap();

    assert_eq!(assessment.score, 80);
    assert_eq!(assessment.label, RiskLabel::High);
    assert_eq!(assessment.action, "Escalate to Child Safety");
    assert_eq!(assessment.priority, Priority::Critical);
    assert_eq!(assessment.queue, "Child Safety Queue");
    assert!(assessment.reasons[0].starts_with("CRITICAL"));
    assert!(assessment
        .categories
        .iter()
        .any(|c| c == "Child Safety Concern"));
}

#[test]
fn clean_content_is_monitored_with_fallback_reason() {
    let assessment = pipeline()
        .analyze("c3", &five_signals(0.0, 0.0, 0.0, 0.0, 0.0, false))
        .unwrap();

    assert_eq!(assessment.score, 0);
    assert_eq!(assessment.label, RiskLabel::Low);
    assert_eq!(assessment.action, "Monitor");
    assert_eq!(assessment.queue, "Automated Monitoring");
    assert_eq!(assessment.reasons.len(), 1);
    assert_eq!(
        assessment.reasons[0],
        "Content flagged for precautionary review based on combined risk factors."
    );
    assert_eq!(assessment.categories, vec!["General Content".to_string()]);
}

#[test]
fn unknown_signal_fails_the_analysis() {
    let mut signals = five_signals(0.1, 0.1, 0.1, 0.1, 0.1, false);
    signals.push(RawSignal::new("sarcasm", 0.5));

    let err = pipeline().analyze("c4", &signals).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Signal(SignalError::UnknownSignal { .. })
    ));
}

#[test]
fn missing_signal_fails_the_analysis() {
    let err = pipeline()
        .analyze("c5", &[RawSignal::new("emotion", 0.9)])
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Fusion(FusionError::MissingSignal { .. })
    ));
}

#[test]
fn analysis_is_deterministic() {
    let signals = five_signals(0.7, 0.5, 0.4, 0.3, 0.2, false);
    let pipeline = pipeline();
    let a = pipeline.analyze("c6", &signals).unwrap();
    let b = pipeline.analyze("c6", &signals).unwrap();

    assert_eq!(a.score, b.score);
    assert_eq!(a.reasons, b.reasons);
    assert_eq!(a.categories, b.categories);
    assert_eq!(a.audit_digest().unwrap(), b.audit_digest().unwrap());
}

#[test]
fn evidence_passes_through_from_detectors() {
    let mut signals = five_signals(0.9, 0.8, 0.0, 0.0, 0.0, false);
    signals[1].evidence = vec![Evidence {
        snippet: "...share this now before...".into(),
        trigger: "share this now".into(),
        note: "Call-to-action".into(),
    }];

    let assessment = pipeline().analyze("c7", &signals).unwrap();
    assert_eq!(assessment.evidence.len(), 1);
    assert_eq!(assessment.evidence[0].trigger, "share this now");
    // CTA reason quotes the detector-provided trigger
    assert!(assessment
        .reasons
        .iter()
        .any(|r| r.contains("\"share this now\"")));
}

#[test]
fn analyze_with_injected_source() {
    let source = StaticSignalSource::new(five_signals(0.9, 0.8, 0.1, 0.6, 0.0, false));
    let assessment = pipeline()
        .analyze_with_source("c8", "some text", &source)
        .unwrap();
    assert_eq!(assessment.score, 58);
}

struct OutcomeCounter {
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl HarmlensEventHandler for OutcomeCounter {
    fn on_assessment_completed(&self, _event: &AssessmentCompletedEvent) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_assessment_failed(&self, _event: &AssessmentFailedEvent) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn pipeline_emits_outcome_events() {
    let handler = Arc::new(OutcomeCounter {
        completed: AtomicUsize::new(0),
        failed: AtomicUsize::new(0),
    });
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler.clone());
    let pipeline =
        AnalysisPipeline::with_dispatcher(&HarmlensConfig::default(), Arc::new(dispatcher))
            .unwrap();

    pipeline
        .analyze("c9", &five_signals(0.1, 0.1, 0.1, 0.1, 0.1, false))
        .unwrap();
    let _ = pipeline.analyze("c10", &[RawSignal::new("emotion", 0.9)]);

    assert_eq!(handler.completed.load(Ordering::Relaxed), 1);
    assert_eq!(handler.failed.load(Ordering::Relaxed), 1);
}

#[test]
fn custom_config_shifts_label_bands() {
    let config = HarmlensConfig::from_toml(
        r#"
[fusion]
low_max = 49
medium_max = 74
"#,
    )
    .unwrap();
    let pipeline = AnalysisPipeline::new(&config).unwrap();
    let assessment = pipeline
        .analyze("c11", &five_signals(0.9, 0.8, 0.1, 0.6, 0.0, false))
        .unwrap();
    // 58 falls in Medium under the shifted bands too, but 45 becomes Low
    assert_eq!(assessment.label, RiskLabel::Medium);

    // 0.30*0.5 + 0.25*0.6 + 0.20*0.75 = 0.45 — Low under the shifted bands
    let low = pipeline
        .analyze("c12", &five_signals(0.5, 0.6, 0.75, 0.0, 0.0, false))
        .unwrap();
    assert_eq!(low.score, 45);
    assert_eq!(low.label, RiskLabel::Low);
}
