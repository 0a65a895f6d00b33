//! Convergence matcher and poller tests.

mod common;

use common::{matching_document, stale_document, widget_descriptor};
use regprobe::error::ProbeError;
use regprobe::matcher;
use regprobe::poller::{poll, ConvergenceResult, PollOutcome, PollSchedule};
use std::time::{Duration, Instant};

// ============================================================================
// Matcher tests
// ============================================================================

#[test]
fn matcher_accepts_document_with_both_tokens() {
    let descriptor = widget_descriptor();
    let doc = matching_document(&descriptor);
    assert!(matcher::matches(&doc, &descriptor));
}

#[test]
fn matcher_requires_definition_token() {
    let descriptor = widget_descriptor();
    // Route present, schema definition absent.
    let doc = br#"{"paths":{"/apis/example.com/v1/widgets":{}},"definitions":{}}"#;
    assert!(!matcher::matches(doc, &descriptor));
}

#[test]
fn matcher_requires_route_token() {
    let descriptor = widget_descriptor();
    // Schema definition present, route absent.
    let doc = br#"{"paths":{},"definitions":{"example.com.v1.Widget":{}}}"#;
    assert!(!matcher::matches(doc, &descriptor));
}

#[test]
fn matcher_rejects_stale_document() {
    assert!(!matcher::matches(&stale_document(), &widget_descriptor()));
}

#[test]
fn matcher_tolerates_invalid_utf8() {
    let descriptor = widget_descriptor();
    let doc: Vec<u8> = vec![0xff, 0x80, 0x00, b'{', b'}'];
    assert!(!matcher::matches(&doc, &descriptor));
}

#[test]
fn matcher_token_derivation() {
    let descriptor = widget_descriptor();
    assert_eq!(descriptor.definition_token(), "example.com.v1.Widget");
    assert_eq!(descriptor.route_token(), "/apis/example.com/v1/widgets");
    assert_eq!(descriptor.registry_name(), "widgets.example.com");
}

// ============================================================================
// Poller tests
// ============================================================================

#[test]
fn poller_converges_on_nth_attempt() {
    // Not-yet for the first two calls, converged on the third.
    let mut calls = 0u32;
    let schedule = PollSchedule::new(Duration::from_millis(10), Duration::from_millis(500));

    let result = poll(schedule, || {
        calls += 1;
        if calls < 3 {
            PollOutcome::NotYetConverged
        } else {
            PollOutcome::Converged
        }
    });

    match result {
        ConvergenceResult::Converged { attempts } => assert_eq!(attempts, 3),
        other => panic!("expected Converged, got {:?}", other),
    }
    assert_eq!(calls, 3);
}

#[test]
fn poller_times_out_when_never_converging() {
    let mut calls = 0u32;
    let schedule = PollSchedule::new(Duration::from_millis(10), Duration::from_millis(100));
    let started = Instant::now();

    let result = poll(schedule, || {
        calls += 1;
        PollOutcome::NotYetConverged
    });

    match result {
        ConvergenceResult::TimedOut { attempts } => {
            assert_eq!(attempts, calls);
            // Several probes fit in the window; the exact count depends on
            // sleep jitter, so only assert a conservative lower bound.
            assert!(attempts >= 3, "expected >= 3 attempts, got {}", attempts);
        }
        other => panic!("expected TimedOut, got {:?}", other),
    }
    // The full window is exhausted; there is no early exit short of
    // convergence or a hard error.
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[test]
fn poller_aborts_immediately_on_hard_error() {
    let mut calls = 0u32;
    let schedule = PollSchedule::new(Duration::from_millis(10), Duration::from_millis(500));

    let result = poll(schedule, || {
        calls += 1;
        PollOutcome::ProbeFailed(ProbeError::new("connection refused"))
    });

    match result {
        ConvergenceResult::Aborted(error) => {
            assert!(error.message.contains("connection refused"));
        }
        other => panic!("expected Aborted, got {:?}", other),
    }
    // Exactly one invocation; hard errors are never retried.
    assert_eq!(calls, 1);
}

#[test]
fn poller_probes_at_least_once_with_tiny_timeout() {
    // Timeout shorter than interval still gets one probe in.
    let mut calls = 0u32;
    let schedule = PollSchedule::new(Duration::from_millis(50), Duration::from_millis(1));

    let result = poll(schedule, || {
        calls += 1;
        PollOutcome::NotYetConverged
    });

    assert!(matches!(result, ConvergenceResult::TimedOut { .. }));
    assert!(calls >= 1);
}

#[test]
fn poller_converged_takes_precedence_over_deadline() {
    // A probe that converges exactly when the deadline would expire still
    // reports convergence; the deadline check only applies to "not yet".
    let schedule = PollSchedule::new(Duration::from_millis(10), Duration::from_millis(0));
    let result = poll(schedule, || PollOutcome::Converged);
    assert!(result.is_converged());
}
