//! Tests for the Bundle module

use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use crate::case::{CaseStatus, TestCase};
use crate::error::Error;
use crate::test_support::CaptureEmitter;

use super::Bundle;

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&'static str) + Clone) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let record = move |label: &'static str| {
        sink.lock()
            .expect("events lock poisoned")
            .push(label.to_string());
    };
    (events, record)
}

#[tokio::test]
async fn runs_cases_sequentially_with_full_hook_lifecycle() {
    let (events, record) = recorder();

    let mut bundle = Bundle::new("lifecycle");
    bundle.with_emitter(CaptureEmitter::new());
    let r = record.clone();
    bundle.before_bundle(move || {
        r("before_bundle");
        futures::future::ready(Ok(()))
    });
    let r = record.clone();
    bundle.after_bundle(move || {
        r("after_bundle");
        futures::future::ready(Ok(()))
    });
    let r = record.clone();
    bundle.before_each_case(move || {
        r("before_each");
        futures::future::ready(Ok(()))
    });
    let r = record.clone();
    bundle.after_each_case(move || {
        r("after_each");
        futures::future::ready(Ok(()))
    });
    let r = record.clone();
    bundle.add_case("first", move || {
        r("first");
        futures::future::ready(Ok(()))
    });
    let r = record.clone();
    bundle.add_case("second", move || {
        r("second");
        futures::future::ready(Ok(()))
    });

    bundle.execute().await.expect("execute failed");

    let events = events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "before_bundle",
            "before_each",
            "first",
            "after_each",
            "before_each",
            "second",
            "after_each",
            "after_bundle",
        ]
    );
}

#[tokio::test]
async fn tallies_results_and_emits_progress_and_summary() {
    let capture = CaptureEmitter::new();

    let mut bundle = Bundle::new("tally");
    bundle.with_emitter(Arc::clone(&capture) as Arc<dyn crate::Emitter>);
    bundle.add_case("passes", || async { Ok(()) });
    bundle.add_case("fails", || async { Err(anyhow!("nope")) });

    bundle.execute().await.expect("execute failed");

    assert_eq!(bundle.stats().total, 2);
    assert_eq!(bundle.stats().passed, 1);
    assert_eq!(bundle.cases()[0].status(), CaseStatus::Passed);
    assert_eq!(bundle.cases()[1].status(), CaseStatus::Failed);

    assert!(capture.contains("starting bundle tally"));
    assert!(capture.contains("1/2 PASSED: passes"));
    assert!(capture.contains("2/2 FAILED: fails\tnope"));
    assert!(capture.contains("1/2 success rate: 50.00%"));
}

#[tokio::test]
async fn second_execute_is_a_pure_noop() {
    let capture = CaptureEmitter::new();

    let mut bundle = Bundle::new("once");
    bundle.with_emitter(Arc::clone(&capture) as Arc<dyn crate::Emitter>);
    bundle.add_case("only", || async { Ok(()) });

    bundle.execute().await.expect("first execute failed");
    let lines_after_first = capture.lines().len();

    bundle.execute().await.expect("second execute failed");
    assert_eq!(capture.lines().len(), lines_after_first);
    assert_eq!(bundle.stats().total, 1);
    assert_eq!(bundle.stats().passed, 1);
}

#[tokio::test]
async fn hook_failure_aborts_remaining_steps() {
    let capture = CaptureEmitter::new();

    let mut bundle = Bundle::new("aborted");
    bundle.with_emitter(Arc::clone(&capture) as Arc<dyn crate::Emitter>);
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    bundle.before_each_case(move || {
        let counter = Arc::clone(&counter);
        async move {
            let mut calls = counter.lock().unwrap();
            *calls += 1;
            if *calls == 2 {
                Err(anyhow!("fixture gone"))
            } else {
                Ok(())
            }
        }
    });
    bundle.add_case("first", || async { Ok(()) });
    bundle.add_case("never runs", || async { Ok(()) });

    let err = bundle.execute().await.unwrap_err();
    assert!(matches!(err, Error::Hook { .. }));
    assert!(err.to_string().contains("bundle 'aborted'"));

    // The second case was never reached, and the summary was skipped.
    assert_eq!(bundle.cases()[0].status(), CaseStatus::Passed);
    assert_eq!(bundle.cases()[1].status(), CaseStatus::NotExecuted);
    assert!(!capture.contains("success rate"));

    // The guard was set: a retry is a no-op, not a re-run.
    let lines_after_abort = capture.lines().len();
    bundle.execute().await.expect("retry should be a no-op");
    assert_eq!(capture.lines().len(), lines_after_abort);
}

#[tokio::test]
async fn empty_bundle_is_trivially_complete() {
    let capture = CaptureEmitter::new();

    let mut bundle = Bundle::new("empty");
    bundle.with_emitter(Arc::clone(&capture) as Arc<dyn crate::Emitter>);

    bundle.execute().await.expect("execute failed");
    assert!(capture.contains("0/0 success rate: 0.00%"));
}

#[tokio::test]
async fn set_cases_replaces_and_add_cases_appends() {
    let mut bundle = Bundle::new("cases");
    bundle.add_case("dropped", || async { Ok(()) });
    bundle.set_cases(vec![TestCase::new("kept", || async { Ok(()) })]);
    bundle.add_cases(vec![
        TestCase::new("tail one", || async { Ok(()) }),
        TestCase::new("tail two", || async { Ok(()) }),
    ]);

    let names: Vec<&str> = bundle.cases().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["kept", "tail one", "tail two"]);
}
