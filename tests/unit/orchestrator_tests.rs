/*!
 * Tests for the validation orchestrator
 */

use etlcheck::errors::{ProviderError, ValidationError};
use etlcheck::providers::Role;
use etlcheck::providers::mock::MockProvider;
use etlcheck::validation::{
    EtlKind, OrchestratorOptions, SourceDocument, TargetDocument, ValidationOrchestrator,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn documents(source: &str, target: &str) -> (SourceDocument, TargetDocument) {
    (
        SourceDocument::from_bytes("m_load.xml", EtlKind::Informatica, source.as_bytes().to_vec()),
        TargetDocument::from_bytes("load.py", target.as_bytes().to_vec()),
    )
}

/// Large source, small target: two validation calls plus one correction
#[tokio::test]
async fn test_run_withLongerSource_shouldPadTargetAndCorrectFromFirstChunks() {
    let source_text = format!("{}{}", "a".repeat(12_000), "b".repeat(3_000));
    let target_text = "t".repeat(5_000);
    let (source, target) = documents(&source_text, &target_text);

    let provider = MockProvider::working();
    let orchestrator = ValidationOrchestrator::new(&provider, OrchestratorOptions::default());
    let outcome = orchestrator.run(&source, &target).await.unwrap();

    assert_eq!(outcome.source_chunks, 2);
    assert_eq!(outcome.target_chunks, 1);
    assert_eq!(outcome.report.len(), 2);
    assert_eq!(outcome.calls_issued(), 3);
    assert_eq!(provider.call_count(), 3);

    let requests = provider.requests();

    // Second pair carries the tail of the source and an empty target chunk
    let second = requests[1].user_text();
    assert!(second.contains(&"b".repeat(3_000)));
    assert!(second.contains("PySpark Output (chunk 2):\n\n"));

    // Correction uses chunk 0 of both sides under an expert system prompt
    let correction = &requests[2];
    assert_eq!(correction.messages[0].role, Role::System);
    assert_eq!(correction.messages[0].content, "You are an expert PySpark converter.");
    let user = correction.user_text();
    assert!(user.contains(&"a".repeat(12_000)));
    assert!(!user.contains('b'));
    assert!(user.contains(&target_text));
}

#[tokio::test]
async fn test_run_shouldMergeTrimmedPartsWithBlankLine() {
    let provider = MockProvider::working().with_custom_response(|call, _| format!("\n  response {}  \n", call));
    let options = OrchestratorOptions { max_chars: 3, ..Default::default() };
    let orchestrator = ValidationOrchestrator::new(&provider, options);
    let (source, target) = documents("abcdef", "uvw");

    let outcome = orchestrator.run(&source, &target).await.unwrap();

    assert_eq!(outcome.report.merged(), "response 1\n\nresponse 2");
    assert_eq!(outcome.corrected.as_str(), "response 3");
}

#[tokio::test]
async fn test_run_shouldUseConfiguredTemperatureAndLanguage() {
    let provider = MockProvider::working();
    let options = OrchestratorOptions {
        max_chars: 100,
        temperature: 0.3,
        target_language: "Snowpark".to_string(),
    };
    let orchestrator = ValidationOrchestrator::new(&provider, options);
    let (_, target) = documents("", "df = session.table('x')");
    let source = SourceDocument::from_bytes("job.dsx", EtlKind::Datastage, b"BEGIN DSJOB".to_vec());

    orchestrator.run(&source, &target).await.unwrap();

    for request in provider.requests() {
        assert_eq!(request.temperature, 0.3);
    }
    let first = provider.requests()[0].user_text();
    assert!(first.starts_with("You are validating Datastage to Snowpark conversion (Part 1)."));
}

/// Failure on the second of three calls aborts with nothing kept
#[tokio::test]
async fn test_run_withFailureOnSecondCall_shouldStopIssuingCalls() {
    let provider = MockProvider::fail_on_call(2);
    let options = OrchestratorOptions { max_chars: 1, ..Default::default() };
    let orchestrator = ValidationOrchestrator::new(&provider, options);
    let (source, target) = documents("abc", "x");

    let err = orchestrator.run(&source, &target).await.unwrap_err();

    assert_eq!(provider.call_count(), 2);
    assert_eq!(err.to_string(), "Error during validation");
    match err {
        ValidationError::ExternalServiceFailure { source: ProviderError::ApiError { status_code, .. }, .. } => {
            assert_eq!(status_code, 503)
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_run_withFailingCorrection_shouldReportCorrectionStage() {
    let provider = MockProvider::fail_on_call(2);
    let orchestrator = ValidationOrchestrator::new(&provider, OrchestratorOptions::default());
    let (source, target) = documents("a", "b");

    match orchestrator.run(&source, &target).await {
        Err(ValidationError::ExternalServiceFailure { stage, .. }) => assert_eq!(stage, "correction"),
        other => panic!("unexpected result: {other:?}"),
    }
}

/// Both documents empty: no validation calls, one correction call with empty chunks
#[tokio::test]
async fn test_run_withEmptyDocuments_shouldOnlyIssueCorrection() {
    let provider = MockProvider::working();
    let orchestrator = ValidationOrchestrator::new(&provider, OrchestratorOptions::default());
    let (source, target) = documents("", "");

    let outcome = orchestrator.run(&source, &target).await.unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.report.merged(), "");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_run_withEmptyResponses_shouldKeepEmptyParts() {
    let provider = MockProvider::empty();
    let orchestrator = ValidationOrchestrator::new(&provider, OrchestratorOptions { max_chars: 1, ..Default::default() });
    let (source, target) = documents("ab", "c");

    let outcome = orchestrator.run(&source, &target).await.unwrap();
    assert_eq!(outcome.report.parts(), ["", ""]);
    assert_eq!(outcome.report.merged(), "\n\n");
}

#[tokio::test]
async fn test_run_shouldReportProgressPerPair() {
    let provider = MockProvider::working();
    let ticks = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&ticks);
    let orchestrator = ValidationOrchestrator::new(&provider, OrchestratorOptions { max_chars: 2, ..Default::default() })
        .with_progress(move |completed, total| {
            assert_eq!(total, 3);
            assert_eq!(completed, seen.fetch_add(1, Ordering::SeqCst) + 1);
        });
    let (source, target) = documents("aabbcc", "x");

    orchestrator.run(&source, &target).await.unwrap();
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
}

/// Calls are awaited one at a time, so delays add up across pairs
#[tokio::test]
async fn test_run_withSlowProvider_shouldIssueCallsSequentially() {
    let provider = MockProvider::slow(25);
    let orchestrator = ValidationOrchestrator::new(&provider, OrchestratorOptions { max_chars: 1, ..Default::default() });
    let (source, target) = documents("abc", "x");

    let started = std::time::Instant::now();
    let outcome = orchestrator.run(&source, &target).await.unwrap();

    assert_eq!(provider.call_count(), 4);
    assert_eq!(outcome.report.parts().len(), 3);
    assert!(started.elapsed() >= std::time::Duration::from_millis(100));
}
