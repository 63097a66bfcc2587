use std::sync::Arc;
use std::time::Duration;

use bfhl::dispatch::{DispatchConfig, Dispatcher};
use bfhl::error::BfhlError;
use bfhl::operations::Outcome;
use bfhl::oracle::mock::{MockOracle, MockReply};

fn dispatcher(oracle: Arc<MockOracle>, config: DispatchConfig) -> Dispatcher {
    Dispatcher::new(oracle, config)
}

fn numeric_dispatcher() -> Dispatcher {
    dispatcher(Arc::new(MockOracle::new(vec![])), DispatchConfig::default())
}

async fn dispatch(d: &Dispatcher, body: &str) -> Result<Outcome, BfhlError> {
    d.dispatch(body.as_bytes()).await
}

#[tokio::test]
async fn fibonacci_five() {
    let d = numeric_dispatcher();
    let outcome = dispatch(&d, r#"{"fibonacci": 5}"#).await.unwrap();
    assert_eq!(outcome, Outcome::Sequence(vec![0, 1, 1, 2, 3]));
}

#[tokio::test]
async fn fibonacci_zero_is_empty() {
    let d = numeric_dispatcher();
    let outcome = dispatch(&d, r#"{"fibonacci": 0}"#).await.unwrap();
    assert_eq!(outcome, Outcome::Sequence(vec![]));
}

#[tokio::test]
async fn fibonacci_over_limit_is_invalid_input() {
    let d = numeric_dispatcher();
    let err = dispatch(&d, r#"{"fibonacci": 95}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::InvalidInput(ref m) if m.contains("94")));

    let d = dispatcher(
        Arc::new(MockOracle::new(vec![])),
        DispatchConfig {
            max_fibonacci: 10,
            ..DispatchConfig::default()
        },
    );
    assert!(dispatch(&d, r#"{"fibonacci": 10}"#).await.is_ok());
    assert!(matches!(
        dispatch(&d, r#"{"fibonacci": 11}"#).await,
        Err(BfhlError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn prime_filter() {
    let d = numeric_dispatcher();
    let outcome = dispatch(&d, r#"{"prime": [1, 2, 3, 4, 17, 18]}"#).await.unwrap();
    assert_eq!(outcome, Outcome::Sequence(vec![2, 3, 17]));
}

#[tokio::test]
async fn lcm_and_hcf() {
    let d = numeric_dispatcher();
    assert_eq!(
        dispatch(&d, r#"{"lcm": [4, 6]}"#).await.unwrap(),
        Outcome::Number(12)
    );
    assert_eq!(
        dispatch(&d, r#"{"hcf": [12, 18]}"#).await.unwrap(),
        Outcome::Number(6)
    );
}

#[tokio::test]
async fn shape_errors() {
    let d = numeric_dispatcher();
    for body in ["{}", r#"{"fibonacci": 3, "prime": [2]}"#, "[]", "not json", ""] {
        let err = dispatch(&d, body).await.unwrap_err();
        assert!(
            matches!(err, BfhlError::InvalidRequestShape),
            "body {:?} gave {:?}",
            body,
            err
        );
    }
}

#[tokio::test]
async fn unknown_key() {
    let d = numeric_dispatcher();
    let err = dispatch(&d, r#"{"unknown": 1}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::UnsupportedOperation(_)));
    assert_eq!(err.to_string(), "Unsupported key");
}

#[tokio::test]
async fn non_integer_reduction_is_internal_by_default() {
    let d = numeric_dispatcher();
    let err = dispatch(&d, r#"{"lcm": [4, 1.5]}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::Internal(_)));
    assert_eq!(err.to_string(), "There is problem in server");

    let err = dispatch(&d, r#"{"hcf": ["12", 18]}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::Internal(_)));
}

#[tokio::test]
async fn non_integer_reduction_is_invalid_input_when_strict() {
    let d = dispatcher(
        Arc::new(MockOracle::new(vec![])),
        DispatchConfig {
            strict_reductions: true,
            ..DispatchConfig::default()
        },
    );
    let err = dispatch(&d, r#"{"lcm": [4, 1.5]}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::InvalidInput(ref m) if m == "LCM input must contain only integers"));

    let err = dispatch(&d, r#"{"hcf": [true]}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::InvalidInput(ref m) if m == "HCF input must contain only integers"));
}

#[tokio::test]
async fn overflow_is_internal_even_when_strict() {
    let d = dispatcher(
        Arc::new(MockOracle::new(vec![])),
        DispatchConfig {
            strict_reductions: true,
            ..DispatchConfig::default()
        },
    );
    let body = format!(r#"{{"lcm": [{}, {}]}}"#, u64::MAX, u64::MAX - 1);
    let err = dispatch(&d, &body).await.unwrap_err();
    assert!(matches!(err, BfhlError::Internal(_)));
}

#[tokio::test]
async fn ai_answer_is_sanitized() {
    let oracle = Arc::new(MockOracle::text("Paris."));
    let d = dispatcher(Arc::clone(&oracle), DispatchConfig::default());

    let outcome = dispatch(&d, r#"{"AI": "What is the capital of France?"}"#)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Word("Paris".to_string()));
    assert_eq!(oracle.calls(), 1);
    assert!(oracle.prompts()[0].contains("EXACTLY ONE WORD"));
}

#[tokio::test]
async fn ai_missing_candidate_is_unknown() {
    let oracle = Arc::new(MockOracle::new(vec![MockReply::Missing]));
    let d = dispatcher(oracle, DispatchConfig::default());
    let outcome = dispatch(&d, r#"{"AI": "?"}"#).await.unwrap();
    assert_eq!(outcome, Outcome::Word("Unknown".to_string()));
}

#[tokio::test]
async fn ai_failure_is_internal() {
    let oracle = Arc::new(MockOracle::new(vec![MockReply::Fail(
        "connection reset".into(),
    )]));
    let d = dispatcher(oracle, DispatchConfig::default());
    let err = dispatch(&d, r#"{"AI": "question"}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::Internal(_)));
}

#[tokio::test]
async fn ai_timeout_is_internal() {
    let oracle = Arc::new(MockOracle::new(vec![MockReply::Stall(Duration::from_secs(10))]));
    let d = dispatcher(
        oracle,
        DispatchConfig {
            ai_timeout: Duration::from_millis(20),
            ..DispatchConfig::default()
        },
    );
    let err = dispatch(&d, r#"{"AI": "question"}"#).await.unwrap_err();
    assert!(matches!(err, BfhlError::Internal(_)));
}

#[tokio::test]
async fn invalid_ai_input_never_calls_oracle() {
    let oracle = Arc::new(MockOracle::text("never"));
    let d = dispatcher(Arc::clone(&oracle), DispatchConfig::default());

    for body in [r#"{"AI": ""}"#, r#"{"AI": "   "}"#, r#"{"AI": 3}"#, r#"{"AI": ["q"]}"#] {
        let err = dispatch(&d, body).await.unwrap_err();
        assert!(matches!(err, BfhlError::InvalidInput(ref m) if m == "AI input must be a string"));
    }
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn slow_prime_filter_does_not_hold_the_runtime() {
    // Single-threaded test runtime: if the filter ran inline, the spawned
    // request would finish during the yield below.
    let d = Arc::new(numeric_dispatcher());
    let big = 999_999_999_999_989u64;
    let body = format!(r#"{{"prime": [{big}, {big}, {big}, {big}]}}"#);

    let slow = {
        let d = Arc::clone(&d);
        tokio::spawn(async move { d.dispatch(body.as_bytes()).await })
    };
    tokio::task::yield_now().await;

    let quick = dispatch(&d, r#"{"fibonacci": 3}"#).await.unwrap();
    assert_eq!(quick, Outcome::Sequence(vec![0, 1, 1]));
    assert!(!slow.is_finished());

    let outcome = slow.await.unwrap().unwrap();
    assert_eq!(outcome, Outcome::Sequence(vec![big; 4]));
}
