use std::time::Duration;

use assert_matches::assert_matches;

use backoff_retry::policy::{
    BackoffPolicy, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY_MS,
    DEFAULT_MAX_RANDOM_JITTER_MS,
};
use backoff_retry::PolicyError;

#[test]
fn default_policy_retries_forever_with_jitter() {
    let policy = BackoffPolicy::default();

    assert_eq!(policy.max_retries(), 0);
    assert!(policy.is_unlimited());
    assert_eq!(policy.max_backoff(), Duration::ZERO);
    assert_eq!(policy.backoff_multiplier(), DEFAULT_BACKOFF_MULTIPLIER);
    assert_eq!(
        policy.max_random_jitter(),
        Duration::from_millis(DEFAULT_MAX_RANDOM_JITTER_MS)
    );
    assert_eq!(
        policy.initial_delay(),
        Duration::from_millis(DEFAULT_INITIAL_DELAY_MS)
    );
    assert!(!policy.logging_enabled());
}

#[test]
fn custom_policy_keeps_inputs() {
    let policy = BackoffPolicy::new(10, 6000, 2.0, 500, 500, true).expect("policy should validate");

    assert_eq!(policy.max_retries(), 10);
    assert!(!policy.is_unlimited());
    assert_eq!(policy.max_backoff(), Duration::from_millis(6000));
    assert_eq!(policy.backoff_multiplier(), 2.0);
    assert_eq!(policy.max_random_jitter(), Duration::from_millis(500));
    assert_eq!(policy.initial_delay(), Duration::from_millis(500));
    assert!(policy.logging_enabled());
}

#[test]
fn identical_arguments_build_equal_policies() {
    let first = BackoffPolicy::new(3, 0, 1.5, 0, 100, false).expect("policy should validate");
    let second = BackoffPolicy::new(3, 0, 1.5, 0, 100, false).expect("policy should validate");

    assert_eq!(first, second);
}

#[test]
fn allows_shrinking_multiplier_and_zero_delays() {
    let policy = BackoffPolicy::new(0, 0, 0.5, 0, 0, false).expect("policy should validate");

    assert_eq!(policy.backoff_multiplier(), 0.5);
    assert_eq!(policy.initial_delay(), Duration::ZERO);
}

#[test]
fn rejects_negative_max_retries() {
    let err = BackoffPolicy::new(-1, 6000, 2.0, 500, 500, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NegativeMaxRetries(-1));
}

#[test]
fn rejects_max_retries_above_u32() {
    let err = BackoffPolicy::new(i64::from(u32::MAX) + 1, 0, 2.0, 0, 0, false)
        .expect_err("should fail");
    assert_matches!(err, PolicyError::MaxRetriesTooLarge(n) if n == i64::from(u32::MAX) + 1);
}

#[test]
fn rejects_negative_max_backoff() {
    let err = BackoffPolicy::new(10, -1, 2.0, 500, 500, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NegativeMaxBackoff(-1));
}

#[test]
fn rejects_non_positive_multiplier() {
    for multiplier in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = BackoffPolicy::new(10, 6000, multiplier, 500, 500, false)
            .expect_err("should fail");
        assert_matches!(err, PolicyError::NonPositiveMultiplier(_));
    }
}

#[test]
fn rejects_negative_jitter() {
    let err = BackoffPolicy::new(10, 6000, 2.0, -1, 500, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NegativeJitter(-1));
}

#[test]
fn rejects_negative_initial_delay() {
    let err = BackoffPolicy::new(10, 6000, 2.0, 500, -1, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NegativeInitialDelay(-1));
}

#[test]
fn reports_first_violation_in_argument_order() {
    let err = BackoffPolicy::new(-1, -2, -3.0, -4, -5, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NegativeMaxRetries(-1));

    let err = BackoffPolicy::new(1, -2, -3.0, -4, -5, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NegativeMaxBackoff(-2));

    let err = BackoffPolicy::new(1, 2, -3.0, -4, -5, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NonPositiveMultiplier(m) if m == -3.0);

    let err = BackoffPolicy::new(1, 2, 3.0, -4, -5, false).expect_err("should fail");
    assert_matches!(err, PolicyError::NegativeJitter(-4));
}

#[test]
fn error_messages_name_the_field() {
    let err = BackoffPolicy::new(10, 6000, 2.0, -7, 500, false).expect_err("should fail");
    assert_eq!(err.to_string(), "`max_random_jitter` cannot be negative, got -7ms");
}
