mod common;

use assert_matches::assert_matches;
use posture_coach_core::{PostureAnalyzer, PostureError, PostureIssue, ScoringPolicy};
use pretty_assertions::assert_eq;

#[test]
fn test_policy_loads_from_partial_toml() {
    let policy: ScoringPolicy = toml::from_str(
        r#"
        [spine]
        max_angle = 25.0

        [weights]
        neck = 0.25
        spine = 0.35
        "#,
    )
    .unwrap();

    assert_eq!(policy.spine.max_angle, 25.0);
    assert_eq!(policy.spine.penalty_per_degree, 5.0);
    assert_eq!(policy.weights.shoulders, 0.25);
    assert_eq!(policy.weights.head, 0.15);
    assert!(policy.validate().is_ok());
}

#[test]
fn test_default_policy_round_trips_through_toml() {
    let policy = ScoringPolicy::default();
    let text = toml::to_string_pretty(&policy).unwrap();
    let parsed: ScoringPolicy = toml::from_str(&text).unwrap();
    assert_eq!(parsed, policy);
}

#[test]
fn test_relaxed_spine_rule_suppresses_lean_issue() {
    let mut torso = common::upright_torso();
    // About 20 degrees of lean
    torso.left_hip.x = 0.25;
    torso.right_hip.x = 0.45;
    let frame = common::mediapipe_frame(&torso);

    let strict = PostureAnalyzer::new().analyze(&frame);
    assert!(strict.has_issue(PostureIssue::SpineLeaning));

    let mut policy = ScoringPolicy::default();
    policy.spine.max_angle = 25.0;
    let relaxed = PostureAnalyzer::with_policy(policy).unwrap().analyze(&frame);
    assert!(!relaxed.has_issue(PostureIssue::SpineLeaning));
    assert!(relaxed.overall_score > strict.overall_score);
}

#[test]
fn test_unbalanced_weights_from_toml_are_rejected() {
    let policy: ScoringPolicy = toml::from_str(
        r#"
        [weights]
        head = 0.5
        "#,
    )
    .unwrap();

    assert_matches!(
        PostureAnalyzer::with_policy(policy),
        Err(PostureError::InvalidPolicy(_))
    );
}
