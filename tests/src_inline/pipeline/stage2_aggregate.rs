use super::*;

fn id(s: &str) -> EntityId {
    EntityId::new(s).unwrap()
}

fn obs(student: &str, outcome: &str, percent: Option<f64>) -> Observation {
    Observation {
        student_id: EntityId::new(student),
        outcome_id: EntityId::new(outcome),
        percent,
    }
}

#[test]
fn test_groups_by_outcome_and_student() {
    let observations = vec![
        obs("s1", "o1", Some(0.95)),
        obs("s1", "o1", Some(0.85)),
        obs("s2", "o1", Some(0.30)),
        obs("s1", "o2", Some(0.50)),
    ];
    let out = run_stage2(&observations, NullScorePolicy::Exclude);
    assert_eq!(out.by_outcome.len(), 2);
    assert_eq!(out.by_outcome[&id("o1")][&id("s1")], vec![0.95, 0.85]);
    assert_eq!(out.by_outcome[&id("o1")][&id("s2")], vec![0.30]);
    assert_eq!(out.by_outcome[&id("o2")][&id("s1")], vec![0.50]);
    assert_eq!(out.n_dropped, 0);
}

#[test]
fn test_missing_ids_are_dropped() {
    let observations = vec![
        obs("", "o1", Some(0.9)),
        obs("s1", "", Some(0.9)),
        obs("s1", "o1", Some(0.7)),
    ];
    let out = run_stage2(&observations, NullScorePolicy::Exclude);
    assert_eq!(out.n_dropped, 2);
    assert_eq!(out.by_outcome[&id("o1")].len(), 1);
}

#[test]
fn test_null_policy_exclude_registers_student() {
    let observations = vec![obs("s1", "o1", None), obs("s2", "o1", Some(0.8)), obs("s2", "o1", None)];
    let out = run_stage2(&observations, NullScorePolicy::Exclude);
    let students = &out.by_outcome[&id("o1")];
    assert_eq!(students.len(), 2);
    assert!(students[&id("s1")].is_empty());
    assert_eq!(students[&id("s2")], vec![0.8]);
    assert_eq!(out.n_null_scores, 2);
}

#[test]
fn test_null_policy_zero_appends_zero() {
    let observations = vec![obs("s2", "o1", Some(0.8)), obs("s2", "o1", None)];
    let out = run_stage2(&observations, NullScorePolicy::CoerceZero);
    assert_eq!(out.by_outcome[&id("o1")][&id("s2")], vec![0.8, 0.0]);
}

#[test]
fn test_pool_scores_concatenates_raw_values() {
    let observations = vec![
        obs("s1", "o1", Some(1.0)),
        obs("s1", "o1", Some(1.0)),
        obs("s1", "o1", Some(1.0)),
        obs("s1", "o2", Some(0.0)),
        obs("s2", "o3", Some(0.5)),
    ];
    let out = run_stage2(&observations, NullScorePolicy::Exclude);
    let pooled = pool_scores(&out.by_outcome, &[id("o1"), id("o2"), id("o1"), id("missing")]);
    assert_eq!(pooled.len(), 1);
    // 3 x 1.0 and 1 x 0.0: pooled mean 0.75, not the 0.5 a mean of outcome means would give
    assert_eq!(pooled[&id("s1")], vec![1.0, 1.0, 1.0, 0.0]);
}
