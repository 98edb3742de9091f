use super::*;
use crate::report::fixtures::sample_report;
use serde_json::Value;

#[test]
fn test_summary_json_shape() {
    let json = render_summary_json(&sample_report()).unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["tool"]["name"], "canvas-masteryqc");
    assert_eq!(v["course"]["id"], "77");
    assert_eq!(v["run"]["grouping"], "groups");
    assert_eq!(v["run"]["null_scores"], "exclude");
    assert_eq!(v["run"]["skipped_groups"][0], "CP empty");
    assert!(v["run"]["incomplete"].is_null());

    let group = &v["scopes"][0];
    assert_eq!(group["kind"], "group");
    assert_eq!(group["total_students"], 2);
    let rows = group["distribution"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1]["category"], "meets");
    assert_eq!(rows[1]["display"], "50.0%");
    assert_eq!(group["students"][0]["name"], "Ana");
    assert!(group["students"][1]["name"].is_null());
    assert_eq!(group["details"][0]["kind"], "outcome");
}

#[test]
fn test_students_omitted_when_empty() {
    let mut data = sample_report();
    data.scopes[0].students.clear();
    data.scopes[0].details.clear();
    let v: Value = serde_json::from_str(&render_summary_json(&data).unwrap()).unwrap();
    assert!(v["scopes"][0].get("students").is_none());
    assert!(v["scopes"][0].get("details").is_none());
}
