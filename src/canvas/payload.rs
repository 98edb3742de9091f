use serde_json::Value;

use crate::model::ids::EntityId;
use crate::model::records::{CompetencyGroup, CourseInfo, Observation, Outcome, fallback_outcome_title};

/// Normalizes a list response to a sequence. Canvas answers some list
/// endpoints with a bare array and others with an object wrapping the array.
pub fn as_sequence(body: &Value, key: &str) -> Vec<Value> {
    match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get(key) {
                return items.clone();
            }
            map.values()
                .find_map(|v| match v {
                    Value::Array(items) => Some(items.clone()),
                    _ => None,
                })
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

pub fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn non_empty_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn percent_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    }
}

pub fn observation_from_json(value: &Value) -> Observation {
    let links = value.get("links");
    let student_id = links
        .and_then(|l| l.get("user"))
        .and_then(EntityId::from_json);
    let outcome_id = links
        .and_then(|l| l.get("learning_outcome"))
        .and_then(EntityId::from_json);
    Observation {
        student_id,
        outcome_id,
        percent: percent_value(value.get("percent")),
    }
}

/// Accepts either an outcome object or an outcome link wrapping it under `outcome`.
pub fn outcome_from_json(value: &Value) -> Option<Outcome> {
    let node = value.get("outcome").unwrap_or(value);
    let id = node.get("id").and_then(EntityId::from_json)?;
    let title = non_empty_string(node, "title").unwrap_or_else(|| fallback_outcome_title(&id));
    Some(Outcome { id, title })
}

pub fn group_from_json(value: &Value) -> Option<CompetencyGroup> {
    let node = value.get("outcome_group").unwrap_or(value);
    let id = node.get("id").and_then(EntityId::from_json)?;
    Some(CompetencyGroup {
        id,
        title: string_field(node, "title"),
    })
}

pub fn course_info_from_json(course: &Value, account: &Value) -> CourseInfo {
    CourseInfo {
        course_name: string_field(course, "name"),
        course_code: string_field(course, "course_code"),
        sis_course_id: string_field(course, "sis_course_id"),
        account_name: string_field(account, "name"),
    }
}

pub fn title_from_json(value: &Value) -> Option<String> {
    non_empty_string(value, "title")
}

pub fn user_name_from_json(value: &Value) -> Option<String> {
    non_empty_string(value, "name").or_else(|| non_empty_string(value, "sortable_name"))
}

#[cfg(test)]
#[path = "../../tests/src_inline/canvas/payload.rs"]
mod tests;
