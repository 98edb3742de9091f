use crate::model::ids::EntityId;

const COMPETENCY_PREFIXES: &[&str] = &["cd", "cp", "cg"];

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub student_id: Option<EntityId>,
    pub outcome_id: Option<EntityId>,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub id: EntityId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetencyGroup {
    pub id: EntityId,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseInfo {
    pub course_name: String,
    pub course_code: String,
    pub sis_course_id: String,
    pub account_name: String,
}

pub fn fallback_outcome_title(id: &EntityId) -> String {
    format!("Outcome {id}")
}

pub fn fallback_user_name(id: &EntityId) -> String {
    format!("User {id}")
}

/// Root competency groups are recognised by a case-insensitive title prefix.
pub fn is_competency_root(title: &str) -> bool {
    let lower = title.trim_start().to_lowercase();
    COMPETENCY_PREFIXES.iter().any(|p| lower.starts_with(p))
}

impl CompetencyGroup {
    pub fn is_root(&self) -> bool {
        is_competency_root(&self.title)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/records.rs"]
mod tests;
