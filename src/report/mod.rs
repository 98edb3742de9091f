pub mod html;
pub mod json;
pub mod text;

#[cfg(test)]
#[path = "../../tests/src_inline/report/fixtures.rs"]
pub mod fixtures;

use crate::model::category::Category;
use crate::model::ids::EntityId;
use crate::model::records::CourseInfo;
use crate::model::thresholds::{GroupingMode, NullScorePolicy};
use crate::pipeline::stage5_distribute::Distribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Group,
    Outcome,
}

impl ScopeKind {
    pub fn name(self) -> &'static str {
        match self {
            ScopeKind::Group => "group",
            ScopeKind::Outcome => "outcome",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub student_id: EntityId,
    pub name: Option<String>,
    pub mean: f64,
    pub n_scores: usize,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeReport {
    pub kind: ScopeKind,
    pub id: EntityId,
    pub title: String,
    pub distribution: Distribution,
    pub students: Vec<StudentRow>,
    pub details: Vec<ScopeReport>,
}

#[derive(Debug, Clone)]
pub struct ReportData {
    pub tool_name: String,
    pub tool_version: String,
    pub course_id: EntityId,
    pub course: CourseInfo,
    pub grouping: GroupingMode,
    pub null_policy: NullScorePolicy,
    pub n_results: usize,
    pub n_dropped: usize,
    pub n_null_scores: usize,
    pub pages_read: usize,
    /// Set when outcome-result pagination stopped on a failed page.
    pub incomplete: Option<String>,
    pub skipped_groups: Vec<String>,
    pub scopes: Vec<ScopeReport>,
    pub include_students: bool,
    pub elapsed_secs: f64,
}

pub fn format_mean(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn format_elapsed(secs: f64) -> String {
    format!("{:.2}", secs)
}

/// Scopes in print order: each scope followed by its detail scopes.
pub fn flatten_scopes(scopes: &[ScopeReport]) -> Vec<&ScopeReport> {
    let mut out = Vec::new();
    for scope in scopes {
        out.push(scope);
        out.extend(scope.details.iter());
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
