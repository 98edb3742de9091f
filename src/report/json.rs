use serde::Serialize;

use crate::pipeline::stage5_distribute::format_percentage;
use crate::report::{ReportData, ScopeReport, StudentRow};

#[derive(Debug, Serialize)]
struct SummaryJson<'a> {
    tool: ToolJson<'a>,
    course: CourseJson<'a>,
    run: RunJson<'a>,
    scopes: Vec<ScopeJson<'a>>,
}

#[derive(Debug, Serialize)]
struct ToolJson<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct CourseJson<'a> {
    id: &'a str,
    name: &'a str,
    code: &'a str,
    sis_course_id: &'a str,
    account_name: &'a str,
}

#[derive(Debug, Serialize)]
struct RunJson<'a> {
    grouping: &'static str,
    null_scores: &'static str,
    n_results: usize,
    n_dropped: usize,
    n_null_scores: usize,
    pages_read: usize,
    incomplete: Option<&'a str>,
    skipped_groups: &'a [String],
    elapsed_secs: f64,
}

#[derive(Debug, Serialize)]
struct ScopeJson<'a> {
    kind: &'static str,
    id: &'a str,
    title: &'a str,
    total_students: usize,
    distribution: Vec<RowJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    students: Vec<StudentJson<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<ScopeJson<'a>>,
}

#[derive(Debug, Serialize)]
struct RowJson {
    category: &'static str,
    label: &'static str,
    count: usize,
    percentage: f64,
    display: String,
}

#[derive(Debug, Serialize)]
struct StudentJson<'a> {
    id: &'a str,
    name: Option<&'a str>,
    n_scores: usize,
    mean: f64,
    category: &'static str,
}

pub fn render_summary_json(data: &ReportData) -> serde_json::Result<String> {
    let summary = SummaryJson {
        tool: ToolJson {
            name: &data.tool_name,
            version: &data.tool_version,
        },
        course: CourseJson {
            id: data.course_id.as_str(),
            name: &data.course.course_name,
            code: &data.course.course_code,
            sis_course_id: &data.course.sis_course_id,
            account_name: &data.course.account_name,
        },
        run: RunJson {
            grouping: data.grouping.name(),
            null_scores: data.null_policy.name(),
            n_results: data.n_results,
            n_dropped: data.n_dropped,
            n_null_scores: data.n_null_scores,
            pages_read: data.pages_read,
            incomplete: data.incomplete.as_deref(),
            skipped_groups: &data.skipped_groups,
            elapsed_secs: data.elapsed_secs,
        },
        scopes: data.scopes.iter().map(scope_json).collect(),
    };
    serde_json::to_string_pretty(&summary)
}

fn scope_json(scope: &ScopeReport) -> ScopeJson<'_> {
    ScopeJson {
        kind: scope.kind.name(),
        id: scope.id.as_str(),
        title: &scope.title,
        total_students: scope.distribution.total_students,
        distribution: scope
            .distribution
            .rows
            .iter()
            .map(|r| RowJson {
                category: r.category.key(),
                label: r.category.label(),
                count: r.count,
                percentage: r.percentage,
                display: format_percentage(r.percentage),
            })
            .collect(),
        students: scope.students.iter().map(student_json).collect(),
        details: scope.details.iter().map(scope_json).collect(),
    }
}

fn student_json(row: &StudentRow) -> StudentJson<'_> {
    StudentJson {
        id: row.student_id.as_str(),
        name: row.name.as_deref(),
        n_scores: row.n_scores,
        mean: row.mean,
        category: row.category.key(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
