use crate::model::category::{Category, category_order};
use crate::pipeline::stage5_distribute::format_percentage;
use crate::report::{ReportData, ScopeKind, ScopeReport, format_elapsed};

const CATEGORY_WIDTH: usize = 22;

pub fn render_report_text(data: &ReportData) -> String {
    let mut out = String::new();

    out.push_str("Competency Mastery Report\n");
    out.push_str("=========================\n\n");

    if !data.course.account_name.is_empty() {
        out.push_str(&format!("{}\n", data.course.account_name));
    }
    out.push_str(&format!(
        "Course: {} ({})\n",
        data.course.course_name, data.course.course_code
    ));
    if !data.course.sis_course_id.is_empty() {
        out.push_str(&format!("SIS course id: {}\n", data.course.sis_course_id));
    }
    out.push_str(&format!("Canvas course id: {}\n", data.course_id));
    out.push_str(&format!(
        "Results: {} (dropped {}, null scores {} handled as '{}')\n",
        data.n_results,
        data.n_dropped,
        data.n_null_scores,
        data.null_policy.name()
    ));
    out.push_str(&format!("Grouping: {}\n\n", data.grouping.name()));

    out.push_str("Percentage of students by category\n");
    out.push_str("----------------------------------\n");

    for scope in &data.scopes {
        out.push('\n');
        render_scope(&mut out, scope, "");
        for detail in &scope.details {
            out.push('\n');
            render_scope(&mut out, detail, "    ");
        }
    }

    if data.incomplete.is_some() || !data.skipped_groups.is_empty() {
        out.push_str("\nWarnings\n");
        if let Some(msg) = &data.incomplete {
            out.push_str(&format!("- outcome results are incomplete ({msg})\n"));
        }
        for title in &data.skipped_groups {
            out.push_str(&format!("- competency group '{title}' has no outcomes\n"));
        }
    }

    out.push_str(&format!(
        "\nTime to build the report: {} seconds\n",
        format_elapsed(data.elapsed_secs)
    ));

    out
}

fn render_scope(out: &mut String, scope: &ScopeReport, indent: &str) {
    let heading = match scope.kind {
        ScopeKind::Group => format!("## {}", scope.title),
        ScopeKind::Outcome => format!("### {}", scope.title),
    };
    out.push_str(&format!(
        "{indent}{heading} ({} students)\n",
        scope.distribution.total_students
    ));
    out.push_str(&format!(
        "{indent}{:<width$}{:>10}\n",
        "Category",
        "Percentage",
        width = CATEGORY_WIDTH
    ));
    for row in &scope.distribution.rows {
        out.push_str(&format!(
            "{indent}{:<width$}{:>10}\n",
            row.category.label(),
            format_percentage(row.percentage),
            width = CATEGORY_WIDTH
        ));
    }
    if scope.distribution.total_students == 0 {
        out.push_str(&format!("{indent}(no results for this scope)\n"));
    }
    if let Some(top) = majority_category(scope) {
        out.push_str(&format!("{indent}Most students: {}\n", top.label()));
    }
}

/// Highest-count category; ties go to the higher mastery band.
fn majority_category(scope: &ScopeReport) -> Option<Category> {
    let mut best: Option<(Category, usize)> = None;
    for &category in category_order() {
        let count = scope.distribution.row(category).map_or(0, |r| r.count);
        if count > 0 && best.is_none_or(|(_, c)| count > c) {
            best = Some((category, count));
        }
    }
    best.map(|(c, _)| c)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
