use html_escape::encode_text;

use crate::pipeline::stage5_distribute::format_percentage;
use crate::report::{ReportData, ScopeKind, ScopeReport};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;}\
table{border-collapse:collapse;width:60%;margin-bottom:1.5em;}\
th,td{text-align:left;padding:4px 8px;border:1px solid #ddd;}\
td.pct{text-align:center;width:5%;}";

pub fn render_report_html(data: &ReportData) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n",
        encode_text(&data.course.course_name)
    ));
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    if !data.course.account_name.is_empty() {
        out.push_str(&format!("<h2>{}</h2>\n", encode_text(&data.course.account_name)));
    }
    out.push_str(&format!(
        "<h4>Course: {} ({})</h4>\n<hr>\n",
        encode_text(&data.course.course_name),
        encode_text(&data.course.course_code)
    ));
    out.push_str("<h3>Percentage of students by category</h3>\n");

    for scope in &data.scopes {
        render_scope(&mut out, scope);
        for detail in &scope.details {
            render_scope(&mut out, detail);
        }
        out.push_str("<hr>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_scope(out: &mut String, scope: &ScopeReport) {
    let tag = match scope.kind {
        ScopeKind::Group => "h4",
        ScopeKind::Outcome => "h5",
    };
    out.push_str(&format!("<{tag}>{}</{tag}>\n", encode_text(&scope.title)));
    out.push_str("<table>\n<tr><th>Category</th><th>Percentage</th></tr>\n");
    for row in &scope.distribution.rows {
        out.push_str(&format!(
            "<tr><td style=\"background-color: {}; color: {};\">{}</td><td class=\"pct\">{}</td></tr>\n",
            row.category.background_color(),
            row.category.text_color(),
            row.category.label(),
            format_percentage(row.percentage)
        ));
    }
    out.push_str("</table>\n");
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/html.rs"]
mod tests;
