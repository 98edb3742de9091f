use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::html::render_report_html;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ReportData, ScopeReport, flatten_scopes, format_mean};

pub fn write_reports(data: &ReportData, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(data))?;

    let summary_path = out_dir.join("summary.json");
    let json = render_summary_json(data).map_err(std::io::Error::other)?;
    write_text(&summary_path, &json)?;

    let html_path = out_dir.join("report.html");
    write_text(&html_path, &render_report_html(data))?;

    if data.include_students {
        let students_path = out_dir.join("students.tsv");
        write_students_tsv(data, &students_path)?;
        crate::info!("students.tsv: {} rows", student_row_count(data));
    }

    crate::info!("reports written to {}", out_dir.display());
    Ok(())
}

fn write_students_tsv(data: &ReportData, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "scope_kind",
        "scope_id",
        "scope_title",
        "parent_id",
        "student_id",
        "student_name",
        "n_scores",
        "mean",
        "category",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for scope in &data.scopes {
        write_scope_rows(&mut w, scope, None)?;
        for detail in &scope.details {
            write_scope_rows(&mut w, detail, Some(scope))?;
        }
    }
    w.flush()
}

fn write_scope_rows<W: Write>(
    w: &mut W,
    scope: &ScopeReport,
    parent: Option<&ScopeReport>,
) -> std::io::Result<()> {
    for row in &scope.students {
        let line = [
            scope.kind.name().to_string(),
            scope.id.to_string(),
            tsv_field(&scope.title),
            parent.map(|p| p.id.to_string()).unwrap_or_default(),
            row.student_id.to_string(),
            row.name.as_deref().map(tsv_field).unwrap_or_default(),
            row.n_scores.to_string(),
            format_mean(row.mean),
            row.category.key().to_string(),
        ]
        .join("\t");
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

fn tsv_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    Ok(())
}

/// Row count `students.tsv` will have, header excluded.
pub fn student_row_count(data: &ReportData) -> usize {
    flatten_scopes(&data.scopes)
        .iter()
        .map(|s| s.students.len())
        .sum()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
