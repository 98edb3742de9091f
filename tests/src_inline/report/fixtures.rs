use crate::model::category::Category;
use crate::model::ids::EntityId;
use crate::model::records::CourseInfo;
use crate::model::thresholds::{GroupingMode, NullScorePolicy};
use crate::pipeline::stage2_aggregate::StudentScores;
use crate::pipeline::stage5_distribute::distribute;
use crate::report::{ReportData, ScopeKind, ScopeReport, StudentRow};

fn id(s: &str) -> EntityId {
    EntityId::new(s).unwrap()
}

fn scores(values: Vec<(&str, Vec<f64>)>) -> StudentScores {
    values.into_iter().map(|(s, v)| (id(s), v)).collect()
}

fn student(s: &str, name: Option<&str>, mean: f64, n: usize, category: Category) -> StudentRow {
    StudentRow {
        student_id: id(s),
        name: name.map(str::to_string),
        mean,
        n_scores: n,
        category,
    }
}

/// One group "CD1 <Reasoning>" (s1 Meets, s2 Well below) with one outcome detail.
pub fn sample_report() -> ReportData {
    let detail = ScopeReport {
        kind: ScopeKind::Outcome,
        id: id("o1"),
        title: "Argues\twith evidence".to_string(),
        distribution: distribute(&scores(vec![("s1", vec![0.95]), ("s2", vec![0.30])])),
        students: vec![
            student("s1", Some("Ana"), 0.95, 1, Category::Exceeds),
            student("s2", None, 0.30, 1, Category::WellBelow),
        ],
        details: Vec::new(),
    };
    let group = ScopeReport {
        kind: ScopeKind::Group,
        id: id("10"),
        title: "CD1 <Reasoning>".to_string(),
        distribution: distribute(&scores(vec![
            ("s1", vec![0.95, 0.50]),
            ("s2", vec![0.30]),
        ])),
        students: vec![
            student("s1", Some("Ana"), 0.725, 2, Category::Meets),
            student("s2", None, 0.30, 1, Category::WellBelow),
        ],
        details: vec![detail],
    };
    ReportData {
        tool_name: "canvas-masteryqc".to_string(),
        tool_version: "0.1.0".to_string(),
        course_id: id("77"),
        course: CourseInfo {
            course_name: "Ethics & Law".to_string(),
            course_code: "ETH".to_string(),
            sis_course_id: "S1".to_string(),
            account_name: "Law School".to_string(),
        },
        grouping: GroupingMode::Groups,
        null_policy: NullScorePolicy::Exclude,
        n_results: 3,
        n_dropped: 0,
        n_null_scores: 0,
        pages_read: 1,
        incomplete: None,
        skipped_groups: vec!["CP empty".to_string()],
        scopes: vec![group],
        include_students: true,
        elapsed_secs: 1.234,
    }
}
