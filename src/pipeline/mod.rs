pub mod stage1_fetch;
pub mod stage2_aggregate;
pub mod stage3_tree;
pub mod stage4_classify;
pub mod stage5_distribute;
pub mod stage6_report;

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use thiserror::Error;

use crate::canvas::client::CanvasClient;
use crate::canvas::transport::Transport;
use crate::canvas::{ConfigError, FetchError};
use crate::model::ids::EntityId;
use crate::model::records::Outcome;
use crate::model::thresholds::{GroupingMode, NullScorePolicy};
use crate::pipeline::stage1_fetch::run_stage1;
use crate::pipeline::stage2_aggregate::{OutcomeScores, StudentScores, pool_scores, run_stage2};
use crate::pipeline::stage3_tree::{TreeError, run_stage3};
use crate::pipeline::stage4_classify::run_stage4;
use crate::pipeline::stage5_distribute::distribute;
use crate::report::{ReportData, ScopeKind, ScopeReport, StudentRow};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub grouping: GroupingMode,
    pub details: bool,
    pub null_policy: NullScorePolicy,
    pub students: bool,
    pub resolve_names: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            grouping: GroupingMode::Groups,
            details: false,
            null_policy: NullScorePolicy::Exclude,
            students: false,
            resolve_names: false,
        }
    }
}

/// Expected end states of a course with nothing to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoResults,
    NoCompetencyGroups,
    NoGroupOutcomes,
}

impl EmptyReason {
    pub fn message(self) -> &'static str {
        match self {
            EmptyReason::NoResults => "no outcome results found for this course",
            EmptyReason::NoCompetencyGroups => {
                "no competency groups (titles starting with CD, CP or CG) found in this course"
            }
            EmptyReason::NoGroupOutcomes => "competency groups found, but none has outcomes attached",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Empty(EmptyReason),
    Report(Box<ReportData>),
}

pub fn run_course<T: Transport>(
    client: &CanvasClient<T>,
    options: &RunOptions,
) -> Result<RunOutcome, RunError> {
    let started = Instant::now();

    let stage1 = run_stage1(client)?;
    let Some(course) = stage1.course else {
        return Ok(RunOutcome::Empty(EmptyReason::NoResults));
    };

    let stage2 = run_stage2(&stage1.observations, options.null_policy);
    if stage2.by_outcome.is_empty() {
        return Ok(RunOutcome::Empty(EmptyReason::NoResults));
    }

    let mut skipped_groups = Vec::new();
    let mut scopes = match options.grouping {
        GroupingMode::Outcomes => outcome_scopes(client, &stage2.by_outcome, options)?,
        GroupingMode::Groups => {
            let groups = client.fetch_outcome_groups()?;
            let stage3 = run_stage3(client, &groups)?;
            if stage3.is_empty() {
                return Ok(RunOutcome::Empty(EmptyReason::NoCompetencyGroups));
            }
            let mut scopes = Vec::new();
            for entry in &stage3 {
                if entry.outcomes.is_empty() {
                    crate::warn!(
                        "competency group {} has no outcomes; skipped",
                        entry.group.title
                    );
                    skipped_groups.push(entry.group.title.clone());
                    continue;
                }
                let pooled = pool_scores(&stage2.by_outcome, &entry.outcome_ids());
                let details = if options.details {
                    outcome_details(&entry.outcomes, &stage2.by_outcome, options)
                } else {
                    Vec::new()
                };
                scopes.push(build_scope(
                    ScopeKind::Group,
                    entry.group.id.clone(),
                    entry.group.title.clone(),
                    &pooled,
                    options,
                    details,
                ));
            }
            if scopes.is_empty() {
                return Ok(RunOutcome::Empty(EmptyReason::NoGroupOutcomes));
            }
            scopes
        }
    };

    if options.students && options.resolve_names {
        resolve_student_names(client, &mut scopes)?;
    }

    Ok(RunOutcome::Report(Box::new(ReportData {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        course_id: client.course_id().clone(),
        course,
        grouping: options.grouping,
        null_policy: options.null_policy,
        n_results: stage2.n_observations,
        n_dropped: stage2.n_dropped,
        n_null_scores: stage2.n_null_scores,
        pages_read: stage1.pages_read,
        incomplete: stage1
            .aborted
            .map(|f| format!("page {}: {}", f.page, f.error)),
        skipped_groups,
        scopes,
        include_students: options.students,
        elapsed_secs: started.elapsed().as_secs_f64(),
    })))
}

fn outcome_scopes<T: Transport>(
    client: &CanvasClient<T>,
    by_outcome: &OutcomeScores,
    options: &RunOptions,
) -> Result<Vec<ScopeReport>, RunError> {
    let mut scopes = Vec::with_capacity(by_outcome.len());
    for (outcome_id, scores) in by_outcome {
        let title = client.fetch_outcome_title(outcome_id)?;
        scopes.push(build_scope(
            ScopeKind::Outcome,
            outcome_id.clone(),
            title,
            scores,
            options,
            Vec::new(),
        ));
    }
    scopes.sort_by(|a, b| match a.title.cmp(&b.title) {
        std::cmp::Ordering::Equal => a.id.cmp(&b.id),
        other => other,
    });
    Ok(scopes)
}

/// One table per distinct outcome of a group, in tree order.
fn outcome_details(
    outcomes: &[Outcome],
    by_outcome: &OutcomeScores,
    options: &RunOptions,
) -> Vec<ScopeReport> {
    let empty = StudentScores::new();
    let mut seen = BTreeSet::new();
    outcomes
        .iter()
        .filter(|o| seen.insert(&o.id))
        .map(|o| {
            let scores = by_outcome.get(&o.id).unwrap_or(&empty);
            build_scope(
                ScopeKind::Outcome,
                o.id.clone(),
                o.title.clone(),
                scores,
                options,
                Vec::new(),
            )
        })
        .collect()
}

fn build_scope(
    kind: ScopeKind,
    id: EntityId,
    title: String,
    scores: &StudentScores,
    options: &RunOptions,
    details: Vec<ScopeReport>,
) -> ScopeReport {
    let distribution = distribute(scores);
    let students = if options.students {
        run_stage4(scores)
            .into_iter()
            .map(|c| StudentRow {
                student_id: c.student_id,
                name: None,
                mean: c.mean,
                n_scores: c.n_scores,
                category: c.category,
            })
            .collect()
    } else {
        Vec::new()
    };
    ScopeReport {
        kind,
        id,
        title,
        distribution,
        students,
        details,
    }
}

/// One `/users/{id}` lookup per distinct student.
fn resolve_student_names<T: Transport>(
    client: &CanvasClient<T>,
    scopes: &mut [ScopeReport],
) -> Result<(), RunError> {
    let mut names: BTreeMap<EntityId, String> = BTreeMap::new();
    for scope in scopes.iter_mut() {
        for row in scope
            .students
            .iter_mut()
            .chain(scope.details.iter_mut().flat_map(|d| d.students.iter_mut()))
        {
            if !names.contains_key(&row.student_id) {
                let name = client.fetch_user_name(&row.student_id)?;
                names.insert(row.student_id.clone(), name);
            }
            row.name = names.get(&row.student_id).cloned();
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/run.rs"]
mod tests;
