use std::collections::{BTreeMap, BTreeSet};

use crate::model::ids::EntityId;
use crate::model::records::Observation;
use crate::model::thresholds::NullScorePolicy;

/// Valid scores per student for one scope.
pub type StudentScores = BTreeMap<EntityId, Vec<f64>>;

/// Student scores per outcome.
pub type OutcomeScores = BTreeMap<EntityId, StudentScores>;

#[derive(Debug, Clone, Default)]
pub struct Stage2Output {
    pub by_outcome: OutcomeScores,
    pub n_observations: usize,
    pub n_dropped: usize,
    pub n_null_scores: usize,
}

pub fn run_stage2(observations: &[Observation], policy: NullScorePolicy) -> Stage2Output {
    let mut out = Stage2Output {
        n_observations: observations.len(),
        ..Stage2Output::default()
    };

    for obs in observations {
        let (Some(student), Some(outcome)) = (&obs.student_id, &obs.outcome_id) else {
            out.n_dropped += 1;
            continue;
        };
        let bucket = out
            .by_outcome
            .entry(outcome.clone())
            .or_default()
            .entry(student.clone())
            .or_default();
        match (obs.percent, policy) {
            (Some(v), _) => bucket.push(v),
            (None, NullScorePolicy::CoerceZero) => {
                out.n_null_scores += 1;
                bucket.push(0.0);
            }
            (None, NullScorePolicy::Exclude) => {
                // student stays registered with no score
                out.n_null_scores += 1;
            }
        }
    }

    if out.n_dropped > 0 {
        crate::debug!(
            "dropped {} of {} observations without student or outcome id",
            out.n_dropped,
            out.n_observations
        );
    }

    out
}

/// Pools every raw score a student earned across the given outcomes.
/// Each observation weighs the same; per-outcome means are never averaged.
/// An outcome listed more than once is pooled once.
pub fn pool_scores(by_outcome: &OutcomeScores, outcome_ids: &[EntityId]) -> StudentScores {
    let mut pooled = StudentScores::new();
    let mut seen = BTreeSet::new();
    for outcome in outcome_ids {
        if !seen.insert(outcome) {
            continue;
        }
        let Some(students) = by_outcome.get(outcome) else {
            continue;
        };
        for (student, scores) in students {
            pooled
                .entry(student.clone())
                .or_default()
                .extend_from_slice(scores);
        }
    }
    pooled
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
