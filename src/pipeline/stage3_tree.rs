use std::collections::BTreeSet;

use thiserror::Error;

use crate::canvas::FetchError;
use crate::model::ids::EntityId;
use crate::model::records::{CompetencyGroup, Outcome};

/// Read access to a course's outcome-group tree.
pub trait OutcomeTreeSource {
    fn direct_outcomes(&self, group_id: &EntityId) -> Result<Vec<Outcome>, FetchError>;
    fn subgroups(&self, group_id: &EntityId) -> Result<Vec<CompetencyGroup>, FetchError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Malformed competency tree: group {group_id} is its own ancestor")]
    Malformed { group_id: EntityId },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone)]
pub struct GroupOutcomes {
    pub group: CompetencyGroup,
    pub outcomes: Vec<Outcome>,
}

impl GroupOutcomes {
    pub fn outcome_ids(&self) -> Vec<EntityId> {
        self.outcomes.iter().map(|o| o.id.clone()).collect()
    }
}

/// Every outcome reachable from `root`: direct outcomes first, then each
/// subgroup in upstream order. Duplicates are kept.
pub fn collect_outcomes(
    source: &impl OutcomeTreeSource,
    root: &EntityId,
) -> Result<Vec<Outcome>, TreeError> {
    let mut path = BTreeSet::new();
    let mut out = Vec::new();
    collect_into(source, root, &mut path, &mut out)?;
    Ok(out)
}

fn collect_into(
    source: &impl OutcomeTreeSource,
    group_id: &EntityId,
    path: &mut BTreeSet<EntityId>,
    out: &mut Vec<Outcome>,
) -> Result<(), TreeError> {
    if !path.insert(group_id.clone()) {
        return Err(TreeError::Malformed {
            group_id: group_id.clone(),
        });
    }
    out.extend(source.direct_outcomes(group_id)?);
    for sub in source.subgroups(group_id)? {
        collect_into(source, &sub.id, path, out)?;
    }
    path.remove(group_id);
    Ok(())
}

/// Collects outcome trees for the competency roots among `groups`.
pub fn run_stage3(
    source: &impl OutcomeTreeSource,
    groups: &[CompetencyGroup],
) -> Result<Vec<GroupOutcomes>, TreeError> {
    let mut out = Vec::new();
    for group in groups.iter().filter(|g| g.is_root()) {
        let outcomes = collect_outcomes(source, &group.id)?;
        crate::info!(
            "competency group {} ({}): {} outcomes",
            group.title,
            group.id,
            outcomes.len()
        );
        out.push(GroupOutcomes {
            group: group.clone(),
            outcomes,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_tree.rs"]
mod tests;
