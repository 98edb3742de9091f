use serde_json::Value;

use crate::canvas::FetchError;
use crate::canvas::payload::{
    as_sequence, course_info_from_json, group_from_json, observation_from_json, outcome_from_json,
    title_from_json, user_name_from_json,
};
use crate::canvas::transport::Transport;
use crate::model::ids::EntityId;
use crate::model::records::{
    CompetencyGroup, CourseInfo, Observation, Outcome, fallback_outcome_title, fallback_user_name,
};
use crate::pipeline::stage3_tree::OutcomeTreeSource;

pub const PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePolicy {
    /// A failed page ends the loop and keeps what was already read.
    KeepPartial,
    /// A failed page fails the whole listing.
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct PageCollection {
    pub items: Vec<Value>,
    pub pages_read: usize,
    pub aborted: Option<PageFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageFailure {
    pub page: usize,
    pub error: FetchError,
}

#[derive(Debug, Clone, Default)]
pub struct ResultsFetch {
    pub observations: Vec<Observation>,
    pub pages_read: usize,
    pub aborted: Option<PageFailure>,
}

pub struct CanvasClient<T: Transport> {
    transport: T,
    course_id: EntityId,
}

impl<T: Transport> CanvasClient<T> {
    pub fn new(transport: T, course_id: EntityId) -> Self {
        Self {
            transport,
            course_id,
        }
    }

    pub fn course_id(&self) -> &EntityId {
        &self.course_id
    }

    fn get_entity(&self, path: &str) -> Result<Value, FetchError> {
        let res = self.transport.get_json(path, &[])?;
        if !res.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: res.status,
            });
        }
        Ok(res.body)
    }

    /// Reads `per_page=100&page=N` until an empty page.
    pub fn fetch_all_pages(
        &self,
        path: &str,
        key: &str,
        policy: PagePolicy,
    ) -> Result<PageCollection, FetchError> {
        let mut out = PageCollection::default();
        let mut page = 1usize;
        loop {
            let query = [("per_page", PER_PAGE.to_string()), ("page", page.to_string())];
            let error = match self.transport.get_json(path, &query) {
                Ok(res) if res.is_success() => {
                    let items = as_sequence(&res.body, key);
                    if items.is_empty() {
                        break;
                    }
                    out.items.extend(items);
                    out.pages_read += 1;
                    page += 1;
                    continue;
                }
                Ok(res) => FetchError::Status {
                    path: path.to_string(),
                    status: res.status,
                },
                Err(e) => e,
            };
            match policy {
                PagePolicy::Strict => return Err(error),
                PagePolicy::KeepPartial => {
                    crate::warn!("could not fetch page {page} of {path}: {error}");
                    out.aborted = Some(PageFailure { page, error });
                    break;
                }
            }
        }
        Ok(out)
    }

    pub fn fetch_outcome_results(&self) -> ResultsFetch {
        let path = format!("courses/{}/outcome_results", self.course_id);
        // KeepPartial never returns Err.
        let pages = self
            .fetch_all_pages(&path, "outcome_results", PagePolicy::KeepPartial)
            .unwrap_or_default();
        ResultsFetch {
            observations: pages.items.iter().map(observation_from_json).collect(),
            pages_read: pages.pages_read,
            aborted: pages.aborted,
        }
    }

    pub fn fetch_course_info(&self) -> Result<CourseInfo, FetchError> {
        let course = self.get_entity(&format!("courses/{}", self.course_id))?;
        let account = match course.get("account_id").and_then(EntityId::from_json) {
            Some(account_id) => self.get_entity(&format!("accounts/{account_id}"))?,
            None => Value::Null,
        };
        Ok(course_info_from_json(&course, &account))
    }

    pub fn fetch_outcome_groups(&self) -> Result<Vec<CompetencyGroup>, FetchError> {
        let path = format!("courses/{}/outcome_groups", self.course_id);
        let pages = self.fetch_all_pages(&path, "outcome_groups", PagePolicy::Strict)?;
        Ok(pages.items.iter().filter_map(group_from_json).collect())
    }

    pub fn fetch_outcome_title(&self, outcome_id: &EntityId) -> Result<String, FetchError> {
        let body = self.get_entity(&format!("outcomes/{outcome_id}"))?;
        Ok(title_from_json(&body).unwrap_or_else(|| fallback_outcome_title(outcome_id)))
    }

    pub fn fetch_user_name(&self, user_id: &EntityId) -> Result<String, FetchError> {
        let body = self.get_entity(&format!("users/{user_id}"))?;
        Ok(user_name_from_json(&body).unwrap_or_else(|| fallback_user_name(user_id)))
    }
}

impl<T: Transport> OutcomeTreeSource for CanvasClient<T> {
    fn direct_outcomes(&self, group_id: &EntityId) -> Result<Vec<Outcome>, FetchError> {
        let path = format!(
            "courses/{}/outcome_groups/{group_id}/outcomes",
            self.course_id
        );
        let pages = self.fetch_all_pages(&path, "outcomes", PagePolicy::Strict)?;
        let outcomes = pages
            .items
            .iter()
            .filter_map(outcome_from_json)
            .collect::<Vec<_>>();
        if outcomes.len() < pages.items.len() {
            crate::debug!(
                "group {group_id}: skipped {} outcome links without id",
                pages.items.len() - outcomes.len()
            );
        }
        Ok(outcomes)
    }

    fn subgroups(&self, group_id: &EntityId) -> Result<Vec<CompetencyGroup>, FetchError> {
        let path = format!(
            "courses/{}/outcome_groups/{group_id}/subgroups",
            self.course_id
        );
        let pages = self.fetch_all_pages(&path, "subgroups", PagePolicy::Strict)?;
        Ok(pages.items.iter().filter_map(group_from_json).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/canvas/client.rs"]
mod tests;
