use crate::canvas::FetchError;
use crate::canvas::client::{CanvasClient, PageFailure};
use crate::canvas::transport::Transport;
use crate::model::records::{CourseInfo, Observation};

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub observations: Vec<Observation>,
    pub pages_read: usize,
    pub aborted: Option<PageFailure>,
    /// Only looked up when the course has results.
    pub course: Option<CourseInfo>,
}

pub fn run_stage1<T: Transport>(client: &CanvasClient<T>) -> Result<Stage1Output, FetchError> {
    let fetched = client.fetch_outcome_results();
    crate::info!(
        "fetched {} outcome results from {} pages",
        fetched.observations.len(),
        fetched.pages_read
    );
    let course = if fetched.observations.is_empty() {
        None
    } else {
        Some(client.fetch_course_info()?)
    };
    Ok(Stage1Output {
        observations: fetched.observations,
        pages_read: fetched.pages_read,
        aborted: fetched.aborted,
        course,
    })
}
