use std::sync::Mutex;

use super::{
    CreatedPullRequest, HostingApi, Issue, ItemState, Milestone, MilestoneRef, PullRequest,
    PullRequestMarker,
};
use crate::error::Result;

/// A pull request recorded by [MockApi::create_pull_request].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

/// Mock hosting API for testing without network access.
///
/// Holds canned milestones, pull requests, and issues, and records every
/// pull request created through it.
pub struct MockApi {
    milestones: Vec<Milestone>,
    pull_requests: Vec<PullRequest>,
    issues: Vec<Issue>,
    created: Mutex<Vec<RecordedPullRequest>>,
}

impl MockApi {
    /// Create an empty mock API.
    pub fn new() -> Self {
        MockApi {
            milestones: Vec::new(),
            pull_requests: Vec::new(),
            issues: Vec::new(),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Add an open milestone.
    pub fn add_milestone(&mut self, number: u64, title: impl Into<String>) {
        self.milestones.push(Milestone {
            number,
            title: title.into(),
        });
    }

    /// Add a pull request, optionally assigned to a milestone.
    pub fn add_pull_request(
        &mut self,
        number: u64,
        title: impl Into<String>,
        state: ItemState,
        merged: bool,
        milestone: Option<u64>,
    ) {
        self.pull_requests.push(PullRequest {
            number,
            title: title.into(),
            html_url: format!("https://example.test/pull/{}", number),
            state,
            merged_at: merged.then(|| "2026-01-01T00:00:00Z".to_string()),
            milestone: milestone.map(|number| MilestoneRef { number }),
        });
    }

    /// Add an issue, optionally assigned to a milestone.
    pub fn add_issue(
        &mut self,
        number: u64,
        title: impl Into<String>,
        state: ItemState,
        milestone: Option<u64>,
    ) {
        self.issues.push(Issue {
            number,
            title: title.into(),
            state,
            milestone: milestone.map(|number| MilestoneRef { number }),
            pull_request: None,
        });
    }

    /// Add a pull-request shadow entry to the issues payload.
    pub fn add_issue_shadowing_pull_request(&mut self, number: u64, milestone: Option<u64>) {
        self.issues.push(Issue {
            number,
            title: format!("pull request {}", number),
            state: ItemState::Closed,
            milestone: milestone.map(|number| MilestoneRef { number }),
            pull_request: Some(PullRequestMarker {}),
        });
    }

    /// Pull requests created through this mock, in creation order.
    pub fn created_pull_requests(&self) -> Vec<RecordedPullRequest> {
        self.created.lock().unwrap().clone()
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl HostingApi for MockApi {
    fn list_open_milestones(&self) -> Result<Vec<Milestone>> {
        Ok(self.milestones.clone())
    }

    fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        Ok(self.pull_requests.clone())
    }

    fn list_issues(&self, milestone: &Milestone) -> Result<Vec<Issue>> {
        // Mirror the server: scope to the milestone, drop pull-request shadows
        Ok(self
            .issues
            .iter()
            .filter(|issue| {
                issue
                    .milestone
                    .as_ref()
                    .map(|m| m.number == milestone.number)
                    .unwrap_or(false)
                    && issue.pull_request.is_none()
            })
            .cloned()
            .collect())
    }

    fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<CreatedPullRequest> {
        let mut created = self.created.lock().unwrap();
        created.push(RecordedPullRequest {
            title: title.to_string(),
            head: head.to_string(),
            base: base.to_string(),
            body: body.to_string(),
        });

        let number = 100 + created.len() as u64 - 1;
        Ok(CreatedPullRequest {
            number,
            html_url: format!("https://example.test/pull/{}", number),
        })
    }
}
