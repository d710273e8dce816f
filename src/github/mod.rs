//! Hosting service abstraction layer
//!
//! Plain data records for the remote entities the release workflow reads
//! (milestones, pull requests, issues) plus the [HostingApi] trait over the
//! four operations it consumes. The concrete implementations include:
//!
//! - [client::GithubClient]: A real client against the GitHub REST API
//! - [mock::MockApi]: A mock implementation for testing
//!
//! Most code should depend on the [HostingApi] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod client;
pub mod mock;

pub use client::GithubClient;
pub use mock::MockApi;

use serde::Deserialize;

use crate::error::Result;

/// Open/closed state of a remote item as reported by the hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
}

/// A milestone grouping the pull requests and issues of one release.
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
}

/// Reference to the milestone an item belongs to (subset of the payload).
#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneRef {
    pub number: u64,
}

/// A pull request with the fields the release workflow needs.
///
/// `merged_at` is the merge timestamp the API reports; a pull request that
/// was closed without merging carries none.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: ItemState,
    pub merged_at: Option<String>,
    pub milestone: Option<MilestoneRef>,
}

impl PullRequest {
    pub fn is_closed(&self) -> bool {
        self.state == ItemState::Closed
    }

    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    /// Whether this pull request is assigned to the given milestone.
    pub fn belongs_to(&self, milestone: &Milestone) -> bool {
        self.milestone
            .as_ref()
            .map(|m| m.number == milestone.number)
            .unwrap_or(false)
    }
}

/// Marker for the `pull_request` key the issues endpoint attaches to
/// entries that are really pull requests.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestMarker {}

/// An issue with the fields the release workflow needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub milestone: Option<MilestoneRef>,
    #[serde(default)]
    pub pull_request: Option<PullRequestMarker>,
}

impl Issue {
    pub fn is_closed(&self) -> bool {
        self.state == ItemState::Closed
    }
}

/// A pull request created through the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Hosting API operations consumed by the release workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]; transport and protocol
/// failures surface as [crate::error::ReleaseError::Api] and abort the run,
/// there are no retries.
pub trait HostingApi: Send + Sync {
    /// List milestones currently open on the repository
    fn list_open_milestones(&self) -> Result<Vec<Milestone>>;

    /// List all pull requests, in any state
    fn list_pull_requests(&self) -> Result<Vec<PullRequest>>;

    /// List the issues of a milestone, in any state
    ///
    /// Pull-request shadow entries returned by the issues endpoint are
    /// filtered out so pull requests are not counted twice.
    fn list_issues(&self, milestone: &Milestone) -> Result<Vec<Issue>>;

    /// Open a pull request
    ///
    /// # Arguments
    /// * `title` - Pull request title
    /// * `head` - Branch holding the changes
    /// * `base` - Branch the pull request targets
    /// * `body` - Pull request description
    fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<CreatedPullRequest>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_merge_state() {
        let merged = PullRequest {
            number: 1,
            title: "one".to_string(),
            html_url: "http://example/1".to_string(),
            state: ItemState::Closed,
            merged_at: Some("2026-08-01T00:00:00Z".to_string()),
            milestone: None,
        };
        assert!(merged.is_merged());
        assert!(merged.is_closed());

        let unmerged = PullRequest {
            merged_at: None,
            ..merged.clone()
        };
        assert!(!unmerged.is_merged());
    }

    #[test]
    fn test_pull_request_milestone_membership() {
        let milestone = Milestone {
            number: 3,
            title: "1.2.0".to_string(),
        };

        let pr = PullRequest {
            number: 1,
            title: "one".to_string(),
            html_url: "http://example/1".to_string(),
            state: ItemState::Closed,
            merged_at: None,
            milestone: Some(MilestoneRef { number: 3 }),
        };
        assert!(pr.belongs_to(&milestone));

        let other = PullRequest {
            milestone: Some(MilestoneRef { number: 4 }),
            ..pr.clone()
        };
        assert!(!other.belongs_to(&milestone));

        let none = PullRequest {
            milestone: None,
            ..pr
        };
        assert!(!none.belongs_to(&milestone));
    }

    #[test]
    fn test_item_state_deserializes_lowercase() {
        let state: ItemState = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(state, ItemState::Open);
        let state: ItemState = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(state, ItemState::Closed);
    }
}
