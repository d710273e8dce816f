use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CreatedPullRequest, HostingApi, Issue, Milestone, PullRequest};
use crate::error::{ReleaseError, Result};

const API_ROOT: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

/// GitHub REST client for the milestone and pull-request operations the
/// release workflow consumes.
///
/// All requests are blocking; the workflow is strictly sequential and every
/// call runs to completion before the next step.
pub struct GithubClient {
    repository: String,
    token: Option<String>,
    http: Client,
}

impl GithubClient {
    /// Create a client for a repository slug ("owner/name").
    ///
    /// # Arguments
    /// * `repository` - Repository slug on the hosting service
    /// * `token` - API token; requests run unauthenticated without one
    pub fn new(repository: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("release-prep/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubClient {
            repository: repository.into(),
            token,
            http,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(ReleaseError::api(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        Ok(response.json()?)
    }

    /// Fetch every page of a list endpoint.
    fn get_paged<T: DeserializeOwned>(&self, path: &str, query: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}/repos/{}/{}?{}&per_page={}&page={}",
                API_ROOT, self.repository, path, query, PAGE_SIZE, page
            );

            let batch: Vec<T> = self.get_json(&url)?;
            let batch_len = batch.len();
            items.extend(batch);

            if batch_len < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[derive(Serialize)]
struct NewPullRequest<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
}

impl HostingApi for GithubClient {
    fn list_open_milestones(&self) -> Result<Vec<Milestone>> {
        self.get_paged("milestones", "state=open")
    }

    fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        self.get_paged("pulls", "state=all")
    }

    fn list_issues(&self, milestone: &Milestone) -> Result<Vec<Issue>> {
        let issues: Vec<Issue> =
            self.get_paged("issues", &format!("milestone={}&state=all", milestone.number))?;

        // The issues endpoint also returns pull requests; keep real issues only
        Ok(issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .collect())
    }

    fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<CreatedPullRequest> {
        let url = format!("{}/repos/{}/pulls", API_ROOT, self.repository);

        let mut request = self
            .http
            .post(&url)
            .header("Accept", "application/vnd.github+json")
            .json(&NewPullRequest {
                title,
                head,
                base,
                body,
            });

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(ReleaseError::api(format!(
                "POST {} returned {}",
                url,
                response.status()
            )));
        }

        Ok(response.json()?)
    }
}
