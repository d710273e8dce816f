//! Release workflow orchestration
//!
//! Drives the end-to-end release: precondition gates, next-version
//! computation, milestone resolution and completeness check, metadata and
//! changelog rewriting, and finally commit/push plus the two follow-up
//! pull requests. The workflow is generic over [Repository], [HostingApi],
//! and [Prompter] so every gate can be exercised in tests with the in-tree
//! mocks.

use std::path::Path;

use crate::changelog;
use crate::config::Config;
use crate::error::Result;
use crate::git::Repository;
use crate::github::{HostingApi, PullRequest};
use crate::metadata::MetadataFiles;
use crate::ui::{self, Answer, Prompter};
use crate::version::Version;

/// How a release attempt ended.
///
/// Validation failures are not `Err` values: they are reported to the user
/// as they happen and surface here so the caller can pick the process exit
/// code. Only unexpected failures (I/O, git, API transport, metadata
/// disagreement) travel through `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Not on the branch releases are prepared from
    WrongBranch { current: String, required: String },
    /// Tracked changes pending in the working tree
    DirtyWorkTree,
    /// User declined the computed next version
    Declined,
    /// No open milestone titled like the next version
    MilestoneMissing { wanted: String },
    /// The milestone still has open pull requests or issues
    MilestoneIncomplete { version: String },
    /// User declined the changelog addition (files already rewritten)
    ChangelogDeclined,
    /// Release branch prepared; `pushed` tells whether it was also
    /// committed, pushed, and followed up with pull requests
    Completed { version: String, pushed: bool },
}

impl ReleaseOutcome {
    /// Process exit code for this outcome.
    ///
    /// Precondition violations and a declined changelog exit 1; remote
    /// state that is not ready and user declinations end the run normally.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseOutcome::WrongBranch { .. }
            | ReleaseOutcome::DirtyWorkTree
            | ReleaseOutcome::ChangelogDeclined => 1,
            _ => 0,
        }
    }
}

/// Runs the release workflow from precondition checks to pull-request
/// creation.
///
/// Every gate is hard: the first one that fails ends the attempt, and no
/// later step runs. Nothing is written and no branch is created before the
/// milestone completeness gate has passed.
pub fn run_release(
    config: &Config,
    repo: &dyn Repository,
    api: &dyn HostingApi,
    prompter: &mut dyn Prompter,
) -> Result<ReleaseOutcome> {
    // Gate 1: releases are prepared from the work branch only
    let current_branch = repo.current_branch()?;
    if current_branch != config.work_branch {
        ui::display_error(&format!(
            "Move to the '{}' branch to work with this tool. You are in '{}'",
            config.work_branch, current_branch
        ));
        return Ok(ReleaseOutcome::WrongBranch {
            current: current_branch,
            required: config.work_branch.clone(),
        });
    }

    // Gate 2: clean working tree
    if !repo.is_clean()? {
        ui::display_error("Current branch is not clean");
        return Ok(ReleaseOutcome::DirtyWorkTree);
    }

    // Version discovery; fails fatally if the metadata files disagree
    let files = MetadataFiles::new(&config.files.source, &config.files.manifest)?;
    let current_version = files.current_version()?;
    println!("Current version is '{}'", current_version);

    let next_version = Version::parse(&current_version)?.next_minor().to_string();

    // Gate 3: confirm the computed next version
    if !prompter.confirm(
        &format!("Next version will be '{}'", next_version),
        Answer::Yes,
    )? {
        println!("Sorry, I cannot help you then...");
        return Ok(ReleaseOutcome::Declined);
    }

    // Milestone resolution: exact title match against the next version
    let milestones = api.list_open_milestones()?;
    let milestone = match milestones.iter().find(|m| m.title == next_version) {
        Some(milestone) => milestone,
        None => {
            let titles: Vec<&str> = milestones.iter().map(|m| m.title.as_str()).collect();
            ui::display_error(&format!(
                "No milestone matching version '{}'. Open milestones found were '{}'",
                next_version,
                titles.join("', '")
            ));
            return Ok(ReleaseOutcome::MilestoneMissing {
                wanted: next_version,
            });
        }
    };

    // Gather the milestone's pull requests and issues
    let prs: Vec<PullRequest> = api
        .list_pull_requests()?
        .into_iter()
        .filter(|pr| pr.belongs_to(milestone))
        .collect();
    println!("Found {} pull requests for this milestone:", prs.len());
    for pr in &prs {
        ui::display_item_line(pr.is_closed(), pr.number, &pr.title);
    }

    let issues = api.list_issues(milestone)?;
    println!("Found {} issues for this milestone:", issues.len());
    for issue in &issues {
        ui::display_item_line(issue.is_closed(), issue.number, &issue.title);
    }

    // Gate 4: everything in the milestone must be closed
    if prs.iter().any(|pr| !pr.is_closed()) || issues.iter().any(|issue| !issue.is_closed()) {
        ui::display_error(
            "Close all PRs and issues belonging to the milestone before making the release",
        );
        return Ok(ReleaseOutcome::MilestoneIncomplete {
            version: next_version,
        });
    }

    // Create and switch to the release branch
    let release_branch = format!("release/{}", next_version);
    repo.create_branch(&release_branch)?;

    // Rewrite the metadata files and the changelog
    files.set_version(&next_version)?;

    let merged_prs: Vec<PullRequest> = prs.into_iter().filter(|pr| pr.is_merged()).collect();
    if !changelog::write_changelog(
        Path::new(&config.files.changelog),
        &next_version,
        &merged_prs,
        prompter,
    )? {
        println!("Exit!");
        return Ok(ReleaseOutcome::ChangelogDeclined);
    }

    // Gate 5: commit, push, and open the follow-up pull requests
    if prompter.confirm(
        &format!("Commit and push to '{}'", config.remote),
        Answer::Yes,
    )? {
        repo.stage(&[
            Path::new(&config.files.changelog),
            files.source_path(),
            files.manifest_path(),
        ])?;
        repo.commit(&format!("Preparing release {}", next_version))?;
        repo.push(&config.remote, &release_branch)?;

        println!(
            "Now create PR to '{}' and PR back to '{}'",
            config.release_base, config.work_branch
        );
        let release_pr = api.create_pull_request(
            &format!("Release {}", next_version),
            &release_branch,
            &config.release_base,
            &format!(
                "Release {}. Don't forget to create the tag after merging!",
                next_version
            ),
        )?;

        api.create_pull_request(
            &format!("Merge back release branch {}", next_version),
            &release_branch,
            &config.work_branch,
            &format!(
                "Merging back changes from release branch {}. Don't merge before #{}",
                next_version, release_pr.number
            ),
        )?;

        Ok(ReleaseOutcome::Completed {
            version: next_version,
            pushed: true,
        })
    } else {
        ui::display_manual_instructions();
        Ok(ReleaseOutcome::Completed {
            version: next_version,
            pushed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            ReleaseOutcome::WrongBranch {
                current: "main".to_string(),
                required: "dev".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(ReleaseOutcome::DirtyWorkTree.exit_code(), 1);
        assert_eq!(ReleaseOutcome::ChangelogDeclined.exit_code(), 1);
        assert_eq!(ReleaseOutcome::Declined.exit_code(), 0);
        assert_eq!(
            ReleaseOutcome::MilestoneMissing {
                wanted: "1.2.0".to_string()
            }
            .exit_code(),
            0
        );
        assert_eq!(
            ReleaseOutcome::Completed {
                version: "1.2.0".to_string(),
                pushed: true
            }
            .exit_code(),
            0
        );
    }
}
