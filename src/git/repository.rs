use crate::error::{ReleaseError, Result};
use git2::{BranchType, Repository as Git2Repo, StatusOptions};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        let name = head.shorthand().ok_or_else(|| {
            ReleaseError::branch("HEAD does not point to a named branch".to_string())
        })?;

        Ok(name.to_string())
    }

    fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        // Untracked files do not make the tree dirty
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses.is_empty())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let head_commit = self.repo.head()?.peel_to_commit()?;

        self.repo
            .branch(name, &head_commit, false)
            .map_err(|e| ReleaseError::branch(format!("Cannot create branch '{}': {}", name, e)))?;

        self.repo.set_head(&format!("refs/heads/{}", name))?;
        self.repo.checkout_head(None)?;

        Ok(())
    }

    fn stage(&self, paths: &[&Path]) -> Result<()> {
        let mut index = self.repo.index()?;

        for path in paths {
            index.add_path(path).map_err(|e| {
                ReleaseError::branch(format!("Cannot stage '{}': {}", path.display(), e))
            })?;
        }

        index.write()?;

        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let signature = self.repo.signature()?;

        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;

        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;

        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| ReleaseError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(credential_callbacks());

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| ReleaseError::remote(format!("Push failed: {}", e)))?;

        // Track the remote branch so later pulls on the release branch work
        let mut local = self.repo.find_branch(branch, BranchType::Local)?;
        local.set_upstream(Some(&format!("{}/{}", remote, branch)))?;

        Ok(())
    }
}

/// Credential callbacks for push authentication.
///
/// Tries SSH keys from `~/.ssh/` in order of preference, then the SSH
/// agent, then falls back to default credentials.
fn credential_callbacks() -> git2::RemoteCallbacks<'static> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());

            for key_name in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let key_path = std::path::PathBuf::from(format!("{}/.ssh/{}", home, key_name));
                if key_path.exists() {
                    if let Ok(cred) = git2::Cred::ssh_key(
                        username_from_url.unwrap_or("git"),
                        None,
                        &key_path,
                        None,
                    ) {
                        return Ok(cred);
                    }
                }
            }

            // Try SSH agent as fallback
            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });

    callbacks
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}
