use crate::error::Result;
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock repository for testing without a real working tree.
///
/// Starts on a configurable branch with a configurable cleanliness state
/// and records every mutation so tests can assert which operations ran.
pub struct MockRepository {
    branch: Mutex<String>,
    clean: bool,
    created_branches: Mutex<Vec<String>>,
    staged: Mutex<Vec<PathBuf>>,
    commits: Mutex<Vec<String>>,
    pushes: Mutex<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a mock repository on the given branch.
    pub fn new(branch: impl Into<String>, clean: bool) -> Self {
        MockRepository {
            branch: Mutex::new(branch.into()),
            clean,
            created_branches: Mutex::new(Vec::new()),
            staged: Mutex::new(Vec::new()),
            commits: Mutex::new(Vec::new()),
            pushes: Mutex::new(Vec::new()),
        }
    }

    /// Branches created so far.
    pub fn created_branches(&self) -> Vec<String> {
        self.created_branches.lock().unwrap().clone()
    }

    /// Paths staged so far.
    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.lock().unwrap().clone()
    }

    /// Commit messages recorded so far.
    pub fn commits(&self) -> Vec<String> {
        self.commits.lock().unwrap().clone()
    }

    /// (remote, branch) pairs pushed so far.
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.lock().unwrap().clone())
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.created_branches.lock().unwrap().push(name.to_string());
        *self.branch.lock().unwrap() = name.to_string();
        Ok(())
    }

    fn stage(&self, paths: &[&Path]) -> Result<()> {
        let mut staged = self.staged.lock().unwrap();
        for path in paths {
            staged.push(path.to_path_buf());
        }
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.commits.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.pushes
            .lock()
            .unwrap()
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }
}
