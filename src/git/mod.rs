//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of git
//! operations the release workflow needs, allowing for multiple
//! implementations including real repositories and mock implementations
//! for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::error::Result;

/// Typed git client for the release workflow
///
/// Replaces ad hoc shell invocations with explicit operations returning
/// success/failure values.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations should map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::ReleaseError] variants.
pub trait Repository: Send + Sync {
    /// Get the name of the currently checked-out branch
    ///
    /// # Returns
    /// * `Ok(String)` - Branch name (e.g., "dev")
    /// * `Err` - If HEAD is detached or there's a git error
    fn current_branch(&self) -> Result<String>;

    /// Check whether the working tree is clean
    ///
    /// Only tracked files count: modified, staged, or deleted entries make
    /// the tree dirty, untracked files are ignored.
    ///
    /// # Returns
    /// * `Ok(true)` - No tracked changes pending
    /// * `Ok(false)` - Tracked changes exist
    /// * `Err` - If there's a git error
    fn is_clean(&self) -> Result<bool>;

    /// Create a branch at the current HEAD and switch to it
    ///
    /// # Arguments
    /// * `name` - Name for the new branch (e.g., "release/1.2.0")
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Stage the given paths
    ///
    /// # Arguments
    /// * `paths` - Paths relative to the repository root
    fn stage(&self, paths: &[&Path]) -> Result<()>;

    /// Commit the staged changes on the current branch
    ///
    /// # Arguments
    /// * `message` - Commit message
    fn commit(&self, message: &str) -> Result<()>;

    /// Push a branch to a remote, setting its upstream
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `branch` - Name of the branch to push
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}
