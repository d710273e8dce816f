//! Version locator/editor for the two project metadata files.
//!
//! Each file carries the version on exactly one line, embedded in that
//! file's own surrounding syntax, so each gets its own anchored pattern
//! with the version in a named capture group. Replacement touches only the
//! captured substring and leaves every other byte in place.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{ReleaseError, Result};

/// Pattern for the source constant file, e.g.
/// `public const string Version = "1.1.0";`
const SOURCE_PATTERN: &str = r#"^\s*public const string Version = "(?P<v>[\d.]+)";"#;

/// Pattern for the manifest file, e.g.
/// `<Identity Id="..." Version="1.1.0" Language="en-US" />`
const MANIFEST_PATTERN: &str = r#"^\s+<Identity .*Version="(?P<v>[\d.]+)".*"#;

/// Locates and rewrites the version string carried by the two metadata files.
pub struct MetadataFiles {
    source_path: PathBuf,
    manifest_path: PathBuf,
    source_pattern: Regex,
    manifest_pattern: Regex,
}

impl MetadataFiles {
    /// Creates an editor over the source constant file and the manifest file.
    pub fn new(source: impl Into<PathBuf>, manifest: impl Into<PathBuf>) -> Result<Self> {
        Ok(MetadataFiles {
            source_path: source.into(),
            manifest_path: manifest.into(),
            source_pattern: compile(SOURCE_PATTERN)?,
            manifest_pattern: compile(MANIFEST_PATTERN)?,
        })
    }

    /// Path of the source constant file, for staging.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Path of the manifest file, for staging.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Reads the version from both metadata files.
    ///
    /// The two files must agree; a missing version line in either file or a
    /// disagreement between them is a fatal error naming both files and
    /// both discovered values.
    pub fn current_version(&self) -> Result<String> {
        let source_version = find_version(&self.source_path, &self.source_pattern)?;
        let manifest_version = find_version(&self.manifest_path, &self.manifest_pattern)?;

        match (&source_version, &manifest_version) {
            (Some(source), Some(manifest)) if source == manifest => Ok(source.clone()),
            _ => Err(ReleaseError::metadata(format!(
                "Versions in '{}' and '{}' are different: {:?} != {:?}",
                self.source_path.display(),
                self.manifest_path.display(),
                source_version,
                manifest_version
            ))),
        }
    }

    /// Rewrites the version in both metadata files.
    ///
    /// On each line matching the file's pattern, only the captured version
    /// substring is replaced; all other lines and all surrounding text on
    /// the matched line pass through unchanged.
    pub fn set_version(&self, version: &str) -> Result<()> {
        rewrite_file(&self.source_path, &self.source_pattern, version)?;
        rewrite_file(&self.manifest_path, &self.manifest_pattern, version)?;
        Ok(())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ReleaseError::metadata(format!("invalid version pattern: {}", e)))
}

/// Scans a file line by line for the pattern's `v` capture.
fn find_version(path: &Path, pattern: &Regex) -> Result<Option<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        ReleaseError::metadata(format!("cannot read '{}': {}", path.display(), e))
    })?;

    let mut version = None;
    for line in content.lines() {
        if let Some(captures) = pattern.captures(line) {
            if let Some(m) = captures.name("v") {
                version = Some(m.as_str().to_string());
            }
        }
    }

    Ok(version)
}

/// Replaces the captured version substring on matching lines, preserving
/// everything else byte for byte (including line endings).
fn rewrite_file(path: &Path, pattern: &Regex, version: &str) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| {
        ReleaseError::metadata(format!("cannot read '{}': {}", path.display(), e))
    })?;

    let mut updated = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        match pattern.captures(line).and_then(|caps| caps.name("v")) {
            Some(m) => {
                updated.push_str(&line[..m.start()]);
                updated.push_str(version);
                updated.push_str(&line[m.end()..]);
            }
            None => updated.push_str(line),
        }
    }

    fs::write(path, updated).map_err(|e| {
        ReleaseError::metadata(format!("cannot write '{}': {}", path.display(), e))
    })?;

    Ok(())
}
