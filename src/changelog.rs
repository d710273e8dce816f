//! Changelog writer.
//!
//! Inserts a new dated release section into the changelog document,
//! listing the merged pull requests of the release. Sections are kept
//! newest-first: the new section lands immediately before the first
//! existing version section that follows the `# Changelog` header.

use std::fs;
use std::path::Path;

use chrono::Local;
use regex::Regex;

use crate::error::{ReleaseError, Result};
use crate::github::PullRequest;
use crate::ui::{self, Answer, Prompter};

/// The literal top-level header the document must carry.
const HEADER: &str = "# Changelog";

/// Pattern matching an existing version section header, e.g. `## 1.1.0`.
const SECTION_PATTERN: &str = r"^## [\d.]+";

/// Formats one changelog bullet per pull request.
pub fn format_entries(prs: &[PullRequest]) -> Vec<String> {
    prs.iter()
        .map(|pr| format!("- {} ([#{}]({}))", pr.title, pr.number, pr.html_url))
        .collect()
}

/// Adds a release section to the changelog, after interactive confirmation.
///
/// Displays the pending entries and asks the user to confirm before
/// touching the file. Returns `Ok(false)` without writing anything if the
/// user declines.
///
/// # Arguments
/// * `path` - Changelog file path
/// * `version` - Version the new section is for
/// * `prs` - Merged pull requests to list
/// * `prompter` - Confirmation source
pub fn write_changelog(
    path: &Path,
    version: &str,
    prs: &[PullRequest],
    prompter: &mut dyn Prompter,
) -> Result<bool> {
    let entries = format_entries(prs);

    ui::display_pending_changelog(&entries);
    if !prompter.confirm(
        "This is the list of items that will be added to the CHANGELOG",
        Answer::Yes,
    )? {
        return Ok(false);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ReleaseError::changelog(format!("cannot read '{}': {}", path.display(), e))
    })?;

    let today = Local::now().format("%Y-%m-%d").to_string();
    let updated = insert_section(&content, version, &entries, &today)?;

    fs::write(path, updated).map_err(|e| {
        ReleaseError::changelog(format!("cannot write '{}': {}", path.display(), e))
    })?;

    Ok(true)
}

/// Inserts a release section into the document, returning the new content.
///
/// The section goes immediately before the first existing version section
/// header found after the `# Changelog` line, keeping sections newest
/// first. A document whose header is not followed by any version section
/// (freshly initialized changelog) gets the section appended at the end
/// instead. A document without the header at all is an error.
pub fn insert_section(
    document: &str,
    version: &str,
    entries: &[String],
    date: &str,
) -> Result<String> {
    let section_header = Regex::new(SECTION_PATTERN)
        .map_err(|e| ReleaseError::changelog(format!("invalid section pattern: {}", e)))?;

    let mut lines: Vec<String> = Vec::new();
    let mut header_seen = false;
    let mut inserted = false;

    for line in document.lines() {
        if !header_seen {
            header_seen = line.trim() == HEADER;
        } else if !inserted && section_header.is_match(line) {
            push_section(&mut lines, version, entries, date);
            inserted = true;
        }
        lines.push(line.to_string());
    }

    if !header_seen {
        return Err(ReleaseError::changelog(format!(
            "document has no '{}' header",
            HEADER
        )));
    }

    if !inserted {
        // First release section of this changelog
        if lines.last().map(|line| !line.is_empty()).unwrap_or(false) {
            lines.push(String::new());
        }
        push_section(&mut lines, version, entries, date);
    }

    let mut updated = lines.join("\n");
    if document.ends_with('\n') {
        updated.push('\n');
    }
    Ok(updated)
}

fn push_section(lines: &mut Vec<String>, version: &str, entries: &[String], date: &str) {
    lines.push(format!("## {}", version));
    lines.push(String::new());
    lines.push(format!("**{}**", date));
    lines.push(String::new());
    for entry in entries {
        lines.push(entry.clone());
    }
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_first_existing_section() {
        let document = "# Changelog\n\n## 1.1.0\n\n- old entry\n";
        let entries = vec!["- new entry ([#5](url))".to_string()];

        let updated = insert_section(document, "1.2.0", &entries, "2026-08-06").unwrap();

        let new_pos = updated.find("## 1.2.0").unwrap();
        let old_pos = updated.find("## 1.1.0").unwrap();
        assert!(new_pos < old_pos);
        assert!(updated.contains("**2026-08-06**"));
        assert!(updated.contains("- old entry"));
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let document = "## 1.1.0\n\n- old entry\n";
        let result = insert_section(document, "1.2.0", &[], "2026-08-06");
        assert!(result.is_err());
    }

    #[test]
    fn test_fresh_changelog_gets_section_appended() {
        let document = "# Changelog\n";
        let entries = vec!["- first entry ([#1](url))".to_string()];

        let updated = insert_section(document, "1.0.0", &entries, "2026-08-06").unwrap();

        assert!(updated.contains("## 1.0.0"));
        assert!(updated.contains("- first entry ([#1](url))"));
    }

    #[test]
    fn test_format_entries() {
        use crate::github::{ItemState, PullRequest};

        let prs = vec![PullRequest {
            number: 7,
            title: "Add feature".to_string(),
            html_url: "https://example.test/pull/7".to_string(),
            state: ItemState::Closed,
            merged_at: Some("2026-01-01T00:00:00Z".to_string()),
            milestone: None,
        }];

        assert_eq!(
            format_entries(&prs),
            vec!["- Add feature ([#7](https://example.test/pull/7))".to_string()]
        );
    }
}
