// tests/changelog_test.rs
use std::fs;

use tempfile::TempDir;

use release_prep::changelog::{format_entries, insert_section, write_changelog};
use release_prep::github::{HostingApi, ItemState, MockApi};
use release_prep::ui::ScriptedPrompter;

const DOCUMENT: &str = "\
# Changelog

## 1.1.0

**2026-01-01**

- earlier work ([#1](https://example.test/pull/1))

## 1.0.0

**2025-11-20**

- initial release ([#2](https://example.test/pull/2))
";

fn merged_prs() -> Vec<release_prep::github::PullRequest> {
    let mut api = MockApi::new();
    api.add_pull_request(10, "Add exporter", ItemState::Closed, true, None);
    api.add_pull_request(11, "Fix importer", ItemState::Closed, true, None);
    api.list_pull_requests().unwrap()
}

#[test]
fn test_new_section_lands_above_previous_top() {
    let entries = vec!["- new work ([#9](https://example.test/pull/9))".to_string()];

    let updated = insert_section(DOCUMENT, "1.2.0", &entries, "2026-08-06").unwrap();

    let new_pos = updated.find("## 1.2.0").unwrap();
    let mid_pos = updated.find("## 1.1.0").unwrap();
    let old_pos = updated.find("## 1.0.0").unwrap();
    assert!(new_pos < mid_pos);
    assert!(mid_pos < old_pos);
}

#[test]
fn test_earlier_sections_are_untouched() {
    let entries = vec!["- new work ([#9](https://example.test/pull/9))".to_string()];

    let updated = insert_section(DOCUMENT, "1.2.0", &entries, "2026-08-06").unwrap();

    // Everything from the previous top section down is byte-identical
    let tail_before = &DOCUMENT[DOCUMENT.find("## 1.1.0").unwrap()..];
    let tail_after = &updated[updated.find("## 1.1.0").unwrap()..];
    assert_eq!(tail_before, tail_after);
}

#[test]
fn test_repeated_insertion_keeps_newest_first() {
    let entries = vec!["- entry".to_string()];

    let once = insert_section(DOCUMENT, "1.2.0", &entries, "2026-08-06").unwrap();
    let twice = insert_section(&once, "1.3.0", &entries, "2026-09-01").unwrap();

    let newest = twice.find("## 1.3.0").unwrap();
    let newer = twice.find("## 1.2.0").unwrap();
    let older = twice.find("## 1.1.0").unwrap();
    assert!(newest < newer);
    assert!(newer < older);
}

#[test]
fn test_section_format() {
    let entries = vec![
        "- Add exporter ([#10](https://example.test/pull/10))".to_string(),
        "- Fix importer ([#11](https://example.test/pull/11))".to_string(),
    ];

    let updated = insert_section(DOCUMENT, "1.2.0", &entries, "2026-08-06").unwrap();

    assert!(updated.contains(
        "## 1.2.0\n\n**2026-08-06**\n\n- Add exporter ([#10](https://example.test/pull/10))\n- Fix importer ([#11](https://example.test/pull/11))\n\n## 1.1.0"
    ));
}

#[test]
fn test_fresh_changelog_appends_first_section() {
    let entries = vec!["- first ([#1](url))".to_string()];

    let updated = insert_section("# Changelog\n", "1.0.0", &entries, "2026-08-06").unwrap();

    assert!(updated.starts_with("# Changelog"));
    assert!(updated.contains("## 1.0.0"));
    assert!(updated.contains("- first ([#1](url))"));
}

#[test]
fn test_document_without_header_is_rejected() {
    let result = insert_section("just some text\n", "1.0.0", &[], "2026-08-06");
    assert!(result.is_err());
}

#[test]
fn test_format_entries_match_pull_requests() {
    let entries = format_entries(&merged_prs());

    assert_eq!(
        entries,
        vec![
            "- Add exporter ([#10](https://example.test/pull/10))".to_string(),
            "- Fix importer ([#11](https://example.test/pull/11))".to_string(),
        ]
    );
}

#[test]
fn test_write_changelog_declined_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("CHANGELOG.md");
    fs::write(&path, DOCUMENT).unwrap();
    let mut prompter = ScriptedPrompter::new(&[false]);

    let written = write_changelog(&path, "1.2.0", &merged_prs(), &mut prompter).unwrap();

    assert!(!written);
    assert_eq!(fs::read_to_string(&path).unwrap(), DOCUMENT);
}

#[test]
fn test_write_changelog_accepted_updates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("CHANGELOG.md");
    fs::write(&path, DOCUMENT).unwrap();
    let mut prompter = ScriptedPrompter::new(&[true]);

    let written = write_changelog(&path, "1.2.0", &merged_prs(), &mut prompter).unwrap();

    assert!(written);
    let updated = fs::read_to_string(&path).unwrap();
    assert!(updated.contains("## 1.2.0"));
    assert!(updated.contains("- Add exporter ([#10](https://example.test/pull/10))"));
}
