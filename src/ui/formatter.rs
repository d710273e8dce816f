//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user
//! interaction. Functions here are pure (no I/O side effects beyond
//! printing) and testable.

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display one milestone item line.
///
/// Items not yet closed are flagged with an "[!]" marker in front of the
/// item number.
///
/// # Arguments
/// * `closed` - Whether the item is in closed state
/// * `number` - Item number on the hosting service
/// * `title` - Item title
pub fn display_item_line(closed: bool, number: u64, title: &str) {
    let status = if closed { "" } else { "[!]" };
    println!("\t {}\t#{} {}", status, number, title);
}

/// Display the pending changelog addition framed by rules.
///
/// # Arguments
/// * `entries` - Formatted changelog lines, one per pull request
pub fn display_pending_changelog(entries: &[String]) {
    println!("{}", "*".repeat(20));
    for entry in entries {
        println!("{}", entry);
    }
    println!("{}", "*".repeat(20));
    println!();
}

/// Display instructions for finishing the release by hand after the user
/// declined the commit-and-push step.
pub fn display_manual_instructions() {
    println!("You will need to commit and push yourself, and to create the PRs");
}
