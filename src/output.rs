//! CLI output formatting.
//!
//! Every entity is shown as a positional header line (3-digit, 1-based) with
//! indented context lines beneath it, the same shape for scanned records,
//! replayed steps and checked pages.
//!
//! ## Scan
//!
//! ```text
//! Gallery (2 images)
//! 001 Monthly Assembly
//!     Source: images/assembly.jpg
//!     Description: General Assembly Meeting
//! 002 (images/untitled.jpg)
//!
//! Overlay
//!     missing: close control
//!
//! Cards (1)
//! 001 collapsed
//! ```
//!
//! ## Replay
//!
//! ```text
//! 001 click 0 → open record 001
//!     Showing: 001 Monthly Assembly
//! 002 key Escape → close()
//!     Closed
//! ```
//!
//! ## Check
//!
//! ```text
//! index.html: 6 images, 3 cards
//! events/index.html: 2 images
//!     missing: caption, close control
//!     1 entry without an image
//! about.html: no gallery
//! ```
//!
//! Opened records are numbered by position in the gallery, which skips
//! entries without an image, so `click 2` may open record 002.
//!
//! Each section has a `format_*` function returning lines (pure, tested) and
//! a `print_*` wrapper that writes them to stdout.

use crate::check::PageReport;
use crate::lightbox::{Action, Anchor, Document};
use crate::markup::Page;
use crate::session::StepReport;

/// Format a 0-based index as a 3-digit, 1-based position.
fn format_index(index: usize) -> String {
    format!("{:0>3}", index + 1)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Titled records show their title; untitled ones show the source in parens.
fn record_line(index: usize, title: Option<&str>, source: &str) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{} {}", format_index(index), t),
        _ => format!("{} ({})", format_index(index), source),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn anchor_list(anchors: &[Anchor]) -> String {
    anchors
        .iter()
        .map(Anchor::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(page: &Page) -> Vec<String> {
    let mut lines = vec![format!(
        "Gallery ({})",
        plural(page.entries.len(), "image", "images")
    )];
    for (i, entry) in page.entries.iter().enumerate() {
        let Some(record) = entry.to_record() else {
            lines.push(format!("{} (no image)", format_index(i)));
            continue;
        };
        lines.push(record_line(i, Some(record.title.as_str()), &record.source));
        if !record.title.is_empty() {
            lines.push(format!("{}Source: {}", indent(1), record.source));
        }
        if !record.description.is_empty() {
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate_desc(&record.description, 60)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Overlay".to_string());
    let missing = page.missing_anchors();
    if missing.is_empty() {
        lines.push(format!("{}all anchors present", indent(1)));
    } else {
        lines.push(format!("{}missing: {}", indent(1), anchor_list(&missing)));
    }

    if !page.cards.is_empty() {
        lines.push(String::new());
        lines.push(format!("Cards ({})", page.cards.len()));
        for (i, card) in page.cards.iter().enumerate() {
            let state = if card.expanded { "expanded" } else { "collapsed" };
            lines.push(format!("{} {}", format_index(i), state));
            if !card.has_button {
                lines.push(format!("{}no expand button", indent(1)));
            }
        }
    }
    lines
}

pub fn print_scan_output(page: &Page) {
    for line in format_scan_output(page) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

pub fn format_replay_output(reports: &[StepReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        let header = match (&report.action, &report.card) {
            (Some(Action::Open(record)), _) => format!(
                "{} {} → open record {}",
                format_index(i),
                report.step,
                format_index(*record)
            ),
            (Some(action), _) => format!("{} {} → {}", format_index(i), report.step, action),
            (None, Some(_)) => format!("{} {} → toggled", format_index(i), report.step),
            (None, None) => format!("{} {} → ignored", format_index(i), report.step),
        };
        lines.push(header);

        if let Some(card) = &report.card {
            let state = if card.expanded { "expanded" } else { "collapsed" };
            let mut detail = format!(
                "{}Card {}: {state}, aria-expanded={}",
                indent(1),
                format_index(card.index),
                card.aria_expanded
            );
            if let Some(label) = &card.label {
                detail.push_str(&format!(", label \"{label}\""));
            }
            lines.push(detail);
        } else if report.action.is_some() {
            match report.index {
                Some(index) => lines.push(format!(
                    "{}Showing: {}",
                    indent(1),
                    record_line(index, report.title.as_deref(), "untitled")
                )),
                None => lines.push(format!("{}Closed", indent(1))),
            }
        }
    }
    lines
}

pub fn print_replay_output(reports: &[StepReport]) {
    for line in format_replay_output(reports) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(reports: &[PageReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        let mut parts = Vec::new();
        if report.has_gallery() {
            parts.push(plural(report.entries, "image", "images"));
        }
        if report.cards > 0 {
            parts.push(plural(report.cards, "card", "cards"));
        }
        let summary = if parts.is_empty() {
            "no gallery".to_string()
        } else {
            parts.join(", ")
        };
        lines.push(format!("{}: {}", report.path.display(), summary));

        if !report.missing_anchors.is_empty() {
            lines.push(format!(
                "{}missing: {}",
                indent(1),
                anchor_list(&report.missing_anchors)
            ));
        }
        if report.entries_without_image > 0 {
            lines.push(format!(
                "{}{} without an image",
                indent(1),
                plural(report.entries_without_image, "entry", "entries")
            ));
        }
    }

    let broken = reports.iter().filter(|r| !r.is_healthy()).count();
    lines.push(String::new());
    lines.push(format!(
        "Checked {}, {} with problems",
        plural(reports.len(), "page", "pages"),
        broken
    ));
    lines
}

pub fn print_check_output(reports: &[PageReport]) {
    for line in format_check_output(reports) {
        println!("{}", line);
    }
}
