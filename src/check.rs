//! Site-wide wiring check.
//!
//! Walks a built site directory and scans every HTML page, reporting how many
//! gallery entries and program cards each page has and which overlay anchors
//! a gallery page is missing. A gallery page with missing anchors still works,
//! but some of its controls will be dead; this makes that visible before
//! deploy.

use crate::config::LightboxConfig;
use crate::lightbox::{Anchor, Document};
use crate::markup::{self, MarkupError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path}: {source}")]
    Markup {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },
}

/// Scan result for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    /// Path relative to the site root.
    pub path: PathBuf,
    pub entries: usize,
    /// Entries that have no image and will not open the lightbox.
    pub entries_without_image: usize,
    pub cards: usize,
    /// Missing anchors; only reported for pages that have a gallery.
    pub missing_anchors: Vec<Anchor>,
}

impl PageReport {
    pub fn has_gallery(&self) -> bool {
        self.entries > 0
    }

    pub fn is_healthy(&self) -> bool {
        self.missing_anchors.is_empty() && self.entries_without_image == 0
    }
}

/// Check every `*.html` file under `root`, in path order.
pub fn check_site(root: &Path, config: &LightboxConfig) -> Result<Vec<PageReport>, CheckError> {
    let mut reports = Vec::new();
    let walker = WalkDir::new(root).sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_html(path) {
            continue;
        }
        let html = fs::read_to_string(path)?;
        let page = markup::scan_page(&html, config).map_err(|source| CheckError::Markup {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = page.entries.len();
        let missing_anchors = if entries > 0 {
            page.missing_anchors()
        } else {
            Vec::new()
        };
        reports.push(PageReport {
            path: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
            entries,
            entries_without_image: page
                .entries
                .iter()
                .filter(|e| e.to_record().is_none())
                .count(),
            cards: page.cards.len(),
            missing_anchors,
        });
    }
    Ok(reports)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}
