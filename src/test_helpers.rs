//! Shared test utilities.
//!
//! Provides in-memory stand-ins for the two capability traits the controller
//! talks to, plus loaders for the page fixtures under `fixtures/`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let doc = FakeDocument::with_entries(6).without(Anchor::Close);
//! let mut c = Controller::mount(&doc, RecordingSurface::default());
//! c.handle(&Event::EntryClick(2));
//! assert_eq!(c.surface().last_rendered(), Some("img/2.jpg"));
//! ```

use std::collections::HashSet;
use std::path::Path;

use crate::lightbox::{Anchor, Document, GalleryEntry, Surface};
use crate::types::ImageRecord;

// =========================================================================
// Records
// =========================================================================

/// `n` records with sources `img/0.jpg`, `img/1.jpg`, ...
pub fn sample_records(n: usize) -> Vec<ImageRecord> {
    (0..n)
        .map(|i| ImageRecord {
            source: format!("img/{i}.jpg"),
            alt_text: format!("Photo {i}"),
            title: format!("Title {i}"),
            description: format!("Description {i}"),
        })
        .collect()
}

// =========================================================================
// Fake document
// =========================================================================

/// A document with configurable entries and anchors. All anchors present by default.
#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    pub entries: Vec<GalleryEntry>,
    pub missing: HashSet<Anchor>,
}

impl FakeDocument {
    pub fn with_entries(n: usize) -> Self {
        let entries = sample_records(n)
            .into_iter()
            .map(|r| GalleryEntry {
                source: Some(r.source),
                alt_text: r.alt_text,
                title: Some(r.title),
                description: Some(r.description),
            })
            .collect();
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn without(mut self, anchor: Anchor) -> Self {
        self.missing.insert(anchor);
        self
    }
}

impl Document for FakeDocument {
    fn gallery_entries(&self) -> Vec<GalleryEntry> {
        self.entries.clone()
    }

    fn has_anchor(&self, anchor: Anchor) -> bool {
        !self.missing.contains(&anchor)
    }
}

// =========================================================================
// Recording surface
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// Rendered record, identified by source.
    Render(String),
    Active(bool),
    ScrollLocked(bool),
}

/// Surface that records every call, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn render_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Render(_)))
            .count()
    }

    pub fn lock_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == SurfaceCall::ScrollLocked(true))
            .count()
    }

    pub fn release_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == SurfaceCall::ScrollLocked(false))
            .count()
    }

    pub fn last_rendered(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::Render(source) => Some(source.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn render(&mut self, record: &ImageRecord) {
        self.calls.push(SurfaceCall::Render(record.source.clone()));
    }

    fn set_active(&mut self, active: bool) {
        self.calls.push(SurfaceCall::Active(active));
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.calls.push(SurfaceCall::ScrollLocked(locked));
    }
}

// =========================================================================
// Fixtures
// =========================================================================

/// Contents of `fixtures/<name>`.
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture '{}' unreadable: {e}", path.display()))
}

/// The stock community site page: six gallery entries, full overlay, three cards.
pub fn site_page() -> String {
    fixture("index.html")
}
