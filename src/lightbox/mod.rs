//! Gallery lightbox controller.
//!
//! The controller owns the gallery state for one page session and drives an
//! overlay [`Surface`]. It never touches a document directly: the records and
//! the set of available anchors come from a [`Document`] once, at mount.
//!
//! ## Degrading on missing anchors
//!
//! Each control is wired only if its anchor exists. A page without a close
//! button still opens and navigates; a page without an overlay root has
//! nothing to show, so entry clicks, backdrop clicks and keys are all left
//! unbound. Missing anchors are logged once when the controller mounts.
//!
//! ## Scroll lock
//!
//! Background scrolling is locked on the closed→open edge and released on the
//! open→closed edge, so every lock is paired with exactly one release no
//! matter how many times the user navigates or closes.

mod machine;
mod state;

pub use machine::{Action, Event, Phase, Transition, transition};
pub use state::{Gallery, LightboxState, OpenRefused};

use crate::types::ImageRecord;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// An element the controller needs from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Anchor {
    Overlay,
    Image,
    Caption,
    Close,
    Prev,
    Next,
}

impl Anchor {
    pub const ALL: [Anchor; 6] = [
        Anchor::Overlay,
        Anchor::Image,
        Anchor::Caption,
        Anchor::Close,
        Anchor::Prev,
        Anchor::Next,
    ];
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anchor::Overlay => "overlay",
            Anchor::Image => "overlay image",
            Anchor::Caption => "caption",
            Anchor::Close => "close control",
            Anchor::Prev => "previous control",
            Anchor::Next => "next control",
        };
        f.write_str(name)
    }
}

/// A gallery entry as found in the page, before it becomes an [`ImageRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GalleryEntry {
    /// `src` of the entry's image; `None` when the entry has no image.
    pub source: Option<String>,
    pub alt_text: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl GalleryEntry {
    /// Convert to a record. Entries without a usable image source yield `None`.
    pub fn to_record(&self) -> Option<ImageRecord> {
        let source = self.source.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(ImageRecord {
            source: source.to_string(),
            alt_text: self.alt_text.clone(),
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
        })
    }
}

/// Read-only view of the page the controller is mounted on.
pub trait Document {
    /// Gallery entries in document order.
    fn gallery_entries(&self) -> Vec<GalleryEntry>;

    fn has_anchor(&self, anchor: Anchor) -> bool;

    /// Anchors the page lacks, in [`Anchor::ALL`] order.
    fn missing_anchors(&self) -> Vec<Anchor> {
        Anchor::ALL
            .into_iter()
            .filter(|a| !self.has_anchor(*a))
            .collect()
    }
}

/// The overlay the controller paints into.
pub trait Surface {
    /// Show `record`'s image and caption.
    fn render(&mut self, record: &ImageRecord);

    /// Toggle the overlay's visibility.
    fn set_active(&mut self, active: bool);

    /// Lock or release background page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn render(&mut self, record: &ImageRecord) {
        (**self).render(record)
    }

    fn set_active(&mut self, active: bool) {
        (**self).set_active(active)
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        (**self).set_scroll_locked(locked)
    }
}

/// Which event handlers are registered, decided once from the page's anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wiring {
    pub entries: bool,
    pub backdrop: bool,
    pub image: bool,
    pub close: bool,
    pub prev: bool,
    pub next: bool,
    pub keyboard: bool,
}

impl Wiring {
    /// Every handler bound.
    pub const FULL: Wiring = Wiring {
        entries: true,
        backdrop: true,
        image: true,
        close: true,
        prev: true,
        next: true,
        keyboard: true,
    };

    pub fn from_document<D: Document + ?Sized>(doc: &D) -> Self {
        let overlay = doc.has_anchor(Anchor::Overlay);
        Self {
            entries: overlay,
            backdrop: overlay,
            keyboard: overlay,
            image: overlay && doc.has_anchor(Anchor::Image),
            close: overlay && doc.has_anchor(Anchor::Close),
            prev: overlay && doc.has_anchor(Anchor::Prev),
            next: overlay && doc.has_anchor(Anchor::Next),
        }
    }

    pub fn is_bound(&self, event: &Event) -> bool {
        match event {
            Event::EntryClick(_) => self.entries,
            Event::BackdropClick => self.backdrop,
            Event::ImageClick => self.image,
            Event::CloseClick => self.close,
            Event::PrevClick => self.prev,
            Event::NextClick => self.next,
            Event::Key(_) => self.keyboard,
        }
    }
}

/// Lightbox controller for one page session.
#[derive(Debug)]
pub struct Controller<S> {
    state: LightboxState,
    surface: S,
    wiring: Wiring,
    /// Document entry index → record index. Entries without an image map to `None`.
    entry_map: Vec<Option<usize>>,
}

impl<S: Surface> Controller<S> {
    /// A fully wired controller over `images`, entry `i` showing record `i`.
    pub fn new(images: Vec<ImageRecord>, surface: S) -> Self {
        let entry_map = (0..images.len()).map(Some).collect();
        Self {
            state: LightboxState::new(Gallery::new(images)),
            surface,
            wiring: Wiring::FULL,
            entry_map,
        }
    }

    /// Collect records from `doc` and wire the handlers its anchors allow.
    pub fn mount<D: Document + ?Sized>(doc: &D, surface: S) -> Self {
        let entries = doc.gallery_entries();
        let mut images = Vec::with_capacity(entries.len());
        let mut entry_map = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            match entry.to_record() {
                Some(record) => {
                    entry_map.push(Some(images.len()));
                    images.push(record);
                }
                None => {
                    warn!(entry = i, "gallery entry has no image source, not wired");
                    entry_map.push(None);
                }
            }
        }

        let wiring = Wiring::from_document(doc);
        for anchor in doc.missing_anchors() {
            if entries.is_empty() {
                debug!(%anchor, "lightbox anchor missing");
            } else {
                warn!(%anchor, "lightbox anchor missing, dependent handlers skipped");
            }
        }
        if !entries.is_empty() {
            info!(
                images = images.len(),
                entries = entries.len(),
                "lightbox mounted"
            );
        }

        Self {
            state: LightboxState::new(Gallery::new(images)),
            surface,
            wiring,
            entry_map,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_open() {
            Phase::Open
        } else {
            Phase::Closed
        }
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn wiring(&self) -> &Wiring {
        &self.wiring
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show record `index`. Returns `false` when the request was refused.
    pub fn open(&mut self, index: usize) -> bool {
        let was_open = self.state.is_open();
        if let Err(refused) = self.state.open(index) {
            match refused {
                OpenRefused::EmptyGallery => debug!(index, "open ignored: gallery is empty"),
                OpenRefused::OutOfRange { index, len } => {
                    warn!(index, len, "open ignored: index out of range")
                }
            }
            return false;
        }
        self.repaint();
        if !was_open {
            self.surface.set_active(true);
            self.surface.set_scroll_locked(true);
        }
        true
    }

    /// Hide the overlay. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.state.close() {
            return false;
        }
        self.surface.set_active(false);
        self.surface.set_scroll_locked(false);
        true
    }

    pub fn next(&mut self) -> bool {
        let moved = self.state.next().is_some();
        if moved {
            self.repaint();
        }
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.state.previous().is_some();
        if moved {
            self.repaint();
        }
        moved
    }

    /// Route one input event through the wiring and the transition table.
    ///
    /// Returns the action that was actually applied; [`Action::Ignore`] when
    /// the event is unbound, has no transition, or changed nothing.
    pub fn handle(&mut self, event: &Event) -> Action {
        if !self.wiring.is_bound(event) {
            debug!(%event, "no handler registered");
            return Action::Ignore;
        }
        let phase = self.phase();
        let planned = transition(phase, event);
        let applied = match planned.action {
            Action::Open(entry) => match self.entry_map.get(entry).copied().flatten() {
                Some(index) if self.open(index) => Action::Open(index),
                Some(_) => Action::Ignore,
                None => {
                    debug!(entry, "click on an entry without a record");
                    Action::Ignore
                }
            },
            Action::Close if self.close() => Action::Close,
            Action::Next if self.next() => Action::Next,
            Action::Previous if self.previous() => Action::Previous,
            _ => Action::Ignore,
        };
        if applied != Action::Ignore {
            debug_assert_eq!(self.phase(), planned.next, "{event} from {phase:?}");
        }
        debug!(?phase, %event, %applied, "lightbox event");
        applied
    }

    fn repaint(&mut self) {
        if let Some(record) = self.state.current_record() {
            self.surface.render(record);
        }
    }
}
