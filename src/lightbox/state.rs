//! Gallery contents and the lightbox's navigation state.
//!
//! Pure data: no rendering, no logging. [`super::Controller`] pairs this state
//! with a surface and decides when the surface needs repainting.

use crate::types::ImageRecord;

/// The ordered, immutable list of records shown by the lightbox.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    images: Vec<ImageRecord>,
}

impl Gallery {
    pub fn new(images: Vec<ImageRecord>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.images.get(index)
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Index after `index`, wrapping past the last record. `None` when empty.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let len = self.len();
        (len > 0).then(|| (index % len + 1) % len)
    }

    /// Index before `index`, wrapping before the first record. `None` when empty.
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        let len = self.len();
        (len > 0).then(|| (index % len + len - 1) % len)
    }
}

/// Why an open request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenRefused {
    EmptyGallery,
    OutOfRange { index: usize, len: usize },
}

/// Gallery plus the (open, index) pair.
///
/// `current` is `Some` exactly while the overlay is open, so the pair can
/// never be observed half-updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightboxState {
    gallery: Gallery,
    current: Option<usize>,
}

impl LightboxState {
    pub fn new(gallery: Gallery) -> Self {
        Self {
            gallery,
            current: None,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The record on display, if the overlay is open.
    pub fn current_record(&self) -> Option<&ImageRecord> {
        self.current.and_then(|i| self.gallery.get(i))
    }

    /// Show record `index`. Out-of-range indices are refused, not clamped.
    pub fn open(&mut self, index: usize) -> Result<(), OpenRefused> {
        if self.gallery.is_empty() {
            return Err(OpenRefused::EmptyGallery);
        }
        let len = self.gallery.len();
        if index >= len {
            return Err(OpenRefused::OutOfRange { index, len });
        }
        self.current = Some(index);
        Ok(())
    }

    /// Hide the overlay. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Step forward with wrap-around. Returns the new index, or `None`
    /// (without changing anything) while closed.
    pub fn next(&mut self) -> Option<usize> {
        let index = self.gallery.next_index(self.current?)?;
        self.current = Some(index);
        Some(index)
    }

    /// Step backward with wrap-around. Returns the new index, or `None`
    /// (without changing anything) while closed.
    pub fn previous(&mut self) -> Option<usize> {
        let index = self.gallery.previous_index(self.current?)?;
        self.current = Some(index);
        Some(index)
    }
}
