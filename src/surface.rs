//! HTML-backed overlay surface.
//!
//! [`HtmlSurface`] keeps an in-memory model of the overlay elements the page
//! script would write to (image `src`/`alt`, caption markup, the container's
//! active class, the body's scroll lock) and renders it back to HTML with
//! Maud.
//!
//! Captions are built with Maud rather than by string concatenation, so a
//! title like `<b>` is shown as text instead of being injected as markup.
//!
//! Writes to an anchor the page does not have are dropped, mirroring how the
//! controller skips handlers for missing anchors.

use crate::config::OverlayConfig;
use crate::lightbox::{Anchor, Surface};
use crate::types::ImageRecord;
use maud::{Markup, PreEscaped, html};
use serde::Serialize;

/// Current state of the overlay elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlayModel {
    pub image_src: String,
    pub image_alt: String,
    /// Caption inner HTML, already escaped.
    pub caption_html: String,
    pub active: bool,
    /// Body carries `overflow: hidden`.
    pub scroll_locked: bool,
}

#[derive(Debug, Clone)]
pub struct HtmlSurface {
    config: OverlayConfig,
    has_image: bool,
    has_caption: bool,
    model: OverlayModel,
    locks: usize,
    releases: usize,
}

impl HtmlSurface {
    /// A surface with every anchor present.
    pub fn new(config: &OverlayConfig) -> Self {
        Self::with_anchors(config, &[Anchor::Image, Anchor::Caption])
    }

    /// A surface that only writes to the anchors listed in `present`.
    pub fn with_anchors(config: &OverlayConfig, present: &[Anchor]) -> Self {
        Self {
            config: config.clone(),
            has_image: present.contains(&Anchor::Image),
            has_caption: present.contains(&Anchor::Caption),
            model: OverlayModel::default(),
            locks: 0,
            releases: 0,
        }
    }

    pub fn model(&self) -> &OverlayModel {
        &self.model
    }

    /// Number of times background scrolling was locked.
    pub fn scroll_locks(&self) -> usize {
        self.locks
    }

    /// Number of times background scrolling was released.
    pub fn scroll_releases(&self) -> usize {
        self.releases
    }

    /// The overlay fragment as it would appear in the page right now.
    pub fn to_markup(&self) -> Markup {
        let c = &self.config;
        let class = if self.model.active {
            format!("lightbox {}", c.active_class)
        } else {
            "lightbox".to_string()
        };
        html! {
            div id=(c.container_id) class=(class) {
                span class=(c.close_class) { (PreEscaped("&times;")) }
                button id=(c.prev_id) class="lightbox-prev" aria-label="Previous image" { (PreEscaped("&#10094;")) }
                img id=(c.image_id) src=(self.model.image_src) alt=(self.model.image_alt);
                div id=(c.caption_id) class="lightbox-caption" { (PreEscaped(&self.model.caption_html)) }
                button id=(c.next_id) class="lightbox-next" aria-label="Next image" { (PreEscaped("&#10095;")) }
            }
        }
    }

    /// The `style` attribute the body carries in the current state.
    pub fn body_style(&self) -> &'static str {
        if self.model.scroll_locked {
            "overflow: hidden"
        } else {
            ""
        }
    }
}

/// Caption markup: title heading followed by the description paragraph.
pub fn caption_markup(record: &ImageRecord) -> Markup {
    html! {
        h4 { (record.title) }
        p { (record.description) }
    }
}

impl Surface for HtmlSurface {
    fn render(&mut self, record: &ImageRecord) {
        if self.has_image {
            self.model.image_src = record.source.clone();
            self.model.image_alt = record.alt_text.clone();
        }
        if self.has_caption {
            self.model.caption_html = caption_markup(record).into_string();
        }
    }

    fn set_active(&mut self, active: bool) {
        self.model.active = active;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        if locked {
            self.locks += 1;
        } else {
            self.releases += 1;
        }
        self.model.scroll_locked = locked;
    }
}
