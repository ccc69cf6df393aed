//! # Gallery Lightbox
//!
//! Headless page behaviors for a static community-organization site: the
//! photo gallery lightbox and the expandable program cards.
//!
//! The behavior is an owned state object, an explicit transition table, and
//! two small capability traits over the page and the overlay. Every
//! interaction can be replayed and tested without a browser.
//!
//! # Architecture
//!
//! ```text
//! page.html ──scan──▶ Page ──mount──▶ Controller ──paint──▶ Surface
//!                     (Document)        │                   (HtmlSurface)
//!                                       ▲
//!                     events ───────────┘  click / key
//! ```
//!
//! - [`markup`] reads the rendered page once: gallery entries in document
//!   order, overlay anchors, program cards.
//! - [`lightbox::Controller`] owns the gallery state and routes each event
//!   through the wiring (which handlers exist) and the transition table.
//! - [`surface::HtmlSurface`] is the overlay the controller paints into.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`lightbox`] | Gallery state, transition table, `Document`/`Surface` traits, controller |
//! | [`markup`] | HTML page scanning into gallery entries, anchors and cards |
//! | [`surface`] | Maud-rendered overlay surface with scroll-lock accounting |
//! | [`cards`] | Expandable program card toggles |
//! | [`session`] | Event scripts and replaying them against a mounted page |
//! | [`check`] | Site-wide scan of built pages for broken lightbox wiring |
//! | [`config`] | `lightbox.toml` loading, merging and validation |
//! | [`types`] | `ImageRecord` and `Key`, shared by every module |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Circular navigation, no past-the-end state
//!
//! Next and previous wrap around, so the index is always valid while the
//! overlay is open. On an empty gallery every operation is a no-op: opening
//! does nothing and the overlay stays closed.
//!
//! ## Missing anchors degrade, never fail
//!
//! A page missing its close button or caption still gets a working lightbox;
//! only the handlers that need the missing element are left unregistered.
//! `check` reports those pages so they can be fixed before deploy.
//!
//! ## Escaped captions
//!
//! Captions are rendered with Maud and are auto-escaped. Titles and
//! descriptions are text, never markup.

pub mod cards;
pub mod check;
pub mod config;
pub mod lightbox;
pub mod markup;
pub mod output;
pub mod session;
pub mod surface;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
