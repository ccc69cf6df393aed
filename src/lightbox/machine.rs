//! The lightbox input state machine as an explicit transition table.
//!
//! Two states, no terminal state:
//!
//! ```text
//!            click entry i
//!   CLOSED ─────────────────▶ OPEN ──┐ ArrowLeft / prev  → previous()
//!     ▲                        │  ▲  │ ArrowRight / next → next()
//!     │  Escape / backdrop /   │  └──┘ click entry i     → open(i)
//!     └──────── close ─────────┘
//! ```
//!
//! [`transition`] is a pure function so the table can be checked without a
//! document or a surface. Whether the resulting action actually changes
//! anything (empty gallery, unbound control) is the controller's business.

use crate::types::Key;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Closed,
    Open,
}

/// A user input reaching the lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Event {
    /// Click on gallery entry `i` (document order).
    EntryClick(usize),
    /// Click on the overlay root itself, outside the image.
    BackdropClick,
    /// Click on the displayed image; not a backdrop click.
    ImageClick,
    CloseClick,
    PrevClick,
    NextClick,
    Key(Key),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::EntryClick(i) => write!(f, "click entry {i}"),
            Event::BackdropClick => f.write_str("click backdrop"),
            Event::ImageClick => f.write_str("click image"),
            Event::CloseClick => f.write_str("click close"),
            Event::PrevClick => f.write_str("click prev"),
            Event::NextClick => f.write_str("click next"),
            Event::Key(key) => write!(f, "key {key}"),
        }
    }
}

/// What the controller should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Open(usize),
    Close,
    Previous,
    Next,
    Ignore,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Open(i) => write!(f, "open({i})"),
            Action::Close => f.write_str("close()"),
            Action::Previous => f.write_str("previous()"),
            Action::Next => f.write_str("next()"),
            Action::Ignore => f.write_str("ignored"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Phase,
    pub action: Action,
}

const fn to(next: Phase, action: Action) -> Transition {
    Transition { next, action }
}

/// Look up the transition for `event` in `phase`.
pub fn transition(phase: Phase, event: &Event) -> Transition {
    use Action as A;
    use Phase::{Closed, Open};

    match (phase, event) {
        (_, Event::EntryClick(i)) => to(Open, A::Open(*i)),

        (Open, Event::BackdropClick | Event::CloseClick) => to(Closed, A::Close),
        (Open, Event::PrevClick) => to(Open, A::Previous),
        (Open, Event::NextClick) => to(Open, A::Next),
        (Open, Event::ImageClick) => to(Open, A::Ignore),

        (Open, Event::Key(Key::Escape)) => to(Closed, A::Close),
        (Open, Event::Key(Key::ArrowLeft)) => to(Open, A::Previous),
        (Open, Event::Key(Key::ArrowRight)) => to(Open, A::Next),
        (Open, Event::Key(_)) => to(Open, A::Ignore),

        (Closed, _) => to(Closed, A::Ignore),
    }
}
