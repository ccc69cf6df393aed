//! Scripted page sessions.
//!
//! A session mounts the lightbox controller (over an [`HtmlSurface`]) and the
//! program cards on one scanned page, then feeds it user events one at a time.
//! Scripts are plain text, one event per line:
//!
//! ```text
//! # open the third photo, page through, dismiss
//! click 2
//! key ArrowRight
//! next
//! image            # click on the photo itself, keeps the overlay open
//! key Escape
//! expand 0         # click the first program card's button
//! card-key 0 Enter
//! ```
//!
//! | Command | Event |
//! |---------|-------|
//! | `click N` | click gallery entry `N` (document order, 0-based) |
//! | `backdrop` | click the overlay outside the image |
//! | `image` | click the displayed image |
//! | `close` / `prev` / `next` | click the overlay control |
//! | `key NAME` | key press (`Escape`, `ArrowLeft`, `ArrowRight`, ...) |
//! | `expand N` | click card `N`'s expand button |
//! | `card-key N NAME` | key press on card `N`'s expand button |

use crate::cards::{CardDeck, CardView};
use crate::config::LightboxConfig;
use crate::lightbox::{Action, Controller, Event};
use crate::markup::{self, MarkupError, Page};
use crate::surface::HtmlSurface;
use crate::types::Key;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
    #[error("script line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// One scripted user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Step {
    Lightbox(Event),
    Expand(usize),
    CardKey(usize, Key),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Lightbox(Event::EntryClick(i)) => write!(f, "click {i}"),
            Step::Lightbox(Event::BackdropClick) => f.write_str("backdrop"),
            Step::Lightbox(Event::ImageClick) => f.write_str("image"),
            Step::Lightbox(Event::CloseClick) => f.write_str("close"),
            Step::Lightbox(Event::PrevClick) => f.write_str("prev"),
            Step::Lightbox(Event::NextClick) => f.write_str("next"),
            Step::Lightbox(Event::Key(key)) => write!(f, "key {key}"),
            Step::Expand(i) => write!(f, "expand {i}"),
            Step::CardKey(i, key) => write!(f, "card-key {i} {key}"),
        }
    }
}

/// Parse a session script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Step>, SessionError> {
    let mut steps = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        let line = n + 1;
        let content = raw.split('#').next().unwrap_or_default();
        let words: Vec<&str> = content.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            continue;
        };
        let err = |message: String| SessionError::Parse { line, message };
        let index = |arg: Option<&&str>| -> Result<usize, SessionError> {
            let arg = arg.ok_or_else(|| err(format!("'{command}' needs an index")))?;
            arg.parse()
                .map_err(|_| err(format!("'{arg}' is not a valid index")))
        };
        let key = |arg: Option<&&str>| -> Result<Key, SessionError> {
            let arg = arg.ok_or_else(|| err(format!("'{command}' needs a key name")))?;
            Ok(arg.parse::<Key>().unwrap_or_else(|never| match never {}))
        };

        let (step, arity) = match *command {
            "click" => (Step::Lightbox(Event::EntryClick(index(args.first())?)), 1),
            "backdrop" => (Step::Lightbox(Event::BackdropClick), 0),
            "image" => (Step::Lightbox(Event::ImageClick), 0),
            "close" => (Step::Lightbox(Event::CloseClick), 0),
            "prev" => (Step::Lightbox(Event::PrevClick), 0),
            "next" => (Step::Lightbox(Event::NextClick), 0),
            "key" => (Step::Lightbox(Event::Key(key(args.first())?)), 1),
            "expand" => (Step::Expand(index(args.first())?), 1),
            "card-key" => (Step::CardKey(index(args.first())?, key(args.get(1))?), 2),
            other => return Err(err(format!("unknown command '{other}'"))),
        };
        if args.len() > arity {
            return Err(err(format!(
                "'{command}' takes {arity} argument(s), got {}",
                args.len()
            )));
        }
        steps.push(step);
    }
    Ok(steps)
}

/// Observable state after one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: Step,
    /// Lightbox action actually applied (lightbox steps only).
    pub action: Option<Action>,
    /// Card state after the step (card steps that changed something only).
    pub card: Option<CardView>,
    pub open: bool,
    pub index: Option<usize>,
    /// Title of the record on display.
    pub title: Option<String>,
}

/// A page with its behaviors mounted.
#[derive(Debug)]
pub struct Session {
    controller: Controller<HtmlSurface>,
    cards: CardDeck,
}

impl Session {
    pub fn mount(page: &Page, config: &LightboxConfig) -> Self {
        let surface = HtmlSurface::with_anchors(&config.overlay, &page.anchors);
        Self {
            controller: Controller::mount(page, surface),
            cards: CardDeck::new(page.cards.clone(), &config.cards),
        }
    }

    pub fn controller(&self) -> &Controller<HtmlSurface> {
        &self.controller
    }

    pub fn cards(&self) -> &CardDeck {
        &self.cards
    }

    pub fn apply(&mut self, step: &Step) -> StepReport {
        let (action, card) = match step {
            Step::Lightbox(event) => (Some(self.controller.handle(event)), None),
            Step::Expand(i) => (None, self.cards.toggle(*i)),
            Step::CardKey(i, key) => (None, self.cards.handle_key(*i, key)),
        };
        debug!(%step, "session step");
        let state = self.controller.state();
        StepReport {
            step: step.clone(),
            action,
            card,
            open: state.is_open(),
            index: state.current_index(),
            title: state.current_record().map(|r| r.title.clone()),
        }
    }

    pub fn run(&mut self, steps: &[Step]) -> Vec<StepReport> {
        steps.iter().map(|step| self.apply(step)).collect()
    }
}

/// Scan `page_path`, parse `script_path`, and replay the script on the page.
pub fn replay_files(
    page_path: &Path,
    script_path: &Path,
    config: &LightboxConfig,
) -> Result<(Session, Vec<StepReport>), SessionError> {
    let html = fs::read_to_string(page_path)?;
    let page = markup::scan_page(&html, config)?;
    let steps = parse_script(&fs::read_to_string(script_path)?)?;
    let mut session = Session::mount(&page, config);
    let reports = session.run(&steps);
    Ok((session, reports))
}
