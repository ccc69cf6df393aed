//! Expandable program cards.
//!
//! Each card carries one boolean. Its expand button toggles the card's
//! expanded class, mirrors the new state into `aria-expanded`, and swaps the
//! button label. Enter and Space on the focused button act like a click.
//! Cards are independent of each other and of the lightbox.

use crate::config::CardsConfig;
use crate::types::Key;
use serde::Serialize;
use tracing::debug;

/// A program card as found in the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    /// Card already carries the expanded class.
    pub expanded: bool,
    pub has_button: bool,
    /// Button contains the label span.
    pub has_label: bool,
}

/// Visible state of one card after a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub index: usize,
    pub expanded: bool,
    /// Value written to the button's `aria-expanded` attribute.
    pub aria_expanded: &'static str,
    /// New button label; `None` when the button has no label span.
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CardDeck {
    cards: Vec<CardEntry>,
    expand_label: String,
    collapse_label: String,
}

impl CardDeck {
    pub fn new(cards: Vec<CardEntry>, config: &CardsConfig) -> Self {
        Self {
            cards,
            expand_label: config.expand_label.clone(),
            collapse_label: config.collapse_label.clone(),
        }
    }

    pub fn is_expanded(&self, index: usize) -> Option<bool> {
        self.cards.get(index).map(|c| c.expanded)
    }

    /// Click on card `index`'s expand button.
    ///
    /// `None` if there is no such card or it has no button to click.
    pub fn toggle(&mut self, index: usize) -> Option<CardView> {
        let Some(card) = self.cards.get_mut(index) else {
            debug!(index, "no such program card");
            return None;
        };
        if !card.has_button {
            debug!(index, "program card has no expand button");
            return None;
        }
        card.expanded = !card.expanded;
        let card = *card;
        Some(self.view(index, card))
    }

    /// Key press on card `index`'s expand button. Enter and Space activate it.
    pub fn handle_key(&mut self, index: usize, key: &Key) -> Option<CardView> {
        match key {
            Key::Enter | Key::Space => self.toggle(index),
            _ => None,
        }
    }

    fn view(&self, index: usize, card: CardEntry) -> CardView {
        let label = if card.expanded {
            &self.collapse_label
        } else {
            &self.expand_label
        };
        CardView {
            index,
            expanded: card.expanded,
            aria_expanded: if card.expanded { "true" } else { "false" },
            label: card.has_label.then(|| label.clone()),
        }
    }
}
