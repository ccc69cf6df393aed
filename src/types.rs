//! Shared types used by the scanner, the controller, and the replay driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One gallery entry as displayed in the lightbox.
///
/// Built once from the rendered gallery markup. Title and description default
/// to empty strings when the entry has no heading or paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// URI of the full-resolution image (never empty)
    pub source: String,
    /// Accessibility description from the `alt` attribute
    #[serde(default)]
    pub alt_text: String,
    /// Caption heading
    #[serde(default)]
    pub title: String,
    /// Caption body
    #[serde(default)]
    pub description: String,
}

impl ImageRecord {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt_text: String::new(),
            title: String::new(),
            description: String::new(),
        }
    }
}

/// A keyboard key, named the way browsers report `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Enter" => Key::Enter,
            "Space" | " " | "Spacebar" => Key::Space,
            other => Key::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => f.write_str("Escape"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Enter => f.write_str("Enter"),
            Key::Space => f.write_str("Space"),
            Key::Other(name) => f.write_str(name),
        }
    }
}
