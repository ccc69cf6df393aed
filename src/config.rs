//! Lightbox configuration module.
//!
//! Handles loading, validating, and merging `lightbox.toml`. The file names
//! the selectors the scanner looks for and the ids/classes the overlay is
//! rendered with. Stock defaults match the markup of the community site
//! template, so most pages need no config file at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [gallery]
//! item_class = "gallery-item"      # Class of each clickable gallery entry
//! title_tag = "h4"                 # Element holding the caption heading
//! description_tag = "p"            # Element holding the caption body
//!
//! [overlay]
//! container_id = "lightbox"        # Overlay root; clicks on it are backdrop clicks
//! image_id = "lightboxImg"
//! caption_id = "lightboxCaption"
//! close_class = "lightbox-close"
//! prev_id = "lightboxPrev"
//! next_id = "lightboxNext"
//! active_class = "active"          # Class toggled while the overlay is open
//!
//! [cards]
//! card_class = "program-card"
//! button_class = "expand-btn"
//! label_class = "expand-text"
//! expanded_class = "expanded"
//! expand_label = "Learn More"
//! collapse_label = "Show Less"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [gallery]
//! title_tag = "h3"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "lightbox.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Lightbox configuration loaded from `lightbox.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Where gallery entries and their captions live in the page.
    pub gallery: GalleryConfig,
    /// Ids and classes of the overlay surface.
    pub overlay: OverlayConfig,
    /// Expandable program cards.
    pub cards: CardsConfig,
}

impl LightboxConfig {
    /// Validate that every selector is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("gallery.item_class", &self.gallery.item_class),
            ("overlay.container_id", &self.overlay.container_id),
            ("overlay.image_id", &self.overlay.image_id),
            ("overlay.caption_id", &self.overlay.caption_id),
            ("overlay.close_class", &self.overlay.close_class),
            ("overlay.prev_id", &self.overlay.prev_id),
            ("overlay.next_id", &self.overlay.next_id),
            ("overlay.active_class", &self.overlay.active_class),
            ("cards.card_class", &self.cards.card_class),
            ("cards.button_class", &self.cards.button_class),
            ("cards.label_class", &self.cards.label_class),
            ("cards.expanded_class", &self.cards.expanded_class),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single name without whitespace, got {value:?}"
                )));
            }
        }
        for (key, tag) in [
            ("gallery.title_tag", &self.gallery.title_tag),
            ("gallery.description_tag", &self.gallery.description_tag),
        ] {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an element name like \"h4\", got {tag:?}"
                )));
            }
        }
        if self.gallery.title_tag.eq_ignore_ascii_case(&self.gallery.description_tag) {
            return Err(ConfigError::Validation(
                "gallery.title_tag and gallery.description_tag must differ".into(),
            ));
        }
        if self.cards.expand_label == self.cards.collapse_label {
            return Err(ConfigError::Validation(
                "cards.expand_label and cards.collapse_label must differ".into(),
            ));
        }
        Ok(())
    }
}

/// Gallery entry selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Class token carried by each gallery entry element.
    pub item_class: String,
    /// Element name whose text becomes the record title.
    pub title_tag: String,
    /// Element name whose text becomes the record description.
    pub description_tag: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            item_class: "gallery-item".to_string(),
            title_tag: "h4".to_string(),
            description_tag: "p".to_string(),
        }
    }
}

/// Overlay anchors and state classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub container_id: String,
    pub image_id: String,
    pub caption_id: String,
    /// The close control is located by class, the others by id.
    pub close_class: String,
    pub prev_id: String,
    pub next_id: String,
    /// Class present on the container while the overlay is visible.
    pub active_class: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            container_id: "lightbox".to_string(),
            image_id: "lightboxImg".to_string(),
            caption_id: "lightboxCaption".to_string(),
            close_class: "lightbox-close".to_string(),
            prev_id: "lightboxPrev".to_string(),
            next_id: "lightboxNext".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Expandable program card selectors and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    pub card_class: String,
    pub button_class: String,
    /// Span inside the button whose text is swapped on toggle.
    pub label_class: String,
    pub expanded_class: String,
    /// Label shown while collapsed.
    pub expand_label: String,
    /// Label shown while expanded.
    pub collapse_label: String,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            card_class: "program-card".to_string(),
            button_class: "expand-btn".to_string(),
            label_class: "expand-text".to_string(),
            expanded_class: "expanded".to_string(),
            expand_label: "Learn More".to_string(),
            collapse_label: "Show Less".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LightboxConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LightboxConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LightboxConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file, merged over the stock defaults.
pub fn load_config_file(path: &Path) -> Result<LightboxConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Load `lightbox.toml` from a directory.
///
/// A missing file yields the validated stock defaults.
pub fn load_config(dir: &Path) -> Result<LightboxConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return resolve_config(stock_defaults_value(), None);
    }
    load_config_file(&path)
}

/// Returns a fully-commented stock `lightbox.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Lightbox Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults and match the stock site template.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Gallery entries
# ---------------------------------------------------------------------------
[gallery]
# Class carried by every clickable gallery entry. Entries are collected in
# document order; that order is also the lightbox navigation order.
item_class = "gallery-item"

# Element inside an entry whose text becomes the caption heading.
title_tag = "h4"

# Element inside an entry whose text becomes the caption body.
description_tag = "p"

# ---------------------------------------------------------------------------
# Overlay
# ---------------------------------------------------------------------------
[overlay]
# Overlay root. A click on the root itself (not the image) closes it.
container_id = "lightbox"
image_id = "lightboxImg"
caption_id = "lightboxCaption"

# The close control is matched by class; previous/next by id.
close_class = "lightbox-close"
prev_id = "lightboxPrev"
next_id = "lightboxNext"

# Class added to the overlay root while it is visible.
active_class = "active"

# ---------------------------------------------------------------------------
# Expandable program cards
# ---------------------------------------------------------------------------
[cards]
card_class = "program-card"
button_class = "expand-btn"
label_class = "expand-text"
expanded_class = "expanded"
expand_label = "Learn More"
collapse_label = "Show Less"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_site_template() {
        let config = LightboxConfig::default();
        assert_eq!(config.gallery.item_class, "gallery-item");
        assert_eq!(config.gallery.title_tag, "h4");
        assert_eq!(config.overlay.container_id, "lightbox");
        assert_eq!(config.overlay.close_class, "lightbox-close");
        assert_eq!(config.cards.expand_label, "Learn More");
    }

    #[test]
    fn default_config_is_valid() {
        LightboxConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[gallery]
title_tag = "h3"
"#;
        let config: LightboxConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.gallery.title_tag, "h3");
        // Defaults preserved
        assert_eq!(config.gallery.description_tag, "p");
        assert_eq!(config.overlay.image_id, "lightboxImg");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
[overlay]
backdrop_id = "shade"
"#;
        let result: Result<LightboxConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: LightboxConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, LightboxConfig::default());
    }

    #[test]
    fn merge_overrides_nested_keys_only() {
        let overlay: toml::Value = toml::from_str(
            r#"
[cards]
collapse_label = "Hide"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.cards.collapse_label, "Hide");
        assert_eq!(config.cards.expand_label, "Learn More");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn empty_selector_fails_validation() {
        let mut config = LightboxConfig::default();
        config.overlay.image_id = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("overlay.image_id"));
    }

    #[test]
    fn class_with_whitespace_fails_validation() {
        let mut config = LightboxConfig::default();
        config.gallery.item_class = "gallery item".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_alphanumeric_tag_fails_validation() {
        let mut config = LightboxConfig::default();
        config.gallery.title_tag = "h4.title".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn same_title_and_description_tag_fails_validation() {
        let mut config = LightboxConfig::default();
        config.gallery.description_tag = "H4".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn identical_card_labels_fail_validation() {
        let mut config = LightboxConfig::default();
        config.cards.collapse_label = config.cards.expand_label.clone();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, LightboxConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[overlay]
container_id = "viewer"
active_class = "open"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.overlay.container_id, "viewer");
        assert_eq!(config.overlay.active_class, "open");
        assert_eq!(config.overlay.image_id, "lightboxImg");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_file_validates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[gallery]\nitem_class = \"\"\n").unwrap();
        let result = load_config_file(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_file_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config_file(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
