//! Page markup scanning.
//!
//! Reads a rendered HTML page once and extracts everything the behaviors need:
//! gallery entries (in document order), which overlay anchors exist, and the
//! program cards. The result, [`Page`], is the [`Document`] the lightbox
//! controller mounts on.
//!
//! ## What is matched
//!
//! ```text
//! <div class="gallery-item">            ← entry (config: gallery.item_class)
//!   <img src="..." alt="...">           ← first img: source + alt text
//!   <h4>Title</h4>                      ← first title_tag: title
//!   <p>Description</p>                  ← first description_tag: description
//! </div>
//!
//! <div id="lightbox">                   ← Anchor::Overlay (overlay.container_id)
//!   <span class="lightbox-close">       ← Anchor::Close   (overlay.close_class)
//!   <button id="lightboxPrev">          ← Anchor::Prev
//!   <img id="lightboxImg">              ← Anchor::Image
//!   <div id="lightboxCaption">          ← Anchor::Caption
//!   <button id="lightboxNext">          ← Anchor::Next
//! </div>
//! ```
//!
//! ## HTML tolerance
//!
//! The tokenizer is `quick-xml` with end-name checks off and HTML attribute
//! rules on, so unquoted and valueless attributes are accepted. On top of
//! that: void elements never open a scope, `<script>`/`<style>` bodies are
//! dropped before tokenizing, a `<` that cannot start a tag is read as text,
//! and an end tag closes up to the nearest open element of the same name
//! (stray end tags are ignored). Implied end tags are applied for `<p>` and
//! for headings, the way browsers do. Text is entity decoded,
//! whitespace-collapsed and trimmed.

use crate::cards::CardEntry;
use crate::config::LightboxConfig;
use crate::lightbox::{Anchor, Document, GalleryEntry};
use quick_xml::Reader;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("malformed markup at byte {position}: {source}")]
    Malformed {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
}

/// Everything the page offers to the behaviors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub entries: Vec<GalleryEntry>,
    /// Anchors present, in [`Anchor::ALL`] order.
    pub anchors: Vec<Anchor>,
    pub cards: Vec<CardEntry>,
}

impl Document for Page {
    fn gallery_entries(&self) -> Vec<GalleryEntry> {
        self.entries.clone()
    }

    fn has_anchor(&self, anchor: Anchor) -> bool {
        self.anchors.contains(&anchor)
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Start tags that close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "menu",
    "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Longest character reference name looked up, `&` and `;` excluded.
const MAX_REFERENCE_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Plain,
    Entry(usize),
    Capture(usize, Field),
    Card(usize),
    CardButton(usize),
}

#[derive(Debug)]
struct Frame {
    name: String,
    role: Role,
}

struct Scanner<'c> {
    config: &'c LightboxConfig,
    page: Page,
    anchors: [bool; 6],
    stack: Vec<Frame>,
    /// Text collected for the innermost capture frame.
    capture: String,
}

impl<'c> Scanner<'c> {
    fn new(config: &'c LightboxConfig) -> Self {
        Self {
            config,
            page: Page::default(),
            anchors: [false; 6],
            stack: Vec::new(),
            capture: String::new(),
        }
    }

    fn innermost(&self, pred: impl Fn(Role) -> Option<usize>) -> Option<usize> {
        self.stack.iter().rev().find_map(|f| pred(f.role))
    }

    fn capturing(&self) -> bool {
        self.stack
            .iter()
            .any(|f| matches!(f.role, Role::Capture(..)))
    }

    /// Handle a start tag; returns the role a pushed frame should carry.
    fn start(&mut self, name: &str, e: &BytesStart<'_>) -> Role {
        let attrs = attributes(e);
        let id = attr(&attrs, "id");
        let classes: Vec<&str> = attr(&attrs, "class")
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default();
        let has_class = |class: &str| classes.contains(&class);

        let config = self.config;
        let overlay = &config.overlay;
        for (slot, anchor) in Anchor::ALL.iter().enumerate() {
            let hit = match anchor {
                Anchor::Overlay => id == Some(overlay.container_id.as_str()),
                Anchor::Image => id == Some(overlay.image_id.as_str()),
                Anchor::Caption => id == Some(overlay.caption_id.as_str()),
                Anchor::Close => has_class(&overlay.close_class),
                Anchor::Prev => id == Some(overlay.prev_id.as_str()),
                Anchor::Next => id == Some(overlay.next_id.as_str()),
            };
            self.anchors[slot] |= hit;
        }

        let gallery = &config.gallery;
        let cards = &config.cards;

        if has_class(&gallery.item_class) {
            self.page.entries.push(GalleryEntry::default());
            return Role::Entry(self.page.entries.len() - 1);
        }

        if has_class(&cards.card_class) {
            self.page.cards.push(CardEntry {
                expanded: has_class(&cards.expanded_class),
                ..CardEntry::default()
            });
            return Role::Card(self.page.cards.len() - 1);
        }

        if let Some(button) = self.innermost(|r| match r {
            Role::CardButton(i) => Some(i),
            _ => None,
        }) {
            if has_class(&cards.label_class) {
                self.page.cards[button].has_label = true;
            }
        } else if let Some(card) = self.innermost(|r| match r {
            Role::Card(i) => Some(i),
            _ => None,
        }) {
            if has_class(&cards.button_class) {
                self.page.cards[card].has_button = true;
                return Role::CardButton(card);
            }
        }

        let Some(entry_index) = self.innermost(|r| match r {
            Role::Entry(i) => Some(i),
            _ => None,
        }) else {
            return Role::Plain;
        };
        let capturing = self.capturing();
        let entry = &mut self.page.entries[entry_index];

        if name == "img" && entry.source.is_none() {
            entry.source = Some(attr(&attrs, "src").unwrap_or_default().to_string());
            entry.alt_text = attr(&attrs, "alt").unwrap_or_default().to_string();
            return Role::Plain;
        }
        if capturing {
            return Role::Plain;
        }
        if name.eq_ignore_ascii_case(&gallery.title_tag) && entry.title.is_none() {
            self.capture.clear();
            return Role::Capture(entry_index, Field::Title);
        }
        if name.eq_ignore_ascii_case(&gallery.description_tag) && entry.description.is_none() {
            self.capture.clear();
            return Role::Capture(entry_index, Field::Description);
        }
        Role::Plain
    }

    /// Close elements whose end tag is implied by the start tag `name`.
    fn close_implied(&mut self, name: &str) {
        if CLOSES_PARAGRAPH.contains(&name) && self.stack.iter().any(|f| f.name == "p") {
            self.end("p");
        }
        let open_heading = self
            .stack
            .last()
            .filter(|f| is_heading(&f.name))
            .map(|f| f.name.clone());
        if let Some(open) = open_heading.filter(|_| is_heading(name)) {
            self.end(&open);
        }
    }

    fn push(&mut self, name: String, role: Role) {
        self.stack.push(Frame { name, role });
    }

    fn end(&mut self, name: &str) {
        if !self.stack.iter().any(|f| f.name == name) {
            return;
        }
        while let Some(frame) = self.stack.pop() {
            self.finish(frame.role);
            if frame.name == name {
                break;
            }
        }
    }

    fn finish(&mut self, role: Role) {
        if let Role::Capture(entry, field) = role {
            let text = collapse_whitespace(&self.capture);
            self.capture.clear();
            let entry = &mut self.page.entries[entry];
            match field {
                Field::Title => entry.title = Some(text),
                Field::Description => entry.description = Some(text),
            }
        }
    }

    fn text(&mut self, raw: &str) {
        if self.capturing() {
            self.capture.push_str(&decode_entities(raw));
        }
    }

    fn into_page(mut self) -> Page {
        while let Some(frame) = self.stack.pop() {
            self.finish(frame.role);
        }
        self.page.anchors = Anchor::ALL
            .iter()
            .zip(self.anchors)
            .filter_map(|(anchor, present)| present.then_some(*anchor))
            .collect();
        self.page
    }
}

/// Scan a rendered page.
pub fn scan_page(html: &str, config: &LightboxConfig) -> Result<Page, MarkupError> {
    let stripped = strip_raw_text(html);
    let prepared = escape_stray_lt(&stripped);
    let mut reader = Reader::from_str(&prepared);
    {
        let cfg = reader.config_mut();
        cfg.check_end_names = false;
        cfg.allow_unmatched_ends = true;
        cfg.check_comments = false;
    }

    let mut scanner = Scanner::new(config);
    loop {
        let event = reader.read_event().map_err(|source| MarkupError::Malformed {
            position: reader.buffer_position() as u64,
            source,
        })?;
        match event {
            Event::Start(ref e) => {
                let name = element_name(e.name());
                scanner.close_implied(&name);
                let role = scanner.start(&name, e);
                if !VOID_ELEMENTS.contains(&name.as_str()) {
                    scanner.push(name, role);
                }
            }
            Event::Empty(ref e) => {
                let name = element_name(e.name());
                scanner.close_implied(&name);
                let role = scanner.start(&name, e);
                // Self-closed capture element contributes an empty caption field.
                scanner.finish(role);
            }
            Event::End(ref e) => scanner.end(&element_name(e.name())),
            Event::Text(ref e) => scanner.text(&String::from_utf8_lossy(e)),
            Event::CData(ref e) => scanner.text(&String::from_utf8_lossy(e)),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(scanner.into_page())
}

fn element_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).to_ascii_lowercase()
}

fn attributes(e: &BytesStart<'_>) -> Vec<(String, String)> {
    e.html_attributes()
        .filter_map(Result::ok)
        .map(|a| {
            let key = String::from_utf8_lossy(a.key.as_ref()).to_ascii_lowercase();
            let value = decode_entities(&String::from_utf8_lossy(&a.value));
            (key, value)
        })
        .collect()
}

fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Resolve character references one at a time. Unknown or malformed
/// references are left as written.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let resolved = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_REFERENCE_LEN)
            .and_then(|end| resolve_reference(&after[..end]).map(|text| (text, end)));
        match resolved {
            Some((text, end)) => {
                out.push_str(&text);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// `name` is the text between `&` and `;`.
fn resolve_reference(name: &str) -> Option<Cow<'static, str>> {
    let Some(number) = name.strip_prefix('#') else {
        return resolve_html5_entity(name).map(Cow::Borrowed);
    };
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) if hex.chars().all(|c| c.is_ascii_hexdigit()) => u32::from_str_radix(hex, 16),
        None if number.chars().all(|c| c.is_ascii_digit()) => number.parse(),
        _ => return None,
    }
    .ok()?;
    char::from_u32(code)
        .filter(|c| *c != '\0')
        .map(|c| Cow::Owned(c.to_string()))
}

/// Escape every `<` that cannot open a tag, so the tokenizer reads it as text.
fn escape_stray_lt(html: &str) -> Cow<'_, str> {
    let opens_tag = |next: Option<char>| {
        next.is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
    };
    let stray: Vec<usize> = html
        .match_indices('<')
        .map(|(at, _)| at)
        .filter(|&at| !opens_tag(html[at + 1..].chars().next()))
        .collect();
    if stray.is_empty() {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len() + stray.len() * 3);
    let mut copied = 0;
    for at in stray {
        out.push_str(&html[copied..at]);
        out.push_str("&lt;");
        copied = at + 1;
    }
    out.push_str(&html[copied..]);
    Cow::Owned(out)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove the bodies of `<script>` and `<style>` elements, keeping the tags.
///
/// Their content is not markup and would trip the tokenizer (`a < b`).
fn strip_raw_text(html: &str) -> Cow<'_, str> {
    let lower = html.to_ascii_lowercase();
    let mut out = String::new();
    let mut copied = 0;
    let mut cursor = 0;

    while let Some((open_at, tag)) = RAW_TEXT_ELEMENTS
        .iter()
        .filter_map(|tag| find_open_tag(&lower, cursor, tag).map(|at| (at, *tag)))
        .min_by_key(|(at, _)| *at)
    {
        let Some(body_start) = lower[open_at..].find('>').map(|i| open_at + i + 1) else {
            break;
        };
        let close = format!("</{tag}");
        let body_end = lower[body_start..]
            .find(&close)
            .map(|i| body_start + i)
            .unwrap_or(html.len());
        out.push_str(&html[copied..body_start]);
        copied = body_end;
        cursor = body_end;
    }

    if copied == 0 {
        return Cow::Borrowed(html);
    }
    out.push_str(&html[copied..]);
    Cow::Owned(out)
}

/// Position of the next `<tag` followed by `>`, `/` or whitespace.
fn find_open_tag(lower: &str, from: usize, tag: &str) -> Option<usize> {
    let needle = format!("<{tag}");
    let mut from = from;
    while let Some(i) = lower[from..].find(&needle) {
        let at = from + i;
        match lower[at + needle.len()..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => return Some(at),
            None => return None,
            _ => from = at + needle.len(),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::site_page;

    fn scan(html: &str) -> Page {
        scan_page(html, &LightboxConfig::default()).unwrap()
    }

    fn titles(page: &Page) -> Vec<Option<&str>> {
        page.entries.iter().map(|e| e.title.as_deref()).collect()
    }

    #[test]
    fn scans_entries_in_document_order() {
        let page = scan(
            r#"
<div class="gallery-grid">
  <div class="gallery-item"><img src="a.jpg" alt="A"><h4>First</h4><p>One</p></div>
  <div class="gallery-item"><img src="b.jpg" alt="B"><h4>Second</h4><p>Two</p></div>
</div>"#,
        );
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].source.as_deref(), Some("a.jpg"));
        assert_eq!(page.entries[1].alt_text, "B");
        assert_eq!(titles(&page), [Some("First"), Some("Second")]);
        assert_eq!(page.entries[1].description.as_deref(), Some("Two"));
    }

    #[test]
    fn missing_caption_elements_stay_none() {
        let page = scan(r#"<div class="gallery-item"><img src="a.jpg"></div>"#);
        assert_eq!(page.entries[0].title, None);
        assert_eq!(page.entries[0].description, None);
        assert_eq!(page.entries[0].alt_text, "");
    }

    #[test]
    fn entry_without_image_has_no_source() {
        let page = scan(r#"<div class="gallery-item"><h4>Text only</h4></div>"#);
        assert_eq!(page.entries[0].source, None);
        assert_eq!(page.entries[0].title.as_deref(), Some("Text only"));
    }

    #[test]
    fn only_first_title_and_description_are_used() {
        let page = scan(
            r#"<div class="gallery-item"><img src="a.jpg"><h4>One</h4><h4>Two</h4><p>x</p><p>y</p></div>"#,
        );
        assert_eq!(page.entries[0].title.as_deref(), Some("One"));
        assert_eq!(page.entries[0].description.as_deref(), Some("x"));
    }

    #[test]
    fn caption_text_is_decoded_and_collapsed() {
        let page = scan(
            "<div class=\"gallery-item\"><img src=\"a.jpg\"><h4>\n  Njangi &amp; <em>Day</em>\n</h4><p>Caf&#233;&nbsp;time</p></div>",
        );
        assert_eq!(page.entries[0].title.as_deref(), Some("Njangi & Day"));
        assert_eq!(page.entries[0].description.as_deref(), Some("Café\u{a0}time"));
    }

    #[test]
    fn known_entities_decode_next_to_unknown_ones() {
        let page = scan(
            "<div class=gallery-item><img src=a.jpg><h4>Tom &amp; Jerry &hearts;</h4><p>&bogus; &amp &lt;3 &#x2764;</p></div>",
        );
        assert_eq!(page.entries[0].title.as_deref(), Some("Tom & Jerry ♥"));
        assert_eq!(
            page.entries[0].description.as_deref(),
            Some("&bogus; &amp <3 \u{2764}")
        );
    }

    #[test]
    fn decode_entities_handles_references_one_at_a_time() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&nope; &copy; 2025"), "&nope; © 2025");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&#65;&#x42;&#0;&#xZZ;"), "AB&#0;&#xZZ;");
    }

    #[test]
    fn attribute_entities_are_decoded() {
        let page = scan(r#"<div class="gallery-item"><img src="a.jpg?w=1&amp;h=2" alt="Fish &amp; chips &zzz;"></div>"#);
        assert_eq!(page.entries[0].source.as_deref(), Some("a.jpg?w=1&h=2"));
        assert_eq!(page.entries[0].alt_text, "Fish & chips &zzz;");
    }

    #[test]
    fn nested_description_inside_overlay_markup_is_not_an_entry() {
        let page = scan(r#"<div id="lightboxCaption"><h4>x</h4><p>y</p></div>"#);
        assert!(page.entries.is_empty());
        assert_eq!(page.anchors, vec![Anchor::Caption]);
    }

    #[test]
    fn item_class_matches_whole_tokens_only() {
        let page = scan(
            r#"<div class="gallery-items"></div><div class="card gallery-item wide"><img src="a.jpg"></div>"#,
        );
        assert_eq!(page.entries.len(), 1);
    }

    #[test]
    fn html_attributes_and_void_elements_are_tolerated() {
        let page = scan(
            r#"<div class=gallery-item><img src=a.jpg alt=Dawn loading=lazy><br><h4>T</h4><input disabled></div><p>outside</p>"#,
        );
        assert_eq!(page.entries[0].source.as_deref(), Some("a.jpg"));
        assert_eq!(page.entries[0].alt_text, "Dawn");
        assert_eq!(page.entries[0].title.as_deref(), Some("T"));
        assert_eq!(page.entries[0].description, None);
    }

    #[test]
    fn unclosed_paragraph_is_closed_by_parent_end() {
        let page = scan(
            r#"<div class="gallery-item"><img src="a.jpg"><p>Open paragraph</div><div class="gallery-item"><img src="b.jpg"></div>"#,
        );
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].description.as_deref(), Some("Open paragraph"));
        assert_eq!(page.entries[1].description, None);
    }

    #[test]
    fn new_paragraph_closes_the_open_one() {
        let page = scan(
            r#"<div class="gallery-item"><img src="a.jpg"><h4>T</h4><p>one<p>two</div>"#,
        );
        assert_eq!(page.entries[0].description.as_deref(), Some("one"));
    }

    #[test]
    fn block_start_closes_open_paragraph_inside_entry() {
        let page = scan(
            r#"<div class="gallery-item"><img src="a.jpg"><p>Caption<div>extra</div></div><div class="gallery-item"><img src="b.jpg"></div>"#,
        );
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].description.as_deref(), Some("Caption"));
    }

    #[test]
    fn heading_start_closes_open_heading() {
        let page = scan(r#"<div class="gallery-item"><img src="a.jpg"><h4>First<h4>Second</div>"#);
        assert_eq!(page.entries[0].title.as_deref(), Some("First"));
    }

    #[test]
    fn bare_less_than_in_text_is_kept() {
        let page = scan(r#"<div class="gallery-item"><img src="a.jpg"><h4>Ages 5 < 10</h4><p>a <= b</p></div>"#);
        assert_eq!(page.entries[0].title.as_deref(), Some("Ages 5 < 10"));
        assert_eq!(page.entries[0].description.as_deref(), Some("a <= b"));
    }

    #[test]
    fn escape_stray_lt_leaves_tags_alone() {
        assert!(matches!(
            escape_stray_lt("<p>x</p><!-- c --><br/>"),
            Cow::Borrowed(_)
        ));
        assert_eq!(escape_stray_lt("<p>1 < 2</p>"), "<p>1 &lt; 2</p>");
        assert_eq!(escape_stray_lt("end <"), "end &lt;");
    }

    #[test]
    fn script_bodies_are_skipped() {
        let page = scan(
            r#"<script>for (let i = 0; i < n; i++) { x = "<div class='gallery-item'>"; }</script>
<div class="gallery-item"><img src="a.jpg"></div>
<STYLE>.a > .b { color: red }</STYLE>"#,
        );
        assert_eq!(page.entries.len(), 1);
    }

    #[test]
    fn finds_overlay_anchors() {
        let page = scan(
            r#"<div id="lightbox" class="lightbox">
  <span class="lightbox-close">&times;</span>
  <button id="lightboxPrev"></button>
  <img id="lightboxImg" src="" alt="">
  <div id="lightboxCaption"></div>
  <button id="lightboxNext"></button>
</div>"#,
        );
        assert_eq!(page.anchors, Anchor::ALL.to_vec());
        assert!(page.missing_anchors().is_empty());
    }

    #[test]
    fn reports_missing_anchors() {
        let page = scan(r#"<div id="lightbox"><img id="lightboxImg"></div>"#);
        assert_eq!(
            page.missing_anchors(),
            vec![Anchor::Caption, Anchor::Close, Anchor::Prev, Anchor::Next]
        );
    }

    #[test]
    fn scans_program_cards() {
        let page = scan(
            r#"
<div class="program-card"><button class="expand-btn" aria-expanded="false"><span class="expand-text">Learn More</span></button></div>
<div class="program-card expanded"><button class="expand-btn"></button></div>
<div class="program-card"></div>"#,
        );
        assert_eq!(
            page.cards,
            vec![
                CardEntry { expanded: false, has_button: true, has_label: true },
                CardEntry { expanded: true, has_button: true, has_label: false },
                CardEntry { expanded: false, has_button: false, has_label: false },
            ]
        );
    }

    #[test]
    fn custom_selectors_come_from_config() {
        let mut config = LightboxConfig::default();
        config.gallery.item_class = "photo".to_string();
        config.gallery.title_tag = "h3".to_string();
        let page = scan_page(
            r#"<figure class="photo"><img src="a.jpg"><h3>Custom</h3></figure>"#,
            &config,
        )
        .unwrap();
        assert_eq!(page.entries[0].title.as_deref(), Some("Custom"));
    }

    #[test]
    fn malformed_markup_is_an_error() {
        let result = scan_page("<div class=\"gallery-item\"><img src=\"a.jpg\"", &LightboxConfig::default());
        assert!(matches!(result, Err(MarkupError::Malformed { .. })));
    }

    #[test]
    fn site_fixture_has_six_entries_and_full_overlay() {
        let page = scan(&site_page());
        assert_eq!(page.entries.len(), 6);
        assert_eq!(
            titles(&page),
            [
                Some("Monthly Assembly"),
                Some("Cultural Celebration"),
                Some("Community Support"),
                Some("Members Together"),
                Some("Njangi Day"),
                Some("Community Service"),
            ]
        );
        assert!(page.missing_anchors().is_empty());
        assert_eq!(page.cards.len(), 3);
    }

    #[test]
    fn strip_raw_text_leaves_plain_markup_borrowed() {
        assert!(matches!(strip_raw_text("<p>hi</p>"), Cow::Borrowed(_)));
        assert!(matches!(
            strip_raw_text("<scripts></scripts>"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn strip_raw_text_handles_unterminated_script() {
        let stripped = strip_raw_text("<p>a</p><script>if (a < b) {");
        assert_eq!(stripped, "<p>a</p><script>");
    }
}
