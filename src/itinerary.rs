//! Itinerary text parsing
//!
//! Turns the free-text itinerary returned by the model into display-ready
//! day sections. The model's formatting is a convention, not a contract:
//! `Day N:` markers, `**bold**`/`*italic*` spans and time-of-day emoji are
//! all best-effort. Text without any marker falls back to a single section.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DAY_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Day\s+[0-9]+:").unwrap());

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").unwrap());

// Sun only counts after "Morning"; the city and moon emoji stand alone.
static TIME_OF_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("Morning \u{2600}\u{FE0F}?|\u{1F3D9}\u{FE0F}?|\u{1F319}").unwrap());

static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?(?:strong|em)>").unwrap());

/// One day of an itinerary, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySection {
    pub title: String,
    /// HTML-escaped body with `<strong>`, `<em>` and `<br />` markup
    pub body_html: String,
}

/// Part of the day a time-of-day marker announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl ItinerarySection {
    /// Time-of-day markers in order of first appearance
    #[must_use]
    pub fn time_slots(&self) -> Vec<TimeOfDay> {
        let mut slots = Vec::new();
        for m in TIME_OF_DAY.find_iter(&self.body_html) {
            let slot = if m.as_str().starts_with("Morning") {
                TimeOfDay::Morning
            } else if m.as_str().starts_with('\u{1F3D9}') {
                TimeOfDay::Afternoon
            } else {
                TimeOfDay::Evening
            };
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        slots
    }

    /// Body with markup removed, for terminals
    #[must_use]
    pub fn plain_body(&self) -> String {
        let text = self.body_html.replace("<br />", "\n");
        let text = INLINE_TAG.replace_all(&text, "");
        unescape_html(&text).trim().to_string()
    }
}

/// Result of parsing one itinerary text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItinerary {
    /// Formatted text that preceded the first `Day N:` marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    pub sections: Vec<ItinerarySection>,
    structured: bool,
}

impl ParsedItinerary {
    /// Whether any `Day N:` marker was found
    #[must_use]
    pub fn is_structured(&self) -> bool {
        self.structured
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Split itinerary text into day sections
#[must_use]
pub fn parse_itinerary(text: &str) -> ParsedItinerary {
    let starts: Vec<usize> = DAY_MARKER.find_iter(text).map(|m| m.start()).collect();

    if starts.is_empty() {
        let sections = if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![section_from_fragment(text)]
        };
        return ParsedItinerary {
            intro: None,
            sections,
            structured: false,
        };
    }

    let intro = text[..starts[0]].trim();
    let intro = (!intro.is_empty()).then(|| format_body(intro));

    let mut sections = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        let fragment = &text[start..end];
        if fragment.trim().is_empty() {
            continue;
        }
        sections.push(section_from_fragment(fragment));
    }

    ParsedItinerary {
        intro,
        sections,
        structured: true,
    }
}

fn section_from_fragment(fragment: &str) -> ItinerarySection {
    let fragment = fragment.trim();
    let (title, rest) = match fragment.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (fragment, ""),
    };

    let body = rest.lines().collect::<Vec<_>>().join("\n");

    ItinerarySection {
        title: title.trim().to_string(),
        body_html: format_body(body.trim()),
    }
}

/// Escape, then apply emphasis and time-of-day substitutions in order
fn format_body(raw: &str) -> String {
    let escaped = escape_html(raw);
    let bolded = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    let emphasized = ITALIC.replace_all(&bolded, "<em>$1</em>");
    TIME_OF_DAY
        .replace_all(&emphasized, "<br /><strong>${0}</strong>")
        .into_owned()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_html(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
