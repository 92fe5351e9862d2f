//! Metric extraction from a fetched reel document.
//!
//! Each field is resolved independently by the first strategy that finds it:
//!
//! 1. structured metadata (JSON-LD, Open Graph tags, embedded page state,
//!    or the media JSON returned to logged-in sessions),
//! 2. a `<number> likes` / `<number> views` pattern inside the caption,
//! 3. short visible text fragments of the page (HTML only).
//!
//! Nothing here fails: a field that cannot be found stays absent.

use crate::domain::{Document, ExtractedFields};
use crate::services::normalize::normalize_count;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

const MAX_VISIBLE_TEXT_LEN: usize = 40;

static LIKES_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?[km]?)\s+likes\b").unwrap());
static VIEWS_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?[km]?)\s+views\b").unwrap());
static LIKES_VISIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([0-9][0-9,]*(?:\.[0-9]+)?[km]?)\s+likes$").unwrap());
static VIEWS_VISIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([0-9][0-9,]*(?:\.[0-9]+)?[km]?)\s+views$").unwrap());
static EMBEDDED_LIKES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:like_count|edge_media_preview_like"\s*:\s*\{\s*"count)"\s*:\s*([0-9]+)"#)
        .unwrap()
});
static EMBEDDED_VIEWS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:play_count|video_view_count|view_count)"\s*:\s*([0-9]+)"#).unwrap()
});

static JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:description"]"#).unwrap());
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static BODY_ELEMENTS: Lazy<Selector> = Lazy::new(|| Selector::parse("body *").unwrap());

#[derive(Debug, Clone, Copy)]
enum Metric {
    Likes,
    Views,
}

impl Metric {
    fn in_text(self) -> &'static Regex {
        match self {
            Metric::Likes => &*LIKES_IN_TEXT,
            Metric::Views => &*VIEWS_IN_TEXT,
        }
    }

    fn visible(self) -> &'static Regex {
        match self {
            Metric::Likes => &*LIKES_VISIBLE,
            Metric::Views => &*VIEWS_VISIBLE,
        }
    }

    fn embedded(self) -> &'static Regex {
        match self {
            Metric::Likes => &*EMBEDDED_LIKES,
            Metric::Views => &*EMBEDDED_VIEWS,
        }
    }
}

/// Raw field values collected so far; earlier values always win.
#[derive(Debug, Default)]
struct Partial {
    likes: Option<String>,
    views: Option<String>,
    caption: Option<String>,
    thumbnail: Option<String>,
}

impl Partial {
    fn fill(&mut self, other: Partial) {
        self.likes = self.likes.take().or(other.likes);
        self.views = self.views.take().or(other.views);
        self.caption = self.caption.take().or(other.caption);
        self.thumbnail = self.thumbnail.take().or(other.thumbnail);
    }

    fn metric_mut(&mut self, metric: Metric) -> &mut Option<String> {
        match metric {
            Metric::Likes => &mut self.likes,
            Metric::Views => &mut self.views,
        }
    }

    fn into_fields(self) -> ExtractedFields {
        ExtractedFields {
            likes_count: normalize_count(self.likes.as_deref()),
            likes_raw: self.likes,
            views_count: normalize_count(self.views.as_deref()),
            views_raw: self.views,
            caption: self.caption,
            thumbnail_url: self.thumbnail,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, document: &Document) -> ExtractedFields {
        let mut partial = match document {
            Document::Html(raw) => {
                let html = Html::parse_document(raw);
                let mut partial = html_metadata(&html, raw);
                fill_from_caption(&mut partial);
                fill_from_visible_text(&mut partial, &html);
                partial
            }
            Document::Json(value) => {
                let mut partial = json_media(value);
                fill_from_caption(&mut partial);
                partial
            }
        };

        partial.caption = partial.caption.and_then(|c| non_empty(&c));
        partial.into_fields()
    }
}

fn html_metadata(html: &Html, raw: &str) -> Partial {
    let mut partial = Partial::default();

    for script in html.select(&JSON_LD) {
        let text = script.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<Value>(&text) else {
            continue;
        };
        for item in json_ld_candidates(&value) {
            partial.fill(json_ld_item(item));
        }
    }

    partial.fill(Partial {
        thumbnail: meta_content(html, &OG_IMAGE),
        caption: meta_content(html, &OG_DESCRIPTION)
            .or_else(|| meta_content(html, &META_DESCRIPTION)),
        ..Default::default()
    });

    partial.fill(Partial {
        likes: first_capture(Metric::Likes.embedded(), raw),
        views: first_capture(Metric::Views.embedded(), raw),
        ..Default::default()
    });

    partial
}

/// Top-level object, array, or `@graph` container entries.
fn json_ld_candidates(value: &Value) -> Vec<&Value> {
    let mut candidates: Vec<&Value> = match value.as_array() {
        Some(items) => items.iter().collect(),
        None => vec![value],
    };

    let graphs: Vec<&Value> = candidates
        .iter()
        .filter_map(|item| item.get("@graph").and_then(Value::as_array))
        .flatten()
        .collect();
    candidates.extend(graphs);

    candidates
}

fn json_ld_item(item: &Value) -> Partial {
    let thumbnail = first_string(item.get("thumbnailUrl"))
        .or_else(|| first_string(item.get("image")))
        .or_else(|| item.get("image").and_then(|i| first_string(i.get("url"))));

    let caption = ["caption", "description", "articleBody"]
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str).and_then(non_empty));

    let mut partial = Partial {
        thumbnail,
        caption,
        ..Default::default()
    };

    let stats: Vec<&Value> = match item.get("interactionStatistic") {
        Some(Value::Array(stats)) => stats.iter().collect(),
        Some(stat @ Value::Object(_)) => vec![stat],
        _ => Vec::new(),
    };

    for stat in stats {
        let kind = match stat.get("interactionType") {
            Some(Value::String(s)) => s.as_str(),
            Some(obj @ Value::Object(_)) => {
                obj.get("@type").and_then(Value::as_str).unwrap_or("")
            }
            _ => "",
        };
        let metric = if kind.contains("LikeAction") {
            Metric::Likes
        } else if kind.contains("WatchAction") {
            Metric::Views
        } else {
            continue;
        };

        let slot = partial.metric_mut(metric);
        if slot.is_none() {
            *slot = count_value(stat.get("userInteractionCount"));
        }
    }

    partial
}

/// Media JSON as returned to logged-in sessions, in both known shapes.
fn json_media(value: &Value) -> Partial {
    let mut partial = Partial::default();

    if let Some(item) = value.pointer("/items/0") {
        partial.fill(Partial {
            likes: count_value(item.get("like_count")),
            views: count_value(item.get("play_count"))
                .or_else(|| count_value(item.get("view_count")))
                .or_else(|| count_value(item.get("video_view_count"))),
            caption: string_at(item, "/caption/text"),
            thumbnail: string_at(item, "/image_versions2/candidates/0/url"),
        });
    }

    let media = value
        .pointer("/graphql/shortcode_media")
        .or_else(|| value.pointer("/data/xdt_shortcode_media"));
    if let Some(media) = media {
        partial.fill(Partial {
            likes: count_value(media.pointer("/edge_media_preview_like/count"))
                .or_else(|| count_value(media.pointer("/edge_liked_by/count"))),
            views: count_value(media.get("video_view_count"))
                .or_else(|| count_value(media.get("video_play_count"))),
            caption: string_at(media, "/edge_media_to_caption/edges/0/node/text"),
            thumbnail: string_at(media, "/display_url")
                .or_else(|| string_at(media, "/thumbnail_src")),
        });
    }

    partial
}

fn fill_from_caption(partial: &mut Partial) {
    let Some(caption) = partial.caption.clone() else {
        return;
    };

    for metric in [Metric::Likes, Metric::Views] {
        let slot = partial.metric_mut(metric);
        if slot.is_none() {
            *slot = first_capture(metric.in_text(), &caption);
        }
    }
}

fn fill_from_visible_text(partial: &mut Partial, html: &Html) {
    if partial.likes.is_some() && partial.views.is_some() {
        return;
    }

    for element in html.select(&BODY_ELEMENTS) {
        let text = visible_text(element);
        if text.is_empty() || text.len() > MAX_VISIBLE_TEXT_LEN {
            continue;
        }

        for metric in [Metric::Likes, Metric::Views] {
            let slot = partial.metric_mut(metric);
            if slot.is_none() {
                *slot = first_capture(metric.visible(), &text);
            }
        }

        if partial.likes.is_some() && partial.views.is_some() {
            return;
        }
    }
}

/// Whitespace-collapsed text of the element, leaving out text under any
/// hidden element (including the element itself and its ancestors).
fn visible_text(element: ElementRef) -> String {
    let parts: Vec<&str> = element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| is_hidden(&el));
            (!hidden).then_some(&**text)
        })
        .collect();
    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_hidden(element: &ElementRef) -> bool {
    let el = element.value();
    matches!(
        el.name(),
        "script" | "style" | "noscript" | "template" | "head" | "meta"
    ) || el.attr("hidden").is_some()
        || el
            .attr("aria-hidden")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn meta_content(html: &Html, selector: &Selector) -> Option<String> {
    html.select(selector)
        .filter_map(|el| el.value().attr("content"))
        .find_map(non_empty)
}

fn first_capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// A count given either as a JSON number or a displayed string.
fn count_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => n.as_u64().map(|n| n.to_string()),
        Value::String(s) => non_empty(s),
        _ => None,
    }
}

/// A string, or the first string of an array.
fn first_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => non_empty(s),
        Value::Array(items) => items.iter().find_map(|v| v.as_str().and_then(non_empty)),
        _ => None,
    }
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
