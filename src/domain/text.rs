use html2text::from_read_with_decorator;
use html2text::render::text_renderer::TrivialDecorator;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest input accepted by the upstream translation and speech services
pub const MAX_TEXT_LENGTH: usize = 5000;

static MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[a-zA-Z/!][^>]*>").expect("markup pattern is valid"));
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("url pattern is valid"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strip HTML markup (when present) and collapse whitespace.
///
/// Markup is rendered as plain text: no markdown emphasis, headings, list
/// bullets or link footnotes survive.
pub fn normalize_text(text: &str) -> String {
    let plain_text = if MARKUP.is_match(text) {
        from_read_with_decorator(text.as_bytes(), usize::MAX, TrivialDecorator::new())
    } else {
        text.to_string()
    };

    WHITESPACE.replace_all(&plain_text, " ").trim().to_string()
}

/// Normalize text and drop URLs, which read badly when spoken
pub fn clean_for_speech(text: &str) -> String {
    let normalized = normalize_text(text);
    let without_urls = URL.replace_all(&normalized, "");

    WHITESPACE.replace_all(&without_urls, " ").trim().to_string()
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}
