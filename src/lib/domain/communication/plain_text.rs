//! Plain text bodies derived from HTML

use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref COMMENT_REGEX: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref SCRIPT_REGEX: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref STYLE_REGEX: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap();
    // Quoted attribute values may contain '>'.
    static ref TAG_REGEX: Regex =
        Regex::new(r#"<[a-zA-Z/!?](?:"[^"]*"|'[^']*'|[^'">])*>"#).unwrap();
    static ref ENTITY_REGEX: Regex =
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]*);").unwrap();
}

/// Picks the plain text body for a message.
///
/// Explicit text always wins. Without it, the text is derived from `html`;
/// with neither, the result is empty.
pub fn derive_text(text: Option<&str>, html: Option<&str>) -> String {
    match (text, html) {
        (Some(text), _) => text.to_string(),
        (None, Some(html)) => html_to_text(html),
        (None, None) => String::new(),
    }
}

/// Strips all markup from `html` and resolves character references.
pub fn html_to_text(html: &str) -> String {
    let text = COMMENT_REGEX.replace_all(html, "");
    let text = SCRIPT_REGEX.replace_all(&text, "");
    let text = STYLE_REGEX.replace_all(&text, "");
    let text = TAG_REGEX.replace_all(&text, "");

    // Single pass, so "&amp;lt;" decodes to "&lt;" and no further.
    let text = ENTITY_REGEX.replace_all(&text, |caps: &Captures<'_>| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });

    text.trim().to_string()
}

fn decode_entity(reference: &str) -> Option<String> {
    let Some(numeric) = reference.strip_prefix('#') else {
        return named_entity(reference);
    };

    let code = match numeric
        .strip_prefix('x')
        .or_else(|| numeric.strip_prefix('X'))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => numeric.parse::<u32>().ok()?,
    };

    char::from_u32(code).map(String::from)
}

fn named_entity(name: &str) -> Option<String> {
    let reference = format!("&{name};");
    let decoded = decode_html_entities(&reference);

    if decoded == reference {
        return None;
    }

    // Plain text has no use for a non-breaking space.
    Some(decoded.replace('\u{a0}', " "))
}
