//! Post-processing of raw generated text into typed artifact fields.
//!
//! Extraction is best-effort: when the model drifts from the requested layout
//! the optional fields are simply left empty.

use std::sync::OnceLock;

use regex::Regex;

use crate::generation::content_type::ContentType;
use crate::models::content::GeneratedContent;

/// Placeholder image attached to every recipe post.
pub const RECIPE_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1556761175-b413da4baf72";

fn keyword_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:primary|focus) keywords\**[^\S\n]*(?:\([^)\n]*\))?\**[:\n]+")
            .expect("keyword heading regex is valid")
    })
}

fn meta_title_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[\s*#-]*meta title[^:\n]*:(.*)$").expect("meta title regex is valid")
    })
}

fn meta_description_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[\s*#-]*meta description[^:\n]*:(.*)$")
            .expect("meta description regex is valid")
    })
}

/// Builds an artifact from raw text, filling the derived fields for its type.
pub fn build_artifact(content_type: ContentType, keyword: &str, text: String) -> GeneratedContent {
    let mut content = GeneratedContent::new(content_type, keyword, text);

    match content_type {
        ContentType::Image => {
            content.image_prompt = Some(content.text.clone());
        }
        ContentType::Seo => {
            let keywords = extract_seo_keywords(&content.text);
            if !keywords.is_empty() {
                content.seo_keywords = Some(keywords);
            }
            content.meta_title = headed_value(meta_title_line(), &content.text);
            content.meta_description = headed_value(meta_description_line(), &content.text);
        }
        ContentType::Recipe => {
            content.image_url = Some(RECIPE_PLACEHOLDER_IMAGE.to_string());
        }
        ContentType::Pinterest | ContentType::Article => {}
    }

    content
}

/// Extracts the keyword list following a "Primary Keywords" (or "Focus Keywords") heading.
///
/// The block ends at the first blank line, the first line starting with a letter,
/// or the end of the text. Returns an empty list when no heading is found.
pub fn extract_seo_keywords(text: &str) -> Vec<String> {
    let Some(heading) = keyword_heading().find(text) else {
        return Vec::new();
    };

    let rest = &text[heading.end()..];
    let block = &rest[..block_end(rest)];

    block
        .split([',', '\n'])
        .map(clean_list_item)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn block_end(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'\n' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'\n') => return i,
            Some(next) if next.is_ascii_alphabetic() => return i,
            _ => {}
        }
    }
    rest.len()
}

/// Strips markdown emphasis, quotes and a leading `-`, `•` or `1.` list marker.
fn clean_list_item(item: &str) -> &str {
    let mut item = item.trim().trim_matches(['*', '"']).trim();
    if let Some(rest) = item.strip_prefix(['-', '•']) {
        item = rest.trim_start();
    }
    let digits = item
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(item.len());
    if digits > 0 {
        if let Some(rest) = item[digits..].strip_prefix(['.', ')']) {
            item = rest;
        }
    }
    item.trim().trim_matches(['*', '"']).trim()
}

/// Value after `Heading:` on the same line, or on the next non-empty line.
fn headed_value(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    let inline = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let cleaned = clean_list_item(inline);
    if !cleaned.is_empty() {
        return Some(cleaned.to_string());
    }

    let after = &text[caps.get(0)?.end()..];
    after
        .lines()
        .map(clean_list_item)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
