use serde_json::{Map, Value};

use super::entry::{AssetIndex, Entry};
use super::rich_text::render_rich_text;
use crate::configuration::PostDefaults;
use crate::domain::BlogPost;

pub const UNTITLED: &str = "Untitled Post";
pub const NO_EXCERPT: &str = "No excerpt available";
pub const NO_CONTENT: &str = "No content available";
pub const CONTENT_ERROR: &str = "Content processing error";

const IMAGE_FIELDS: [&str; 3] = ["image", "featuredImage", "heroImage"];

/// Projects a loosely-typed entry onto `BlogPost`. Never fails: every field
/// has a fallback chain ending in a default.
pub fn normalize_entry(entry: &Entry, assets: &AssetIndex, defaults: &PostDefaults) -> BlogPost {
    let fields = &entry.fields;
    BlogPost {
        id: entry.sys.id.clone(),
        title: text(fields, &["title"]).unwrap_or_else(|| UNTITLED.to_string()),
        excerpt: text(fields, &["excerpt", "description"])
            .unwrap_or_else(|| NO_EXCERPT.to_string()),
        content: content(fields, assets),
        author: text(fields, &["author"]).unwrap_or_else(|| defaults.author.clone()),
        date: text(fields, &["publishDate", "date"])
            .or_else(|| entry.sys.created_at.clone())
            .unwrap_or_default(),
        read_time: text(fields, &["readTime"]).unwrap_or_else(|| defaults.read_time.clone()),
        category: text(fields, &["category"]).unwrap_or_else(|| defaults.category.clone()),
        tags: tags(fields.get("tags")),
        image: image(fields, assets, &defaults.placeholder_image),
        featured: fields
            .get("featured")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        slug: text(fields, &["slug"]).unwrap_or_else(|| entry.sys.id.clone()),
    }
}

fn text(fields: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// First value among `names` that is neither null, `""` nor `false`.
fn present<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| match value {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
}

fn tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        Some(Value::String(tag)) => vec![tag.clone()],
        _ => vec![],
    }
}

fn content(fields: &Map<String, Value>, assets: &AssetIndex) -> String {
    match present(fields, &["content", "body"]) {
        None => NO_CONTENT.to_string(),
        Some(Value::String(html)) => html.clone(),
        Some(document) => match render_rich_text(document, assets) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Failed to render rich text content");
                CONTENT_ERROR.to_string()
            }
        },
    }
}

fn image(fields: &Map<String, Value>, assets: &AssetIndex, placeholder: &str) -> String {
    let raw = IMAGE_FIELDS
        .iter()
        .filter_map(|name| fields.get(*name))
        .find_map(|value| match value {
            Value::String(url) if !url.trim().is_empty() => Some(url.as_str()),
            Value::String(_) => None,
            other => assets.resolve(other),
        })
        .unwrap_or_default();
    repair_image_url(raw, placeholder)
}

/// Turns whatever the CMS stored into an absolute `https://` URL:
/// `//host/x` and `http://host/x` are upgraded, a bare `host/x` gets a
/// scheme, an empty value becomes `placeholder`.
pub fn repair_image_url(raw: &str, placeholder: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        placeholder.to_string()
    } else if raw.starts_with("https://") {
        raw.to_string()
    } else if let Some(rest) = raw.strip_prefix("//") {
        format!("https://{rest}")
    } else if let Some(rest) = raw.strip_prefix("http://") {
        format!("https://{rest}")
    } else {
        format!("https://{raw}")
    }
}
