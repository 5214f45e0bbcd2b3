//! Contentful rich text -> HTML.
//!
//! Output follows the stock Contentful HTML renderer closely enough that
//! existing stylesheets keep working: `<p>`, `<h1>`..`<h6>`, lists, quotes,
//! tables, `<b>`/`<i>`/`<u>`/`<code>` marks and `<br/>` for newlines. Embedded
//! entries have no HTML form and are dropped; embedded assets become `<img>`.

use htmlescape::encode_minimal;
use serde::Deserialize;
use serde_json::Value;

use super::entry::AssetIndex;
use super::normalize::repair_image_url;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Node {
    node_type: String,
    #[serde(default)]
    content: Vec<Node>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    marks: Vec<Mark>,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize, Debug)]
struct Mark {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(thiserror::Error, Debug)]
pub enum RichTextError {
    #[error("Rich text is not a well-formed node tree.")]
    Malformed(#[from] serde_json::Error),
    #[error("Expected a `document` node at the root, found `{0}`.")]
    NotADocument(String),
}

pub fn render_rich_text(value: &Value, assets: &AssetIndex) -> Result<String, RichTextError> {
    let document = Node::deserialize(value)?;
    if document.node_type != "document" {
        return Err(RichTextError::NotADocument(document.node_type));
    }
    let mut html = String::new();
    render_children(&document, assets, &mut html);
    Ok(html)
}

fn render_children(node: &Node, assets: &AssetIndex, out: &mut String) {
    for child in &node.content {
        render_node(child, assets, out);
    }
}

fn render_wrapped(tag: &str, node: &Node, assets: &AssetIndex, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_children(node, assets, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_node(node: &Node, assets: &AssetIndex, out: &mut String) {
    let tag = match node.node_type.as_str() {
        "text" => return render_text(node, out),
        "hr" => return out.push_str("<hr/>"),
        "hyperlink" => return render_link(node, assets, out),
        "embedded-asset-block" => return render_asset(node, assets, out),
        "embedded-entry-block" | "embedded-entry-inline" => return,
        "paragraph" => "p",
        "heading-1" => "h1",
        "heading-2" => "h2",
        "heading-3" => "h3",
        "heading-4" => "h4",
        "heading-5" => "h5",
        "heading-6" => "h6",
        "unordered-list" => "ul",
        "ordered-list" => "ol",
        "list-item" => "li",
        "blockquote" => "blockquote",
        "table" => "table",
        "table-row" => "tr",
        "table-cell" => "td",
        "table-header-cell" => "th",
        // entry/asset hyperlinks and anything newer: keep the text
        _ => return render_children(node, assets, out),
    };
    render_wrapped(tag, node, assets, out);
}

fn render_text(node: &Node, out: &mut String) {
    let value = node.value.as_deref().unwrap_or_default();
    let mut html = encode_minimal(value).replace('\n', "<br/>");
    for mark in &node.marks {
        let tag = match mark.kind.as_str() {
            "bold" => "b",
            "italic" => "i",
            "underline" => "u",
            "code" => "code",
            "superscript" => "sup",
            "subscript" => "sub",
            "strikethrough" => "s",
            _ => continue,
        };
        html = format!("<{tag}>{html}</{tag}>");
    }
    out.push_str(&html);
}

fn render_link(node: &Node, assets: &AssetIndex, out: &mut String) {
    let uri = node.data.get("uri").and_then(Value::as_str).unwrap_or_default();
    out.push_str("<a href=\"");
    out.push_str(&encode_minimal(uri));
    out.push_str("\">");
    render_children(node, assets, out);
    out.push_str("</a>");
}

fn render_asset(node: &Node, assets: &AssetIndex, out: &mut String) {
    let Some(target) = node.data.get("target") else {
        return;
    };
    let Some(url) = assets.resolve(target) else {
        return;
    };
    let alt = target
        .get("fields")
        .and_then(|fields| fields.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    out.push_str("<img src=\"");
    out.push_str(&encode_minimal(&repair_image_url(url, "")));
    out.push_str("\" alt=\"");
    out.push_str(&encode_minimal(alt));
    out.push_str("\"/>");
}
