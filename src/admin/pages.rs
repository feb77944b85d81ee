//! HTML renderings for the admin page and upload responses.
//!
//! The admin page uses htmx: the upload form posts to `/upload` and the "src"
//! button swaps itself for the provenance link.

use crate::storage::types::StorageKey;

use std::fmt::Write;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.10";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One stored image: served-URL link, source trigger and a preview.
pub fn image_entry(key: &str) -> String {
    let key = escape(key);
    format!(
        concat!(
            "<div>",
            "<a href=\"/{key}\">{key}</a> ",
            "<button hx-get=\"/admin/{key}/src\" hx-swap=\"outerHTML\">src</button>",
            "<br />",
            "<img src=\"/{key}\" width=\"300\" />",
            "</div>"
        ),
        key = key
    )
}

/// Fragment returned by a successful upload.
pub fn uploaded(key: &str) -> String {
    format!("<div>Uploaded{}</div>", image_entry(key))
}

/// Provenance link returned by `GET /admin/:key/src`.
pub fn source_link(source_url: &str) -> String {
    let url = escape(source_url);
    format!("<a href=\"{url}\" target=\"_blank\">{url}</a>", url = url)
}

/// Full admin page: upload form plus one page of stored keys.
pub fn listing(keys: &[StorageKey], next_cursor: Option<&str>, limit: usize) -> String {
    let mut items = String::new();
    for key in keys {
        let _ = write!(items, "<li>{}</li>", image_entry(key.as_str()));
    }

    let next = match next_cursor {
        Some(cursor) => format!(
            "<a href=\"/admin/?cursor={}&amp;limit={}\">next page</a>",
            escape(cursor),
            limit
        ),
        None => String::new(),
    };

    layout(&format!(
        concat!(
            "<style>.loading {{ display: none; }} .htmx-request.loading {{ display: inline; }}</style>",
            "<h1>My Figma Images</h1>",
            "<form hx-post=\"/upload\" hx-target=\"#uploaded\" hx-swap=\"afterend\" hx-indicator=\".loading\">",
            "<input type=\"text\" name=\"figmaUrl\" placeholder=\"Figma URL\" />",
            "<button type=\"submit\">Upload</button>",
            "</form>",
            "<div class=\"loading\">Uploading...</div>",
            "<div id=\"uploaded\"></div>",
            "<ul>{items}</ul>",
            "{next}"
        ),
        items = items,
        next = next
    ))
}

fn layout(body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html><head>",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />",
            "<script src=\"{htmx}\"></script>",
            "<title>Figma image admin</title>",
            "</head><body>{body}</body></html>"
        ),
        htmx = HTMX_SRC,
        body = body
    )
}
