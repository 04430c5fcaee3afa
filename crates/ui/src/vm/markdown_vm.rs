use std::collections::{HashMap, HashSet};

use study_core::model::StudyNote;

/// Id of the element study-note stylesheets are scoped to.
pub const STUDY_NOTE_CONTAINER_ID: &str = "study-note-content";

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Allow-list for rendered summaries.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul",
        "ol", "li", "a", "h1", "h2", "h3", "h4", "h5", "h6", "del", "table", "thead", "tbody",
        "tr", "th", "td", "hr", "input",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    attributes.insert("input", ["type", "checked", "disabled"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// Allow-list for AI-written study notes.
///
/// Structure and styling hooks (`class`, `id`, `style`, `data-prompt`) are
/// kept so the generated stylesheet still applies; scripts and handlers are
/// removed. Images may only be inline `data:` URLs.
#[must_use]
pub fn sanitize_note_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "article", "section", "header", "footer", "aside", "nav", "main", "div", "span", "p",
        "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "em", "strong", "b", "i", "u", "mark",
        "small", "sub", "sup", "code", "pre", "blockquote", "ul", "ol", "li", "dl", "dt", "dd",
        "table", "thead", "tbody", "tfoot", "tr", "th", "td", "caption", "figure", "figcaption",
        "img", "a", "abbr", "cite", "q", "details", "summary",
    ]
    .into_iter()
    .collect();

    let generic: HashSet<&str> = ["class", "id", "style", "data-prompt", "title"]
        .into_iter()
        .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    attributes.insert("img", ["src", "alt"].into_iter().collect());
    attributes.insert("td", ["colspan", "rowspan"].into_iter().collect());
    attributes.insert("th", ["colspan", "rowspan", "scope"].into_iter().collect());

    let schemes: HashSet<&str> = ["http", "https", "mailto", "data"].into_iter().collect();

    ammonia::Builder::new()
        .tags(tags)
        .generic_attributes(generic)
        .tag_attributes(attributes)
        .url_schemes(schemes)
        .attribute_filter(|element, attribute, value| {
            let data_url = value.trim_start().to_ascii_lowercase().starts_with("data:");
            match (element, attribute) {
                ("img", "src") if !data_url => None,
                ("a", "href") if data_url => None,
                _ => Some(value.into()),
            }
        })
        .link_rel(None)
        .clean(html)
        .to_string()
}

/// Keeps a stylesheet from closing its `<style>` element early.
fn sanitize_css(css: &str) -> String {
    css.replace("</", "<\\/")
}

/// Standalone HTML page for an exported summary.
#[must_use]
pub fn summary_document(title: &str, markdown: &str) -> String {
    let title = escape_text(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        body = markdown_to_html(markdown),
    )
}

/// Standalone HTML page for a study note: its CSS in `<style>`, its content
/// wrapped in the container the CSS targets.
#[must_use]
pub fn study_note_document(title: &str, note: &StudyNote) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{css}\n</style>\n</head>\n<body>\n<div id=\"{STUDY_NOTE_CONTAINER_ID}\">\n{html}\n</div>\n</body>\n</html>\n",
        title = escape_text(title),
        css = sanitize_css(note.css_styles()),
        html = sanitize_note_html(note.html_content()),
    )
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
