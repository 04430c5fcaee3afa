use std::collections::HashMap;

use scraper::node::Element;
use scraper::{ElementRef, Html, Node};
use serde::Serialize;
use thiserror::Error;

const PLACEHOLDER_CLASS: &str = "image-placeholder";
const PROMPT_ATTR: &str = "data-prompt";

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyNoteError {
    #[error("study note is missing its HTML content")]
    MissingHtml,

    #[error("study note is missing its CSS styles")]
    MissingCss,
}

/// AI-authored chapter: semantic HTML plus the stylesheet that dresses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyNote {
    html_content: String,
    css_styles: String,
}

impl StudyNote {
    /// # Errors
    ///
    /// Returns `StudyNoteError` if either part is blank.
    pub fn new(
        html_content: impl Into<String>,
        css_styles: impl Into<String>,
    ) -> Result<Self, StudyNoteError> {
        let html_content = html_content.into();
        let css_styles = css_styles.into();
        if html_content.trim().is_empty() {
            return Err(StudyNoteError::MissingHtml);
        }
        if css_styles.trim().is_empty() {
            return Err(StudyNoteError::MissingCss);
        }
        Ok(Self {
            html_content,
            css_styles,
        })
    }

    #[must_use]
    pub fn html_content(&self) -> &str {
        &self.html_content
    }

    #[must_use]
    pub fn css_styles(&self) -> &str {
        &self.css_styles
    }

    /// Prompts of every `image-placeholder` div, in document order.
    #[must_use]
    pub fn image_prompts(&self) -> Vec<String> {
        let fragment = Html::parse_fragment(&self.html_content);
        fragment
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter_map(|el| placeholder_prompt(el.value()))
            .map(str::to_owned)
            .collect()
    }

    /// Replace placeholders whose prompt has an image (base64 PNG) in `images`.
    ///
    /// Placeholders without an image are left untouched.
    #[must_use]
    pub fn with_images(&self, images: &HashMap<String, String>) -> Self {
        let fragment = Html::parse_fragment(&self.html_content);
        let root = fragment.root_element();
        if !has_replacement(root, images) {
            return self.clone();
        }

        let mut html = String::with_capacity(self.html_content.len());
        write_children(root, images, &mut html);

        Self {
            html_content: html,
            css_styles: self.css_styles.clone(),
        }
    }
}

/// The non-blank prompt of a `<div class="image-placeholder" data-prompt=...>`.
fn placeholder_prompt(el: &Element) -> Option<&str> {
    if el.name() != "div" || !el.classes().any(|class| class == PLACEHOLDER_CLASS) {
        return None;
    }
    el.attr(PROMPT_ATTR)
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
}

fn replacement<'a>(
    el: ElementRef<'_>,
    images: &'a HashMap<String, String>,
) -> Option<(&'a str, String)> {
    let prompt = placeholder_prompt(el.value())?;
    images
        .get(prompt)
        .map(|data| (data.as_str(), prompt.to_owned()))
}

fn has_replacement(el: ElementRef<'_>, images: &HashMap<String, String>) -> bool {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .any(|inner| replacement(inner, images).is_some())
}

fn write_children(el: ElementRef<'_>, images: &HashMap<String, String>, out: &mut String) {
    let raw_text = matches!(el.value().name(), "style" | "script");
    for child in el.children() {
        match child.value() {
            Node::Text(text) if raw_text => out.push_str(text),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            Node::Element(_) => {
                if let Some(inner) = ElementRef::wrap(child) {
                    write_element(inner, images, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(el: ElementRef<'_>, images: &HashMap<String, String>, out: &mut String) {
    if let Some((data, prompt)) = replacement(el, images) {
        out.push_str(&format!(
            "<figure class=\"generated-figure\"><img src=\"data:image/png;base64,{data}\" alt=\"{alt}\"><figcaption>{alt}</figcaption></figure>",
            alt = escape_attr(&prompt),
        ));
        return;
    }
    if !has_replacement(el, images) {
        out.push_str(&el.html());
        return;
    }

    let name = el.value().name();
    out.push('<');
    out.push_str(name);
    for (attr, value) in el.value().attrs() {
        out.push_str(&format!(" {attr}=\"{}\"", escape_attr(value)));
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    write_children(el, images, out);
    out.push_str(&format!("</{name}>"));
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<h1>Cells</h1>
<div class="image-placeholder" data-prompt="animal cell cross-section"></div>
<p>Mitochondria.</p>
<div class="callout">Note</div>
<div class="image-placeholder wide" data-prompt="ATP &amp; energy"></div>"#;

    #[test]
    fn rejects_missing_parts() {
        assert_eq!(
            StudyNote::new(" ", "body {}").unwrap_err(),
            StudyNoteError::MissingHtml
        );
        assert_eq!(
            StudyNote::new("<p>x</p>", "").unwrap_err(),
            StudyNoteError::MissingCss
        );
    }

    #[test]
    fn finds_placeholder_prompts_in_order() {
        let note = StudyNote::new(HTML, "h1 {}").unwrap();
        assert_eq!(
            note.image_prompts(),
            vec!["animal cell cross-section".to_string(), "ATP & energy".to_string()]
        );
    }

    #[test]
    fn substitutes_only_known_images() {
        let note = StudyNote::new(HTML, "h1 {}").unwrap();
        let mut images = HashMap::new();
        images.insert("ATP & energy".to_string(), "QUJD".to_string());

        let filled = note.with_images(&images);
        let html = filled.html_content();
        assert!(html.contains("data:image/png;base64,QUJD"));
        assert!(html.contains("alt=\"ATP &amp; energy\""));
        assert!(html.contains("data-prompt=\"animal cell cross-section\""));
        assert!(html.contains("<div class=\"callout\">Note</div>"));
        assert_eq!(filled.image_prompts().len(), 1);
    }

    #[test]
    fn prompt_may_contain_angle_brackets() {
        let note = StudyNote::new(
            r#"<div class="image-placeholder" data-prompt="energy > work"></div>"#,
            "p {}",
        )
        .unwrap();
        assert_eq!(note.image_prompts(), vec!["energy > work".to_string()]);
    }

    #[test]
    fn single_quoted_attributes_are_recognized() {
        let note = StudyNote::new(
            "<div class='image-placeholder' data-prompt='mitosis'></div>",
            "p {}",
        )
        .unwrap();
        assert_eq!(note.image_prompts(), vec!["mitosis".to_string()]);
    }

    #[test]
    fn similar_class_names_are_not_placeholders() {
        let note = StudyNote::new(
            r#"<div class="image-placeholder-caption" data-prompt="caption text">x</div>"#,
            "p {}",
        )
        .unwrap();
        assert!(note.image_prompts().is_empty());
    }

    #[test]
    fn nested_markup_is_replaced_with_its_placeholder() {
        let note = StudyNote::new(
            r#"<div class="image-placeholder" data-prompt="cell"><div class="hint">drawing</div></div><p>after</p>"#,
            "p {}",
        )
        .unwrap();
        let images = HashMap::from([("cell".to_string(), "QUJD".to_string())]);

        let html = note.with_images(&images).html_content().to_owned();
        assert!(html.ends_with("</figure><p>after</p>"), "{html}");
        assert!(!html.contains("drawing"));
        assert_eq!(html.matches("</div>").count(), 0);
    }

    #[test]
    fn no_matching_image_keeps_html_verbatim() {
        let note = StudyNote::new(HTML, "h1 {}").unwrap();
        assert_eq!(note.with_images(&HashMap::new()), note);
    }
}
