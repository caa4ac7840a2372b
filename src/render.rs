//! Render tree handed to hosts, plus HTML serialization.
//!
//! The animator does no layout or styling of its own; it only names the
//! classes supplied by its options. A host turns a [`RenderNode`] into
//! whatever it draws with (DOM nodes, terminal output, an HTML string).

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text};
use web_time::Duration;

use crate::error::TextypeError;
use crate::options::{CursorOptions, Options, StyleOptions};

/// Class of the root element.
pub const ROOT_CLASS: &str = "text-type";
/// Class of the text node.
pub const CONTENT_CLASS: &str = "text-type__content";
/// Class of the caret node.
pub const CURSOR_CLASS: &str = "text-type__cursor";
/// Extra caret class while it is suppressed.
pub const CURSOR_HIDDEN_CLASS: &str = "text-type__cursor--hidden";

const FALLBACK_TAG: &str = "div";
const DEFAULT_BLINK_SECS: f32 = 0.5;

/// Text node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    /// Characters revealed so far.
    pub text: String,
    /// CSS color override for the active string.
    pub color: Option<String>,
}

/// Caret node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorNode {
    /// Caret glyph.
    pub glyph: String,
    /// Caller-supplied caret classes.
    pub class_name: String,
    /// Full blink cycle (twice the configured blink duration).
    pub blink_period: Duration,
    /// Whether the hidden class is applied.
    pub hidden: bool,
}

impl CursorNode {
    /// Space-separated caret classes.
    pub fn class_list(&self) -> String {
        join_classes(&[
            CURSOR_CLASS,
            self.class_name.as_str(),
            if self.hidden { CURSOR_HIDDEN_CLASS } else { "" },
        ])
    }
}

/// Everything a host needs to draw one animator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    /// Root element tag.
    pub tag: String,
    /// Caller-supplied root classes.
    pub class_name: String,
    /// Pass-through root attributes, in key order.
    pub attributes: Vec<(String, String)>,
    /// The revealed text.
    pub content: ContentNode,
    /// The caret, when enabled.
    pub cursor: Option<CursorNode>,
}

impl RenderNode {
    /// Assemble a node from style and cursor options.
    pub fn compose(
        style: &StyleOptions,
        cursor: &CursorOptions,
        content: ContentNode,
        cursor_hidden: bool,
    ) -> Self {
        let tag = if is_valid_name(&style.tag) {
            style.tag.clone()
        } else {
            log::warn!("invalid root tag '{}', using div", style.tag);
            FALLBACK_TAG.to_owned()
        };
        let attributes = style
            .attributes
            .iter()
            .filter(|(key, _)| is_valid_name(key) && key.as_str() != "class")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let cursor = cursor.show.then(|| CursorNode {
            glyph: cursor.character.clone(),
            class_name: cursor.class_name.clone(),
            blink_period: blink_period(cursor.blink_duration_secs),
            hidden: cursor_hidden,
        });
        Self {
            tag,
            class_name: style.class_name.clone(),
            attributes,
            content,
            cursor,
        }
    }

    /// Static rendering of the final string, for configurations that cannot
    /// be animated. Renders no text when there are no strings at all.
    pub fn fallback(options: &Options) -> Self {
        let text = options.texts.last().unwrap_or_default().to_owned();
        let color = options
            .style
            .color_for(options.texts.len().saturating_sub(1))
            .map(str::to_owned);
        Self::compose(
            &options.style,
            &options.cursor,
            ContentNode { text, color },
            false,
        )
    }

    /// Space-separated root classes.
    pub fn class_list(&self) -> String {
        join_classes(&[ROOT_CLASS, self.class_name.as_str()])
    }

    /// Serialize to an HTML fragment with all text and attributes escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            "<{} class=\"{}\"",
            self.tag,
            attr(&self.class_list())
        );
        for (key, value) in &self.attributes {
            let _ = write!(html, " {key}=\"{}\"", attr(value));
        }
        html.push('>');

        let _ = write!(html, "<span class=\"{CONTENT_CLASS}\"");
        if let Some(color) = &self.content.color {
            let _ = write!(html, " style=\"color: {}\"", attr(color));
        }
        let _ = write!(html, ">{}</span>", encode_text(&self.content.text));

        if let Some(cursor) = &self.cursor {
            let _ = write!(
                html,
                "<span style=\"animation-duration: {}ms\" class=\"{}\" \
                 aria-hidden=\"true\">{}</span>",
                cursor.blink_period.as_millis(),
                attr(&cursor.class_list()),
                encode_text(&cursor.glyph)
            );
        }

        let _ = write!(html, "</{}>", self.tag);
        html
    }
}

/// Something that can display a [`RenderNode`].
pub trait RenderHost {
    /// Draw the node, replacing whatever was drawn before.
    fn render(&mut self, node: &RenderNode) -> Result<(), TextypeError>;
}

fn blink_period(blink_duration_secs: f32) -> Duration {
    let secs = if blink_duration_secs.is_finite() && blink_duration_secs > 0.0
    {
        blink_duration_secs
    } else {
        log::warn!(
            "cursor blink duration {blink_duration_secs}s is not positive, \
             using {DEFAULT_BLINK_SECS}s"
        );
        DEFAULT_BLINK_SECS
    };
    Duration::from_millis((f64::from(secs) * 2000.0).round() as u64)
}

fn join_classes(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &str) -> ContentNode {
        ContentNode {
            text: text.to_owned(),
            color: None,
        }
    }

    #[test]
    fn default_node_html() {
        let node = RenderNode::compose(
            &StyleOptions::default(),
            &CursorOptions::default(),
            content("Hel"),
            false,
        );
        assert_eq!(
            node.to_html(),
            "<div class=\"text-type\"><span class=\"text-type__content\">Hel\
             </span><span style=\"animation-duration: 1000ms\" \
             class=\"text-type__cursor\" aria-hidden=\"true\">|</span></div>"
        );
    }

    #[test]
    fn classes_tag_and_color() {
        let mut style = StyleOptions::default();
        style.tag = "h2".to_owned();
        style.class_name = "  text-3xl font-bold ".to_owned();
        let mut cursor = CursorOptions::default();
        cursor.class_name = "text-primary".to_owned();
        let node = RenderNode::compose(
            &style,
            &cursor,
            ContentNode {
                text: "Skills".to_owned(),
                color: Some("#ff0000".to_owned()),
            },
            true,
        );
        assert_eq!(node.class_list(), "text-type text-3xl font-bold");
        let cursor = node.cursor.as_ref().unwrap();
        assert_eq!(
            cursor.class_list(),
            "text-type__cursor text-primary text-type__cursor--hidden"
        );
        let html = node.to_html();
        assert!(html.starts_with("<h2 class=\"text-type text-3xl font-bold\">"));
        assert!(html.contains("style=\"color: #ff0000\""));
        assert!(html.ends_with("</h2>"));
    }

    #[test]
    fn hidden_cursor_option_drops_node() {
        let mut cursor = CursorOptions::default();
        cursor.show = false;
        let node = RenderNode::compose(
            &StyleOptions::default(),
            &cursor,
            content("x"),
            false,
        );
        assert!(node.cursor.is_none());
        assert!(!node.to_html().contains(CURSOR_CLASS));
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut style = StyleOptions::default();
        let _ = style
            .attributes
            .insert("data-name".to_owned(), "a\"b".to_owned());
        let _ = style
            .attributes
            .insert("onclick=\"x".to_owned(), "dropped".to_owned());
        let _ = style.attributes.insert("class".to_owned(), "x".to_owned());
        let node = RenderNode::compose(
            &style,
            &CursorOptions::default(),
            content("<b>Tom & Jerry</b>"),
            false,
        );
        let html = node.to_html();
        assert!(html.contains("&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
        assert!(html.contains("data-name=\"a&quot;b\""));
        assert!(!html.contains("dropped"));
        assert_eq!(node.attributes.len(), 1);
    }

    #[test]
    fn color_and_cursor_glyph_are_escaped() {
        let mut cursor = CursorOptions::default();
        cursor.character = "<".to_owned();
        cursor.class_name = "a\"b".to_owned();
        let node = RenderNode::compose(
            &StyleOptions::default(),
            &cursor,
            ContentNode {
                text: "x".to_owned(),
                color: Some("red\" onclick=\"y".to_owned()),
            },
            false,
        );
        let html = node.to_html();
        assert!(html.contains("style=\"color: red&quot; onclick=&quot;y\""));
        assert!(html.contains("class=\"text-type__cursor a&quot;b\""));
        assert!(html.contains(">&lt;</span>"));
    }

    #[test]
    fn invalid_tag_falls_back_to_div() {
        let mut style = StyleOptions::default();
        style.tag = "h2 onload=x".to_owned();
        let node = RenderNode::compose(
            &style,
            &CursorOptions::default(),
            content(""),
            false,
        );
        assert_eq!(node.tag, "div");
    }

    #[test]
    fn blink_period_doubles_duration() {
        assert_eq!(blink_period(0.5), Duration::from_millis(1000));
        assert_eq!(blink_period(0.6), Duration::from_millis(1200));
        assert_eq!(blink_period(-1.0), Duration::from_millis(1000));
    }

    #[test]
    fn fallback_renders_last_string() {
        let mut opts = Options::with_texts(["one", "two"]);
        opts.style.text_colors = vec!["red".to_owned(), "blue".to_owned()];
        let node = RenderNode::fallback(&opts);
        assert_eq!(node.content.text, "two");
        assert_eq!(node.content.color.as_deref(), Some("blue"));
        assert!(!node.cursor.unwrap().hidden);

        let empty = RenderNode::fallback(&Options::default());
        assert_eq!(empty.content.text, "");
    }
}
