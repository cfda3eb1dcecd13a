use std::collections::{HashMap, HashSet};

use pulldown_cmark::{Event, Options, Parser, TagEnd};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render trainer notes as sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let parser = Parser::new_ext(input, options());
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "br", "em", "strong", "del", "code", "pre", "blockquote", "ul", "ol", "li", "a",
        "input",
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

/// Plain-text preview of notes for list rows, cut at `max_chars` with an ellipsis.
#[must_use]
pub fn notes_excerpt(input: &str, max_chars: usize) -> String {
    let mut text = String::new();
    for event in Parser::new_ext(input, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::Heading(_)) => {
                if !text.ends_with(' ') && !text.is_empty() {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_emphasis_and_strips_scripts() {
        let html = markdown_to_html("Felt **strong**\n\n<script>alert(1)</script>");
        assert!(html.contains("<strong>strong</strong>"));
        assert!(!html.contains("script"));
    }

    #[test]
    fn excerpt_drops_markup_and_truncates() {
        assert_eq!(notes_excerpt("Felt **strong** today", 40), "Felt strong today");
        assert_eq!(notes_excerpt("- one\n- two", 40), "one two");
        assert_eq!(notes_excerpt("abcdefghij", 4), "abcd…");
    }
}
