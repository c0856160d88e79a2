// src/core/links.rs

use super::scan::{attr, Attr, Extractor};

/// Collects every (href, visible text) pair in document order.
///
/// One pair per contiguous anchor span: raw text fragments seen while the
/// anchor is open are concatenated, so nested formatting tags don't split
/// the label. The accumulated text is trimmed once, at the span boundary.
pub struct LinkExtractor {
    active: Option<String>,
    buf: String,
    links: Vec<(String, String)>,
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self {
            active: None,
            buf: s!(),
            links: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if let Some(link) = self.active.take() {
            self.links.push((link, self.buf.trim().to_string()));
        }
        self.buf.clear();
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for LinkExtractor {
    type Output = Vec<(String, String)>;

    fn start_tag(&mut self, tag: &str, attrs: &[Attr]) {
        if tag == "a" {
            // A new anchor closes any span still open (unclosed or nested <a>)
            self.flush();
            self.active = attr(attrs, "href").map(str::to_string);
        }
    }

    fn end_tag(&mut self, tag: &str) {
        if tag == "a" {
            self.flush();
        }
    }

    fn text(&mut self, data: &str) {
        if self.active.is_some() {
            self.buf.push_str(data);
        }
    }

    fn finish(mut self) -> Self::Output {
        self.flush();
        self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scan::scan;

    fn links(doc: &str) -> Vec<(String, String)> {
        scan(doc, LinkExtractor::new()).unwrap()
    }

    #[test]
    fn nested_formatting_does_not_break_the_span() {
        let got = links(r#"<a href="/x">Hello <b>World</b></a>"#);
        assert_eq!(got, vec![("/x".to_string(), "Hello World".to_string())]);
    }

    #[test]
    fn pairs_in_document_order_with_duplicates() {
        let got = links(r#"<a href="/a">one</a> mid <a href="/a">one</a>"#);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], got[1]);
    }

    #[test]
    fn text_outside_anchors_is_ignored() {
        let got = links(r#"before <a href="/a">in</a> after"#);
        assert_eq!(got, vec![("/a".to_string(), "in".to_string())]);
    }

    #[test]
    fn anchor_without_href_collects_nothing() {
        let got = links(r#"<a name="top">label</a><a href="/b">ok</a>"#);
        assert_eq!(got, vec![("/b".to_string(), "ok".to_string())]);
    }

    #[test]
    fn image_only_anchor_yields_empty_text() {
        let got = links(r#"<a href="/pic"><img src="p.png"/></a>"#);
        assert_eq!(got, vec![("/pic".to_string(), String::new())]);
    }

    #[test]
    fn unclosed_anchor_flushes_at_end_of_document() {
        let got = links(r#"<a href="/x">dangling"#);
        assert_eq!(got, vec![("/x".to_string(), "dangling".to_string())]);
    }
}
