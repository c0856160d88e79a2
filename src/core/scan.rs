// src/core/scan.rs
//
// Markup scanner runtime. A small streaming tokenizer walks the raw page
// text and reports start-tag, end-tag and text events, in document order,
// to a pluggable extractor. The extractor accumulates whatever it wants;
// `scan` hands back its result once the whole document is consumed.
//
// Deliberately not a DOM parser: no well-formedness checks, no tag
// balancing. Tag and attribute names are ASCII-lowercased; entities are
// decoded in text and quoted attribute values.

use crate::BoxError;
use super::sanitize::decode_entities;

/// One (name, value) attribute pair. Bare attributes get an empty value.
pub type Attr = (String, String);

pub trait Extractor {
    type Output;

    fn start_tag(&mut self, tag: &str, attrs: &[Attr]);
    fn end_tag(&mut self, tag: &str);
    fn text(&mut self, data: &str);
    fn finish(self) -> Self::Output;
}

/// Look up an attribute by (lowercased) name. First occurrence wins.
pub fn attr<'a>(attrs: &'a [Attr], name: &str) -> Option<&'a str> {
    attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
}

/// Feed `doc` through `extractor` and return its accumulated result.
/// Unterminated constructs are parse failures; no partial result comes back.
pub fn scan<E: Extractor>(doc: &str, mut extractor: E) -> Result<E::Output, BoxError> {
    let mut pos = 0usize;
    while pos < doc.len() {
        match doc[pos..].find('<') {
            None => {
                extractor.text(&decode_entities(&doc[pos..]));
                pos = doc.len();
            }
            Some(rel) => {
                if rel > 0 {
                    extractor.text(&decode_entities(&doc[pos..pos + rel]));
                }
                pos = consume_markup(doc, pos + rel, &mut extractor)?;
            }
        }
    }
    Ok(extractor.finish())
}

/// Handle one `<`-introduced construct starting at `at`; return the position
/// just past it.
fn consume_markup<E: Extractor>(doc: &str, at: usize, extractor: &mut E) -> Result<usize, BoxError> {
    let rest = &doc[at..];

    // A stray '<' that doesn't open markup is literal text
    let opens_markup = matches!(
        rest.as_bytes().get(1),
        Some(&b) if b.is_ascii_alphabetic() || b == b'/' || b == b'!' || b == b'?'
    );
    if !opens_markup {
        extractor.text("<");
        return Ok(at + 1);
    }

    if rest.starts_with("<!--") {
        let end = rest.find("-->").ok_or("unterminated comment")?;
        return Ok(at + end + 3);
    }
    // Doctype and processing instructions carry no data we want
    if rest.starts_with("<!") || rest.starts_with("<?") {
        let end = rest.find('>').ok_or("unterminated declaration")?;
        return Ok(at + end + 1);
    }
    if rest.starts_with("</") {
        let end = rest.find('>').ok_or("unterminated end tag")?;
        let name = rest[2..end].trim().to_ascii_lowercase();
        extractor.end_tag(&name);
        return Ok(at + end + 1);
    }

    let (name, attrs, used, self_closing) = parse_start_tag(rest)?;
    extractor.start_tag(&name, &attrs);
    if self_closing {
        extractor.end_tag(&name);
        return Ok(at + used);
    }

    // Script/style bodies are opaque: one raw text event, no tag scanning,
    // no entity decoding. The end tag is left for the main loop.
    if name == "script" || name == "style" {
        let body_at = at + used;
        let close = format!("</{name}");
        let rel = doc[body_at..]
            .to_ascii_lowercase()
            .find(&close)
            .ok_or_else(|| format!("unterminated <{name}> element"))?;
        if rel > 0 {
            extractor.text(&doc[body_at..body_at + rel]);
        }
        return Ok(body_at + rel);
    }

    Ok(at + used)
}

/// Parse `<name attr=value ...>` at the start of `rest`.
/// Returns (name, attrs, bytes consumed, self-closing).
fn parse_start_tag(rest: &str) -> Result<(String, Vec<Attr>, usize, bool), BoxError> {
    let b = rest.as_bytes();
    let mut i = 1; // past '<'

    let name_start = i;
    while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'>' && b[i] != b'/' {
        i += 1;
    }
    if i == name_start {
        let near: String = rest.chars().take(20).collect();
        return Err(format!("bad tag near {near:?}").into());
    }
    let name = rest[name_start..i].to_ascii_lowercase();

    let mut attrs: Vec<Attr> = Vec::new();
    loop {
        while i < b.len() && b[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= b.len() {
            return Err(format!("unterminated <{name}> tag").into());
        }
        match b[i] {
            b'>' => return Ok((name, attrs, i + 1, false)),
            b'/' => {
                i += 1;
                while i < b.len() && b[i].is_ascii_whitespace() {
                    i += 1;
                }
                if i < b.len() && b[i] == b'>' {
                    return Ok((name, attrs, i + 1, true));
                }
                return Err(format!("malformed <{name}> tag").into());
            }
            _ => {
                let attr_start = i;
                while i < b.len()
                    && !b[i].is_ascii_whitespace()
                    && b[i] != b'='
                    && b[i] != b'>'
                    && b[i] != b'/'
                {
                    i += 1;
                }
                let attr_name = rest[attr_start..i].to_ascii_lowercase();
                while i < b.len() && b[i].is_ascii_whitespace() {
                    i += 1;
                }
                let mut value = s!();
                if i < b.len() && b[i] == b'=' {
                    i += 1;
                    while i < b.len() && b[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    if i >= b.len() {
                        return Err(format!("unterminated <{name}> tag").into());
                    }
                    if b[i] == b'"' || b[i] == b'\'' {
                        let quote = b[i];
                        i += 1;
                        let val_start = i;
                        while i < b.len() && b[i] != quote {
                            i += 1;
                        }
                        if i >= b.len() {
                            return Err(format!("unterminated attribute in <{name}>").into());
                        }
                        value = decode_entities(&rest[val_start..i]);
                        i += 1;
                    } else {
                        let val_start = i;
                        while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'>' {
                            i += 1;
                        }
                        value = decode_entities(&rest[val_start..i]);
                    }
                }
                attrs.push((attr_name, value));
            }
        }
    }
}
