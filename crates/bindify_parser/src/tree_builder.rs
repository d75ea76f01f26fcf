use bindify_core::{Attribute, Document, Element, ElementKind, NodeId, NodeKind};
use log::debug;

use crate::error::{ParseError, ParseErrorKind};

/// Parses a whole markup string into a fresh [`Document`].
///
/// The builder is tolerant in the htmlparser2 mold and always produces a
/// tree; anything it had to gloss over lands in `errors`. Contract with the
/// transform passes:
/// - no entity decoding;
/// - tag and attribute names are kept verbatim, no case folding;
/// - `/>` is not recognized (a stray `/` before `>` is ignored);
/// - no automatic closing of void tags, so the tree shape does not depend
///   on any void-tag table;
/// - whitespace runs inside text nodes collapse to a single space.
pub fn parse_document(input: &str, errors: &mut Vec<ParseError>) -> Document {
    let mut doc = Document::new();
    let roots = TreeBuilder::new(input, &mut doc, errors).run();
    doc.roots = roots;
    doc
}

/// Parses a markup fragment into an existing arena. The returned roots are
/// linked to each other as siblings, carry no parent, and are not attached
/// to `doc.roots`; the caller decides where they go (usually via
/// [`Document::splice`]).
pub fn parse_fragment(
    doc: &mut Document,
    input: &str,
    errors: &mut Vec<ParseError>,
) -> Vec<NodeId> {
    TreeBuilder::new(input, doc, errors).run()
}

struct OpenElement {
    id: NodeId,
    children: Vec<NodeId>,
}

struct TreeBuilder<'i, 'd, 'e> {
    input: &'i str,
    pos: usize,
    doc: &'d mut Document,
    errors: &'e mut Vec<ParseError>,
    open: Vec<OpenElement>,
    root_list: Vec<NodeId>,
    /// Raw character data accumulated until the next structural node;
    /// normalized and flushed as one text node so that runs separated only
    /// by ignored markup still merge.
    pending_text: String,
}

impl<'i, 'd, 'e> TreeBuilder<'i, 'd, 'e> {
    fn new(input: &'i str, doc: &'d mut Document, errors: &'e mut Vec<ParseError>) -> Self {
        TreeBuilder {
            input,
            pos: 0,
            doc,
            errors,
            open: Vec::new(),
            root_list: Vec::new(),
            pending_text: String::new(),
        }
    }

    fn run(mut self) -> Vec<NodeId> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            let Some(lt) = find_construct(rest) else {
                self.pending_text.push_str(rest);
                self.pos = self.input.len();
                break;
            };
            if lt > 0 {
                self.pending_text.push_str(&rest[..lt]);
                self.pos += lt;
            }

            let rest = &self.input[self.pos..];
            if rest.starts_with("<!--") {
                self.parse_comment();
            } else if rest.starts_with("<![CDATA[") {
                self.parse_cdata();
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.parse_directive();
            } else if rest.starts_with("</") {
                self.parse_end_tag();
            } else {
                self.parse_open_tag();
            }
        }

        self.flush_text();
        while !self.open.is_empty() {
            self.close_top();
        }
        self.root_list
    }

    /// Creates a node and appends it to the innermost open element
    /// (or the root list).
    fn append_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.doc.push_node(kind);
        match self.open.last_mut() {
            Some(open) => self.doc.append(Some(open.id), &mut open.children, id),
            None => self.doc.append(None, &mut self.root_list, id),
        }
        id
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let data = normalize_whitespace(&self.pending_text);
        self.pending_text.clear();
        self.append_node(NodeKind::Text(data));
    }

    fn close_top(&mut self) {
        if let Some(open) = self.open.pop() {
            self.doc.put_children(open.id, open.children);
        }
    }

    fn parse_comment(&mut self) {
        self.flush_text();
        let start = self.pos;
        self.pos += 4;
        let rest = &self.input[self.pos..];
        let data = match rest.find("-->") {
            Some(end) => {
                self.pos += end + 3;
                rest[..end].to_string()
            }
            None => {
                self.errors.push(ParseError {
                    kind: ParseErrorKind::UnterminatedComment,
                    offset: start,
                });
                self.pos = self.input.len();
                rest.to_string()
            }
        };
        self.append_node(NodeKind::Comment(data));
    }

    fn parse_cdata(&mut self) {
        self.flush_text();
        let start = self.pos;
        let rest = &self.input[self.pos..];
        // data spans from the leading `!` through the closing `]]`
        let data = match rest.find("]]>") {
            Some(end) => {
                self.pos += end + 3;
                rest[1..end + 2].to_string()
            }
            None => {
                self.errors.push(ParseError {
                    kind: ParseErrorKind::UnterminatedCData,
                    offset: start,
                });
                self.pos = self.input.len();
                rest[1..].to_string()
            }
        };
        self.append_node(NodeKind::CData(data));
    }

    fn parse_directive(&mut self) {
        self.flush_text();
        let start = self.pos;
        let rest = &self.input[self.pos..];
        let data = match rest.find('>') {
            Some(end) => {
                self.pos += end + 1;
                rest[1..end].to_string()
            }
            None => {
                self.errors.push(ParseError {
                    kind: ParseErrorKind::UnterminatedDirective,
                    offset: start,
                });
                self.pos = self.input.len();
                rest[1..].to_string()
            }
        };
        self.append_node(NodeKind::Directive(data));
    }

    fn parse_end_tag(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let name = self.read_name();
        match self.input[self.pos..].find('>') {
            Some(end) => self.pos += end + 1,
            None => self.pos = self.input.len(),
        }

        // Close the nearest matching open element, implicitly closing
        // everything nested inside it. Name comparison is verbatim.
        let matching = self
            .open
            .iter()
            .rposition(|open| self.doc.element(open.id).is_some_and(|el| el.name == name));
        match matching {
            Some(depth) => {
                self.flush_text();
                while self.open.len() > depth {
                    self.close_top();
                }
            }
            None => {
                debug!("ignoring stray end tag </{}>", name);
                self.errors.push(ParseError {
                    kind: ParseErrorKind::StrayEndTag(name),
                    offset: start,
                });
            }
        }
    }

    fn parse_open_tag(&mut self) {
        self.flush_text();
        let start = self.pos;
        self.pos += 1;
        let name = self.read_name();

        let mut attributes: Vec<Attribute> = Vec::new();
        loop {
            self.skip_space_and_slashes();
            match self.peek() {
                None => {
                    self.errors.push(ParseError {
                        kind: ParseErrorKind::UnterminatedTag,
                        offset: start,
                    });
                    break;
                }
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    let attr_name = self.read_attr_name();
                    if attr_name.is_empty() {
                        // Junk byte where a name should start; step over it.
                        if let Some(ch) = self.peek() {
                            self.pos += ch.len_utf8();
                        }
                        continue;
                    }
                    self.skip_space();
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.skip_space();
                        self.read_attr_value(start)
                    } else {
                        String::new()
                    };
                    // Mapping semantics: first position wins, last value wins
                    match attributes.iter_mut().find(|attr| attr.name == attr_name) {
                        Some(existing) => existing.value = value,
                        None => attributes.push(Attribute {
                            name: attr_name,
                            value,
                        }),
                    }
                }
            }
        }

        let kind = if name.eq_ignore_ascii_case("script") {
            ElementKind::Script
        } else if name.eq_ignore_ascii_case("style") {
            ElementKind::Style
        } else {
            ElementKind::Normal
        };
        let raw_text_name = (kind != ElementKind::Normal).then(|| name.clone());

        let id = self.append_node(NodeKind::Element(Element {
            name,
            attributes,
            children: Vec::new(),
            kind,
        }));
        self.open.push(OpenElement {
            id,
            children: Vec::new(),
        });

        if let Some(name) = raw_text_name {
            self.consume_raw_text(&name);
        }
    }

    /// Script/style content is character data up to the matching end tag,
    /// which is detected case-insensitively and left for the main loop.
    fn consume_raw_text(&mut self, name: &str) {
        let rest = &self.input[self.pos..];
        let needle = format!("</{}", name.to_ascii_lowercase());
        // ASCII lowercasing keeps byte offsets stable
        let haystack = rest.to_ascii_lowercase();

        // The end tag only counts when the name is followed by `>`, `/`,
        // whitespace or end of input; `</scripty>` is still raw text.
        let mut search = 0;
        let end = loop {
            let Some(found) = haystack[search..].find(&needle) else {
                break rest.len();
            };
            let at = search + found;
            match haystack.as_bytes().get(at + needle.len()).copied() {
                None | Some(b'>') | Some(b'/') => break at,
                Some(byte) if byte.is_ascii_whitespace() => break at,
                _ => search = at + needle.len(),
            }
        };

        if end > 0 {
            self.pending_text.push_str(&rest[..end]);
        }
        self.pos += end;
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_space(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Stray `/` between attributes is ignored, which is exactly what
    /// "self-closing recognition disabled" means for `<br/>`.
    fn skip_space_and_slashes(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() && ch != '/' {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '/' || ch == '>' {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.input[start..self.pos].to_string()
    }

    fn read_attr_name(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '=' || ch == '/' || ch == '>' {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.input[start..self.pos].to_string()
    }

    fn read_attr_value(&mut self, tag_start: usize) -> String {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let rest = &self.input[self.pos..];
                match rest.find(quote) {
                    Some(end) => {
                        self.pos += end + 1;
                        rest[..end].to_string()
                    }
                    None => {
                        self.errors.push(ParseError {
                            kind: ParseErrorKind::UnterminatedTag,
                            offset: tag_start,
                        });
                        self.pos = self.input.len();
                        rest.to_string()
                    }
                }
            }
            _ => {
                let start = self.pos;
                while let Some(ch) = self.peek() {
                    if ch.is_whitespace() || ch == '>' {
                        break;
                    }
                    self.pos += ch.len_utf8();
                }
                self.input[start..self.pos].to_string()
            }
        }
    }
}

/// Finds the next `<` that actually starts markup; anything else is text.
fn find_construct(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    for (index, &byte) in bytes.iter().enumerate() {
        if byte != b'<' {
            continue;
        }
        if let Some(&next) = bytes.get(index + 1) {
            if next.is_ascii_alphabetic() || next == b'/' || next == b'!' || next == b'?' {
                return Some(index);
            }
        }
    }
    None
}

fn normalize_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}
