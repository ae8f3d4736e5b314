//! The streaming transducer: a single pass over the XML event stream that
//! accumulates metadata and annotated text lines.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::book::{Author, ParsedBook};
use crate::error::{Error, Result};
use crate::fb2::context::ContextStack;
use crate::fb2::{
    EMPHASIS_OFF, EMPHASIS_ON, EPIGRAPH_AUTHOR_MARKER, EPIGRAPH_MARKER, SECTION_MARKER,
    TITLE_MARKER,
};
use crate::options::ParseOptions;

/// Parse an already-decoded FB2 document.
///
/// With the default options this stops at the first `<body>` tag and returns
/// metadata only; enable [`ParseOptions::parse_body`] to also collect the
/// annotated text lines.
///
/// Fails with [`Error::MalformedInput`] on a mismatched closing tag: the tag
/// stack drives every context decision, so nothing after a mismatch can be
/// trusted.
pub fn parse_str(document: &str, options: &ParseOptions) -> Result<ParsedBook> {
    let mut reader = Reader::from_str(document);
    // Self-closing tags (<empty-line/>, <sequence .../>) must behave like a
    // start/end pair. Mismatch detection lives in the context stack.
    reader.config_mut().expand_empty_elements = true;
    reader.config_mut().check_end_names = false;

    let mut transducer = Transducer::new(options);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => transducer.start_tag(&e),
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                transducer.end_tag(&name)?;
            }
            Ok(Event::Text(e)) => transducer.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::CData(e)) => transducer.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    transducer.curr_line.push_str(&resolved);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }

        if transducer.done {
            break;
        }
    }

    Ok(transducer.finish())
}

/// Single-pass fold over the token stream. All state lives here: the ancestor
/// stack, the metadata accumulator, the current line buffer, and the emitted
/// lines.
struct Transducer {
    options: ParseOptions,
    stack: ContextStack,
    curr_line: String,
    book: ParsedBook,
    done: bool,
}

impl Transducer {
    fn new(options: &ParseOptions) -> Self {
        Self {
            options: *options,
            stack: ContextStack::new(),
            curr_line: String::new(),
            book: ParsedBook::default(),
            done: false,
        }
    }

    fn finish(self) -> ParsedBook {
        self.book
    }

    /// Handle a start tag. Ancestry checks read the pre-push stack; pushing
    /// the name is always the last step.
    fn start_tag(&mut self, e: &BytesStart) {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        let emit_markers = !self.options.skip_system_lines;

        if !self.options.parse_body && name == "body" {
            // Metadata is fully read by now; skip the entire body.
            self.done = true;
            return;
        }

        if name == "empty-line" && emit_markers {
            self.book.lines.push(String::new());
            self.curr_line.clear();
        } else if name == "section" && emit_markers {
            self.book.lines.push(SECTION_MARKER.to_string());
            self.curr_line.clear();
        } else if (name == "emphasis" || name == "strong") && emit_markers {
            self.curr_line.push_str(EMPHASIS_ON);
        } else if name == "sequence" {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"name" {
                    self.book.info.sequence = String::from_utf8_lossy(&attr.value).into_owned();
                }
            }
        } else {
            if name == "author" && self.stack.is_in_book_info() {
                // Each <author> opens a fresh record; the name tags fill it.
                self.book.info.authors.push(Author::default());
            }

            self.curr_line = if name == "text-author" && self.stack.is_inside("epigraph") {
                EPIGRAPH_AUTHOR_MARKER.to_string()
            } else if name == "p" && self.stack.is_inside("epigraph") {
                EPIGRAPH_MARKER.to_string()
            } else if name == "p" && self.stack.is_inside("title") {
                TITLE_MARKER.to_string()
            } else {
                String::new()
            };
        }

        self.stack.push(name);
    }

    /// Handle an end tag: pop, then route the line buffer by where the
    /// post-pop stack sits.
    fn end_tag(&mut self, name: &str) -> Result<()> {
        self.stack.pop(name)?;

        if self.stack.is_in_book_info() {
            match name {
                "genre" => self.book.info.genre = self.take_line(),
                "first-name" if self.stack.is_inside("author") => {
                    let line = self.take_line();
                    if let Some(author) = self.book.info.authors.last_mut() {
                        author.first_name = line;
                    }
                }
                "last-name" if self.stack.is_inside("author") => {
                    let line = self.take_line();
                    if let Some(author) = self.book.info.authors.last_mut() {
                        author.last_name = line;
                    }
                }
                "book-title" => self.book.info.title = self.take_line(),
                "lang" => self.book.info.language = self.take_line(),
                _ => {}
            }
        } else if self.stack.is_in_book_content() {
            if name == "body" {
                // A nested body is fully consumed; nothing below can add text.
                self.done = true;
            } else if name == "emphasis" || name == "strong" {
                if !self.options.skip_system_lines {
                    self.curr_line.push_str(EMPHASIS_OFF);
                }
            } else {
                if !self.curr_line.is_empty() {
                    let line = self.take_line();
                    self.book.lines.push(line);
                }
                self.curr_line.clear();
            }
        } else {
            // Bibliographic front matter, notes, binaries: nothing to keep.
            self.curr_line.clear();
        }

        Ok(())
    }

    /// Handle a text chunk: whitespace-only runs between tags carry no
    /// content; everything else is collapsed and appended to the line buffer.
    fn text(&mut self, raw: &str) {
        if let Some(normalized) = normalize_text(raw) {
            self.curr_line.push_str(&normalized);
        }
    }

    fn take_line(&mut self) -> String {
        std::mem::take(&mut self.curr_line)
    }
}

/// Collapse newlines and carriage returns to spaces and squeeze runs of
/// spaces down to one. Returns `None` for chunks that are whitespace
/// throughout; partial whitespace adjacent to real text survives as a single
/// space. Idempotent on already-normalized text.
fn normalize_text(raw: &str) -> Option<String> {
    if raw.chars().all(|c| matches!(c, '\n' | '\r' | ' ')) {
        return None;
    }

    let mut out = String::with_capacity(raw.len());
    let mut prev_space = false;
    for c in raw.chars() {
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        if c == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    Some(out)
}

/// Resolve XML entity references (named and numeric).
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_text_collapses_runs() {
        assert_eq!(normalize_text("foo\n  bar"), Some("foo bar".to_string()));
        assert_eq!(normalize_text("a\r\nb"), Some("a b".to_string()));
        assert_eq!(normalize_text(" lead"), Some(" lead".to_string()));
        assert_eq!(normalize_text("trail \n"), Some("trail ".to_string()));
    }

    #[test]
    fn test_normalize_text_drops_pure_whitespace() {
        assert_eq!(normalize_text("\n   \r\n "), None);
        assert_eq!(normalize_text(""), None);
        // Tabs are not in the discard set
        assert_eq!(normalize_text("\t"), Some("\t".to_string()));
    }

    proptest! {
        #[test]
        fn normalize_text_is_idempotent(raw in "[ \r\nа-яa-z.,!?-]{0,64}") {
            if let Some(once) = normalize_text(&raw) {
                prop_assert_eq!(normalize_text(&once), Some(once.clone()));
            }
        }
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp"), Some("&".to_string()));
        assert_eq!(resolve_entity("#65"), Some("A".to_string()));
        assert_eq!(resolve_entity("#x2019"), Some("\u{2019}".to_string()));
        assert_eq!(resolve_entity("nbsp"), None);
    }

    #[test]
    fn test_entity_lands_in_line() {
        let doc = "<FictionBook><body><section><p>Don&apos;t</p></section></body></FictionBook>";
        let book = parse_str(doc, &ParseOptions::new().with_body()).unwrap();
        assert_eq!(book.lines, vec!["{{section}}", "Don't"]);
    }

    #[test]
    fn test_self_closing_empty_line() {
        let doc = "<FictionBook><body><section><p>a</p><empty-line/><p>b</p></section></body></FictionBook>";
        let book = parse_str(doc, &ParseOptions::new().with_body()).unwrap();
        assert_eq!(book.lines, vec!["{{section}}", "a", "", "b"]);
    }
}
