//! The stack of currently-open element names and the ancestry predicates
//! that disambiguate identically-named elements by context.

use crate::error::{Error, Result};

/// Elements that an ancestry walk may look through. A `text-author` nested in
/// a `<p>` inside an epigraph still belongs to the epigraph; a `section`
/// boundary does not.
const PASS_THROUGH: [&str; 4] = ["p", "emphasis", "text-author", "strong"];

/// Ordered names of the currently-open elements, document root first.
///
/// Depth always equals the nesting depth of the tokenizer's position: every
/// start tag pushes, every end tag pops, and a pop that does not match the
/// top is malformed input.
#[derive(Debug, Default)]
pub struct ContextStack {
    tags: Vec<String>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self {
            tags: Vec::with_capacity(10),
        }
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Pop the innermost element, failing if `name` does not match it.
    pub fn pop(&mut self, name: &str) -> Result<()> {
        match self.tags.pop() {
            Some(top) if top == name => Ok(()),
            Some(top) => Err(Error::MalformedInput(format!(
                "closing tag </{name}> does not match open element <{top}>"
            ))),
            None => Err(Error::MalformedInput(format!(
                "closing tag </{name}> with no open element"
            ))),
        }
    }

    pub fn depth(&self) -> usize {
        self.tags.len()
    }

    /// Whether the nearest non-pass-through ancestor is `section_name`.
    ///
    /// Walks from the innermost element outward, looking through the
    /// pass-through wrappers (`p`, `emphasis`, `text-author`, `strong`); the
    /// walk stops as soon as it meets anything else that is not the target.
    pub fn is_inside(&self, section_name: &str) -> bool {
        for tag in self.tags.iter().rev() {
            if tag == section_name {
                return true;
            }
            if !PASS_THROUGH.contains(&tag.as_str()) {
                break;
            }
        }
        false
    }

    /// Whether the position is inside the metadata region
    /// (`FictionBook/description/title-info`).
    pub fn is_in_book_info(&self) -> bool {
        self.tags.len() >= 3
            && self.tags[0] == "FictionBook"
            && self.tags[1] == "description"
            && self.tags[2] == "title-info"
    }

    /// Whether the position is inside the body region (`FictionBook/body`).
    pub fn is_in_book_content(&self) -> bool {
        self.tags.len() >= 2 && self.tags[0] == "FictionBook" && self.tags[1] == "body"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(tags: &[&str]) -> ContextStack {
        let mut s = ContextStack::new();
        for tag in tags {
            s.push(*tag);
        }
        s
    }

    #[test]
    fn test_pop_matching() {
        let mut s = stack(&["FictionBook", "body"]);
        assert!(s.pop("body").is_ok());
        assert!(s.pop("FictionBook").is_ok());
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_pop_mismatch() {
        let mut s = stack(&["FictionBook", "body", "p"]);
        let err = s.pop("body").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_pop_empty() {
        let mut s = ContextStack::new();
        assert!(matches!(s.pop("p"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_is_inside_direct_and_through_wrappers() {
        assert!(stack(&["FictionBook", "body", "epigraph", "p"]).is_inside("epigraph"));
        assert!(
            stack(&["FictionBook", "body", "epigraph", "p", "emphasis"]).is_inside("epigraph")
        );
        assert!(stack(&["FictionBook", "body", "epigraph", "text-author"]).is_inside("epigraph"));
        assert!(stack(&["FictionBook", "body", "title", "p", "strong"]).is_inside("title"));
    }

    #[test]
    fn test_is_inside_blocked_by_non_pass_through() {
        // section is not a pass-through element
        assert!(!stack(&["FictionBook", "body", "epigraph", "section"]).is_inside("epigraph"));
        assert!(!stack(&["FictionBook", "body", "section", "p"]).is_inside("epigraph"));
        assert!(!ContextStack::new().is_inside("epigraph"));
    }

    #[test]
    fn test_is_in_book_info() {
        assert!(stack(&["FictionBook", "description", "title-info"]).is_in_book_info());
        assert!(stack(&["FictionBook", "description", "title-info", "author"]).is_in_book_info());
        assert!(!stack(&["FictionBook", "description"]).is_in_book_info());
        assert!(!stack(&["FictionBook", "description", "document-info"]).is_in_book_info());
    }

    #[test]
    fn test_is_in_book_content() {
        assert!(stack(&["FictionBook", "body"]).is_in_book_content());
        assert!(stack(&["FictionBook", "body", "section", "p"]).is_in_book_content());
        assert!(!stack(&["FictionBook"]).is_in_book_content());
        assert!(!stack(&["FictionBook", "description", "title-info"]).is_in_book_content());
    }
}
