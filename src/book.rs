/// Short information about an FB2 book.
///
/// Only a handful of tags are supported: book title, author names, sequence,
/// genre, and the text language (not the original book language). String
/// fields default to empty; if a tag appears more than once the last
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInfo {
    /// Authors in document order.
    pub authors: Vec<Author>,
    pub title: String,
    pub sequence: String,
    pub language: String,
    pub genre: String,
}

/// A single author record. Either name may stay empty if the source omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// The result of a parse: metadata plus the annotated text lines.
///
/// `lines` is empty when the parse stopped at the body (the default) or when
/// the document has no body text. See the crate docs for the line marker
/// vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBook {
    pub info: BookInfo,
    pub lines: Vec<String>,
}
