//! Error types for fb2text operations.

use thiserror::Error;

/// Errors that can occur while locating or parsing an FB2 document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The source cannot be opened or contains no recognizable FB2 document.
    /// [`parse_file`](crate::parse_file) swallows this condition and returns
    /// an empty result instead of failing.
    #[error("input unavailable: {0}")]
    InputUnavailable(String),

    /// A closing tag did not match the innermost open element. The tag stack
    /// drives every context decision, so parsing cannot continue past this.
    #[error("malformed FB2: {0}")]
    MalformedInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
