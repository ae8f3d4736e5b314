//! # fb2text
//!
//! A fast, lightweight parser for FB2 (FictionBook 2) ebooks.
//!
//! The parser makes a single streaming pass over the document and produces
//! two things:
//!
//! - [`BookInfo`]: flat metadata (title, authors, sequence, genre, language)
//! - a list of text lines annotated with a small marker vocabulary, ready
//!   for a downstream renderer to wrap, justify, and center
//!
//! Line markers are enclosed in double curly brackets. `{{section}}`,
//! `{{title}}`, `{{epi}}`, and `{{epiauth}}` always start a line; `{{emon}}`
//! and `{{emoff}}` delimit an emphasized span anywhere inside a line; an
//! empty string is a blank line; anything else is a regular paragraph.
//! No wrapping or justification is applied here — the lines are not for
//! immediate display.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fb2text::{parse_file, ParseOptions};
//!
//! // Metadata only: stops as soon as the book body starts
//! let book = parse_file("book.fb2", &ParseOptions::default())?;
//! println!("Title: {}", book.info.title);
//!
//! // Full text: zip/gzip containers and non-UTF-8 encodings are handled
//! let book = parse_file("book.fb2.zip", &ParseOptions::new().with_body())?;
//! for line in &book.lines {
//!     println!("{line}");
//! }
//! # Ok::<(), fb2text::Error>(())
//! ```
//!
//! Already-decoded documents can be parsed directly:
//!
//! ```
//! use fb2text::{parse_str, ParseOptions};
//!
//! let doc = "<FictionBook><description><title-info>\
//!            <book-title>Dune</book-title>\
//!            </title-info></description></FictionBook>";
//! let book = parse_str(doc, &ParseOptions::default())?;
//! assert_eq!(book.info.title, "Dune");
//! # Ok::<(), fb2text::Error>(())
//! ```

pub mod book;
pub mod error;
pub mod fb2;
pub mod options;
pub(crate) mod util;

pub use book::{Author, BookInfo, ParsedBook};
pub use error::{Error, Result};
pub use fb2::{parse_file, parse_str};
pub use options::ParseOptions;
