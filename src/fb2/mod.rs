//! FB2 document parsing: the tag-context stack, the streaming transducer,
//! and file/archive handling.

mod context;
mod parser;
mod reader;

pub use parser::parse_str;
pub use reader::parse_file;

/// Starts a line: a new section begins.
pub const SECTION_MARKER: &str = "{{section}}";
/// Starts a line: a title line. Several may appear in a row.
pub const TITLE_MARKER: &str = "{{title}}";
/// Starts a line: an epigraph line.
pub const EPIGRAPH_MARKER: &str = "{{epi}}";
/// Starts a line: attribution of an epigraph.
pub const EPIGRAPH_AUTHOR_MARKER: &str = "{{epiauth}}";
/// Inline: an emphasized span begins. Maps both `<emphasis>` and `<strong>`.
pub const EMPHASIS_ON: &str = "{{emon}}";
/// Inline: an emphasized span ends.
pub const EMPHASIS_OFF: &str = "{{emoff}}";
