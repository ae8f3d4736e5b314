/// Options controlling how much of a document is parsed and what lands in
/// the output lines. Both toggles default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Continue past the metadata region and parse the full text body.
    /// When false (the default) parsing stops at the first `body` start tag,
    /// which makes reading book properties cheap even for large files.
    pub parse_body: bool,

    /// Suppress the `{{section}}` and empty-line structural markers, and the
    /// inline `{{emon}}`/`{{emoff}}` emphasis pair, from the output lines.
    pub skip_system_lines: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the full text body instead of stopping at the metadata.
    pub fn with_body(mut self) -> Self {
        self.parse_body = true;
        self
    }

    /// Omit structural and emphasis markers from the output lines.
    pub fn with_skip_system_lines(mut self) -> Self {
        self.skip_system_lines = true;
        self
    }
}
