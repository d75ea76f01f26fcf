/// Recoverable parsing anomaly. The tree builder never fails outright; it
/// records what it glossed over and keeps going.
#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the input where the anomaly starts.
    pub offset: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// End tag with no matching open element, e.g. `</div>` at top level
    StrayEndTag(String),
    /// `<!--` without a closing `-->`
    UnterminatedComment,
    /// `<![CDATA[` without a closing `]]>`
    UnterminatedCData,
    /// `<!` or `<?` without a closing `>`
    UnterminatedDirective,
    /// Input ends inside a starting tag
    UnterminatedTag,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ParseError {}
