use std::ops::Range;

use bindify_core::escape_regexp;
use regex::Regex;
use smallvec::SmallVec;

use crate::error::TransformError;

/// Alternating `[literal, expression, literal, …]` runs of one string.
/// Length 1 means the string carries no binding inserts at all.
pub type SplitPieces<'a> = SmallVec<[&'a str; 8]>;

/// Matches one binding insert: open delimiter, optional whitespace, a
/// non-empty expression body starting with non-whitespace, optional
/// whitespace, close delimiter. The body never spans lines.
pub struct BindingScanner {
    re_binding_insert: Regex,
}

impl BindingScanner {
    pub fn new(binding_delimiters: &(String, String)) -> Result<Self, TransformError> {
        let re_binding_insert = Regex::new(&format!(
            r"{}\s*(\S.*?)\s*{}",
            escape_regexp(&binding_delimiters.0),
            escape_regexp(&binding_delimiters.1)
        ))?;
        Ok(BindingScanner { re_binding_insert })
    }

    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.re_binding_insert.is_match(text)
    }

    /// Byte range of the first binding insert, delimiters included.
    pub fn first_match_range(&self, text: &str) -> Option<Range<usize>> {
        self.re_binding_insert.find(text).map(|m| m.range())
    }

    /// Splits into alternating literal/expression runs. Expression pieces
    /// are the trimmed bodies; literal pieces may be empty.
    pub fn split<'a>(&self, text: &'a str) -> SplitPieces<'a> {
        let mut pieces = SplitPieces::new();
        let mut last = 0;
        for caps in self.re_binding_insert.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let expr = caps.get(1).map_or("", |m| m.as_str());
            pieces.push(&text[last..whole.start()]);
            pieces.push(expr);
            last = whole.end();
        }
        pieces.push(&text[last..]);
        pieces
    }
}

/// Output of expression synthesis for one attribute value or text run.
pub struct SynthesizedBinding {
    /// `+`-joined expression, ready to sit inside a double-quoted attribute.
    pub binding_expr: String,
    /// The run with every expression re-wrapped in the template delimiters.
    pub new_data: String,
}

/// Builds the binding expression and the rewritten literal content from the
/// alternating pieces of [`BindingScanner::split`].
pub fn synthesize(
    pieces: &[&str],
    template_delimiters: &(String, String),
    expression_root: &str,
) -> SynthesizedBinding {
    let mut expr_parts: SmallVec<[String; 8]> = SmallVec::new();
    let mut new_data = String::new();

    for (index, piece) in pieces.iter().enumerate() {
        if index % 2 == 1 {
            expr_parts.push(format!("{}.{}", expression_root, piece));
            new_data.push_str(&template_delimiters.0);
            new_data.push_str(piece);
            new_data.push_str(&template_delimiters.1);
        } else if !piece.is_empty() {
            expr_parts.push(format!("'{}'", escape_string_literal(piece)));
            new_data.push_str(piece);
        } else if index == 2 && index + 1 < pieces.len() {
            // Two expressions with nothing between them: an explicit empty
            // literal keeps the `+` arity. Fixed rule, index 2 only.
            expr_parts.push("''".to_string());
        }
    }

    SynthesizedBinding {
        binding_expr: expr_parts.join("+").replace('"', "&quot;"),
        new_data,
    }
}

fn escape_string_literal(piece: &str) -> String {
    piece
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}
