mod error;
mod tree_builder;

pub use error::{ParseError, ParseErrorKind};
pub use tree_builder::{parse_document, parse_fragment};
