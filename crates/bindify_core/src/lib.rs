mod dom;
mod options;
mod regex_utils;
mod self_closing_tags;

pub use dom::*;
pub use options::TransformOptions;
pub use regex_utils::escape_regexp;
pub use self_closing_tags::is_self_closing_tag;
