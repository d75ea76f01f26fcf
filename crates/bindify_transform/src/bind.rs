use std::fmt;

use bindify_core::{Attribute, Element};

/// Where a synthesized expression binds on its anchor element. Rendered as
/// the handler keyword of one `handler:expr` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    /// The element's value, for an attribute literally named `value`
    Value,
    /// Any other attribute, by name
    Attr(String),
    /// Text content of the anchor itself
    Text,
    /// First text position inside the anchor
    TextFirst,
    /// Text following the anchor
    TextNext,
    /// Text preceding the anchor
    TextPrev,
}

impl fmt::Display for BindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindTarget::Value => f.write_str("value"),
            BindTarget::Attr(name) => write!(f, "attr({})", name),
            BindTarget::Text => f.write_str("text"),
            BindTarget::TextFirst => f.write_str("text(first)"),
            BindTarget::TextNext => f.write_str("text(next)"),
            BindTarget::TextPrev => f.write_str("text(prev)"),
        }
    }
}

/// Appends one `handler:expr` declaration to the element's binding
/// attribute. Existing content is trimmed and kept, comma-separated;
/// declarations are only ever appended, never merged or deduplicated. The
/// attribute is created at the end of the ordered list when absent.
pub fn append_declaration(
    element: &mut Element,
    bind_attribute_name: &str,
    target: &BindTarget,
    binding_expr: &str,
) {
    let declaration = format!("{}:{}", target, binding_expr);
    match element
        .attributes
        .iter_mut()
        .find(|attr| attr.name == bind_attribute_name)
    {
        Some(attr) => {
            let existing = std::mem::take(&mut attr.value);
            let existing = existing.trim();
            attr.value = if existing.is_empty() {
                declaration
            } else {
                format!("{},{}", existing, declaration)
            };
        }
        None => element.attributes.push(Attribute {
            name: bind_attribute_name.to_string(),
            value: declaration,
        }),
    }
}
