//! The main public crate of the `bindify` project.
//!
//! Rewrites HTML containing template inserts (`{{…}}`, opaque to this
//! transform) and binding inserts (`{…}`, dynamic expressions) into HTML
//! where every dynamic piece is declared through one `data-bind` attribute
//! per anchoring element:
//!
//! ```
//! use bindify::{transform_html, TransformOptions};
//!
//! let html = r#"<div class="x {a} y">{{greeting}}</div>"#;
//! let out = transform_html(html, &TransformOptions::default()).unwrap();
//!
//! assert_eq!(
//!     out,
//!     r#"<div class="x {{a}} y" data-bind="attr(class):'x '+this.a+' y'">{{greeting}}</div>"#
//! );
//! ```

pub use bindify_core::TransformOptions;
pub use bindify_parser::{ParseError, ParseErrorKind};
pub use bindify_transform::TransformError;

/// Transforms one markup string. Pure function of (markup, configuration);
/// every call owns independent state.
pub fn transform_html(html: &str, options: &TransformOptions) -> Result<String, TransformError> {
    bindify_transform::transform(html, options)
}

/// Same as [`transform_html`], additionally collecting the recoverable
/// anomalies the tolerant tree builder glossed over.
pub fn transform_html_with_errors(
    html: &str,
    options: &TransformOptions,
    parse_errors: &mut Vec<ParseError>,
) -> Result<String, TransformError> {
    bindify_transform::transform_with_errors(html, options, parse_errors)
}
