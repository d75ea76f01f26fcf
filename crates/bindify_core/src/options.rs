/// Configuration of the binding transform.
///
/// `Default` is the explicit defaults record; unset fields of a caller's
/// configuration are simply the struct defaults (struct-update syntax works
/// well here):
///
/// ```
/// use bindify_core::TransformOptions;
///
/// let options = TransformOptions {
///     xhtml_mode: true,
///     ..TransformOptions::default()
/// };
/// assert_eq!(options.bind_attribute_name, "data-bind");
/// ```
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Name of the attribute accumulating binding declarations.
    pub bind_attribute_name: String,
    /// Attributes never scanned for binding inserts. The binding attribute
    /// itself is always skipped, whether listed here or not.
    pub skip_attributes: Vec<String>,
    /// Delimiters of template inserts, opaque to the transform.
    pub template_delimiters: (String, String),
    /// Delimiters of binding inserts.
    pub binding_delimiters: (String, String),
    /// Identifier every synthesized expression path is rooted at.
    pub expression_root: String,
    /// Serialize childless void tags as `<br />` instead of `<br>`.
    pub xhtml_mode: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            bind_attribute_name: "data-bind".to_string(),
            skip_attributes: Vec::new(),
            template_delimiters: ("{{".to_string(), "}}".to_string()),
            binding_delimiters: ("{".to_string(), "}".to_string()),
            expression_root: "this".to_string(),
            xhtml_mode: false,
        }
    }
}
