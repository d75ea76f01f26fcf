use phf::phf_set;

/// Tags serialized without a closing counterpart when childless.
/// This table belongs to the serializer only; the parser never consults it.
static SELF_CLOSING_TAGS: phf::Set<&'static str> = phf_set! {
    "area",
    "base",
    "basefont",
    "br",
    "col",
    "command",
    "embed",
    "frame",
    "hr",
    "img",
    "input",
    "isindex",
    "keygen",
    "link",
    "meta",
    "param",
    "source",
    "track",
    "wbr",

    // svg tags
    "circle",
    "ellipse",
    "line",
    "path",
    "polygone",
    "polyline",
    "rect",
    "stop",
    "use",
};

/// Checks the verbatim tag name against the void/self-closing table.
#[inline]
pub fn is_self_closing_tag(tag_name: &str) -> bool {
    SELF_CLOSING_TAGS.contains(tag_name)
}

#[cfg(test)]
mod tests {
    use super::is_self_closing_tag;

    #[test]
    fn knows_html_voids() {
        assert!(is_self_closing_tag("br"));
        assert!(is_self_closing_tag("input"));
        assert!(!is_self_closing_tag("div"));
    }

    #[test]
    fn lookup_is_verbatim() {
        // Tag names are never case-folded anywhere in the pipeline.
        assert!(!is_self_closing_tag("BR"));
    }
}
