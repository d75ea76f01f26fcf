use bindify_core::escape_regexp;
use log::trace;
use regex::Regex;

use crate::error::TransformError;

const TRACE_PREFIX: &str = "bindify_";

/// Takes template inserts out of the way of the rest of the pipeline.
///
/// Every insert is replaced with a freshly minted trace token before
/// parsing and put back verbatim after serialization, so the parser and the
/// binding passes never see delimiter soup that is none of their business.
/// State is per invocation: the counter and registry grow against one
/// markup string only.
pub struct TemplateInsertProtector {
    re_template_insert: Regex,
    counter: u64,
    /// Ordered (trace, insert) registry. Tokens are mutually unique but not
    /// prefix-free: an early token can be a strict prefix of a later one.
    inserts: Vec<(String, String)>,
    traces_pattern: Option<Regex>,
}

impl TemplateInsertProtector {
    pub fn new(template_delimiters: &(String, String)) -> Result<Self, TransformError> {
        let re_template_insert = Regex::new(&format!(
            r"{}[\s\S]*?{}",
            escape_regexp(&template_delimiters.0),
            escape_regexp(&template_delimiters.1)
        ))?;
        Ok(TemplateInsertProtector {
            re_template_insert,
            counter: 0,
            inserts: Vec::new(),
            traces_pattern: None,
        })
    }

    /// Replaces every template insert with a trace token. A candidate token
    /// is regenerated for as long as it occurs anywhere in the markup being
    /// scanned, which rules out collision with literal user content that
    /// merely looks like a token.
    pub fn protect(&mut self, html: &str) -> Result<String, TransformError> {
        let mut counter = self.counter;
        let mut inserts = std::mem::take(&mut self.inserts);

        let protected = self
            .re_template_insert
            .replace_all(html, |caps: &regex::Captures| {
                let trace = loop {
                    counter += 1;
                    let candidate = format!("{}{}", TRACE_PREFIX, counter);
                    if !html.contains(&candidate) {
                        break candidate;
                    }
                };
                inserts.push((trace.clone(), caps[0].to_string()));
                trace
            })
            .into_owned();

        self.counter = counter;
        self.inserts = inserts;
        trace!("protected {} template inserts", self.inserts.len());

        self.traces_pattern = if self.inserts.is_empty() {
            None
        } else {
            let alternation = self
                .inserts
                .iter()
                .map(|(trace, _)| trace.as_str())
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };

        Ok(protected)
    }

    /// Alternation of all live tokens; `None` when nothing was protected,
    /// meaning no text can still contain a protected placeholder.
    pub fn traces_pattern(&self) -> Option<&Regex> {
        self.traces_pattern.as_ref()
    }

    /// Puts every insert back, replacing all occurrences of its token.
    /// Restoration walks the registry newest-first: `bindify_1` is a strict
    /// prefix of `bindify_10`, so the longer, later-minted tokens must be
    /// replaced before the shorter ones eat them.
    pub fn restore(&self, html: String) -> String {
        let mut html = html;
        for (trace, insert) in self.inserts.iter().rev() {
            html = html.replace(trace, insert);
        }
        html
    }
}
