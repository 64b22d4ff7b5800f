use std::borrow::Cow;

use crate::config::ExtractorConfig;
use crate::error::{Chainable, Result};
use crate::format::{Format, Yaml};
use crate::record::RawFrontMatter;
use crate::util::decode_entities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeBlock,
    InBlock,
    AfterBlock,
}

/// Where the front matter of a file is. A block opens at the first line that,
/// trimmed, equals the sentinel and closes at the second; nothing after the
/// closing sentinel is looked at.
///
/// ```text
/// // ---                  <- opens
/// // id: weather          <- candidate
/// // tags:                <- candidate
/// //     - http           <- candidate
/// // ---                  <- closes
/// public static class ... <- body
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterSpan<'a> {
    /// Comment lines seen inside the block, as written.
    pub lines: Vec<&'a str>,
    /// Everything after the closing sentinel line, if the block was closed.
    pub body: Option<&'a str>,
}

impl<'a> FrontMatterSpan<'a> {
    pub fn detect(text: &'a str, config: &ExtractorConfig) -> Self {
        let mut state = State::BeforeBlock;
        let mut span = FrontMatterSpan { lines: vec![], body: None };
        let mut offset = 0;

        for raw in text.split_inclusive('\n') {
            offset += raw.len();
            let line = raw.trim_end_matches(&['\n', '\r'][..]);
            let sentinel = line.trim() == config.sentinel;

            state = match (state, sentinel) {
                (State::BeforeBlock, true) => State::InBlock,
                (State::BeforeBlock, false) => State::BeforeBlock,
                (State::InBlock, true) => {
                    span.body = Some(&text[offset..]);
                    State::AfterBlock
                }
                (State::InBlock, false) => {
                    if line.trim_start().starts_with(&*config.comment) {
                        span.lines.push(line);
                    }

                    State::InBlock
                }
                (State::AfterBlock, _) => State::AfterBlock,
            };

            if state == State::AfterBlock {
                break;
            }
        }

        span
    }

    /// The candidate lines with their comment markers removed, joined into a
    /// single YAML document.
    pub fn block(&self, comment: &str) -> String {
        self.lines.iter()
            .map(|line| uncomment(line, comment))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Decodes the block. A blank block decodes to empty front matter.
    pub fn decode(&self, comment: &str) -> Result<RawFrontMatter> {
        let block = self.block(comment);
        if block.trim().is_empty() {
            return Ok(RawFrontMatter::default());
        }

        Yaml::from_str::<Option<RawFrontMatter>>(&block)
            .map(Option::unwrap_or_default)
            .chain(error!("malformed front matter"))
    }
}

/// Removes the comment marker. A remainder starting with a space is kept as
/// is, since that space may be YAML indentation; any other remainder is
/// trimmed.
fn uncomment<'a>(line: &'a str, comment: &str) -> &'a str {
    let rest = line.trim_start()
        .strip_prefix(comment)
        .unwrap_or(line);

    if rest.starts_with(' ') {
        rest
    } else {
        rest.trim()
    }
}

/// The text to present for a file: the part after the front matter (or all of
/// it, without a closed block), trimmed, with entities decoded.
pub fn display_code<'a>(text: &'a str, config: &ExtractorConfig) -> Cow<'a, str> {
    let span = FrontMatterSpan::detect(text, config);
    decode_entities(span.body.unwrap_or(text).trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> FrontMatterSpan<'_> {
        FrontMatterSpan::detect(text, &ExtractorConfig::default())
    }

    const SAMPLE: &str = "\
// ---
// id: sample-one
// tags:
//     - alpha
//     - beta
// ---
using System;

public static class Server { }
";

    #[test]
    fn finds_block_between_sentinels() {
        let span = detect(SAMPLE);
        assert_eq!(span.lines.len(), 4);
        assert_eq!(span.body, Some("using System;\n\npublic static class Server { }\n"));
        assert_eq!(span.block("//"), " id: sample-one\n tags:\n     - alpha\n     - beta");
    }

    #[test]
    fn decodes_indented_sequences() {
        let raw = detect(SAMPLE).decode("//").unwrap();
        assert_eq!(raw.id.as_deref(), Some("sample-one"));
        assert_eq!(raw.tags, Some(vec!["alpha".to_string(), "beta".to_string()]));
    }

    #[test]
    fn sentinel_may_be_indented_and_crlf_terminated() {
        let text = "  // ---  \r\n// id: crlf\r\n// ---\r\nbody\r\n";
        let span = detect(text);
        assert_eq!(span.lines, ["// id: crlf"]);
        assert_eq!(span.body, Some("body\r\n"));
    }

    #[test]
    fn only_comment_lines_are_candidates() {
        let text = "// ---\n// id: a\nnot a comment\n\n    // name: b\n// ---\n";
        let span = detect(text);
        assert_eq!(span.lines, ["// id: a", "    // name: b"]);

        let raw = span.decode("//").unwrap();
        assert_eq!(raw.id.as_deref(), Some("a"));
        assert_eq!(raw.name.as_deref(), Some("b"));
    }

    #[test]
    fn lines_after_closing_sentinel_are_ignored() {
        let text = "// ---\n// id: a\n// ---\n// ---\n// id: b\n// ---\n";
        let span = detect(text);
        assert_eq!(span.lines, ["// id: a"]);
        assert_eq!(span.body, Some("// ---\n// id: b\n// ---\n"));
    }

    #[test]
    fn unclosed_block_keeps_candidates_but_has_no_body() {
        let text = "// ---\n// id: open\nclass X {}\n// trailing\n";
        let span = detect(text);
        assert_eq!(span.lines, ["// id: open", "// trailing"]);
        assert_eq!(span.body, None);
    }

    #[test]
    fn no_sentinel_means_no_block() {
        let span = detect("// id: nope\nclass X {}\n");
        assert!(span.lines.is_empty());
        assert_eq!(span.body, None);
        assert_eq!(span.decode("//").unwrap(), RawFrontMatter::default());
    }

    #[test]
    fn uncomment_rules() {
        assert_eq!(uncomment("// id: x", "//"), " id: x");
        assert_eq!(uncomment("//id: x  ", "//"), "id: x");
        assert_eq!(uncomment("//     - alpha", "//"), "     - alpha");
        assert_eq!(uncomment("//", "//"), "");
        assert_eq!(uncomment("//\t", "//"), "");
        assert_eq!(uncomment("  //x", "//"), "x");
    }

    #[test]
    fn blank_and_comment_only_blocks_are_empty() {
        let span = detect("// ---\n//\n//   \n// ---\n");
        assert_eq!(span.decode("//").unwrap(), RawFrontMatter::default());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let span = detect("// ---\n// id: [unclosed\n// ---\n");
        let error = span.decode("//").unwrap_err();
        assert_eq!(error.message(), "malformed front matter");
    }

    #[test]
    fn display_code_strips_block_and_decodes() {
        let text = "// ---\n// id: x\n// ---\n\n  if (a &lt; b &amp;&amp; c) {}\n\n";
        assert_eq!(display_code(text, &ExtractorConfig::default()), "if (a < b && c) {}");
    }

    #[test]
    fn display_code_without_closed_block_is_whole_text() {
        let config = ExtractorConfig::default();
        let text = "\n// ---\n// id: x\nclass X {}\n";
        assert_eq!(display_code(text, &config), "// ---\n// id: x\nclass X {}");
    }
}
