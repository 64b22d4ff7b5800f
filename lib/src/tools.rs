use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ExtractorConfig;
use crate::record::ToolDescriptor;

static DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Description\("([^"]+)"\)"#).expect("description pattern")
});

static SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"public\s+static\s+(?:async\s+)?[\w.<>\[\]?, ]+?\s+(\w+)\s*\(")
        .expect("signature pattern")
});

/// Finds tool declarations anywhere in a source file:
///
/// ```text
/// [McpServerTool, Description("Echoes the message back.")]
/// public static string Echo(string message) => message;
/// ```
///
/// A line with the tool marker and a `Description("...")` puts the scanner in
/// the `SawAttribute` state for the next `lookahead` lines. The first of those
/// lines with a `public static` method signature emits a descriptor. Every
/// attribute line gets its own window, so windows may overlap.
#[derive(Debug, Clone, Copy)]
pub struct ToolScanner<'c> {
    marker: &'c str,
    lookahead: usize,
}

#[derive(Debug)]
struct SawAttribute<'a> {
    description: &'a str,
    remaining: usize,
}

impl<'c> ToolScanner<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        ToolScanner { marker: &config.tool_marker, lookahead: config.lookahead }
    }

    pub fn scan(&self, text: &str) -> Vec<ToolDescriptor> {
        let mut tools = vec![];
        let mut pending: Vec<SawAttribute<'_>> = vec![];

        for line in text.lines() {
            if !pending.is_empty() {
                let method = method_name(line);
                pending.retain_mut(|attr| match method {
                    Some(name) => {
                        tools.push(ToolDescriptor {
                            name: name.into(),
                            description: attr.description.into(),
                        });

                        false
                    }
                    None => {
                        attr.remaining -= 1;
                        attr.remaining > 0
                    }
                });
            }

            if let Some(description) = self.attribute(line) {
                if self.lookahead > 0 {
                    pending.push(SawAttribute { description, remaining: self.lookahead });
                }
            }
        }

        tools
    }

    /// The description of the tool attribute on `line`, if there is one.
    fn attribute<'a>(&self, line: &'a str) -> Option<&'a str> {
        if !line.contains(self.marker) || !line.contains("Description(") {
            return None;
        }

        DESCRIPTION.captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

fn method_name(line: &str) -> Option<&str> {
    SIGNATURE.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
