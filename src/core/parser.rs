//! A stack-machine based fragment parser.
//!
//! A text is a named fragment when it sits between a
//! `// BEGIN FRAGMENT: <name>` line and a `// END FRAGMENT` line (`#` works
//! as well, and further comment prefixes can be configured). Markers are
//! case-sensitive and may appear after code on the same line.
//!
//! Fragments may be nested; the inner marker lines are removed from the
//! outer text. Lines between `// BEGIN ESCAPE` and `// END ESCAPE` are
//! excluded from every fragment.
//!
//! ```
//! use fragx::FragmentParser;
//!
//! let text = "// BEGIN FRAGMENT: test\nHello.\n// END FRAGMENT";
//! let fragments = FragmentParser::new(text).map_fragments().unwrap();
//! assert_eq!(fragments["test"], "Hello.");
//! ```

use crate::core::text::{clear_indentation, trim_empty_lines};
use crate::domain::model::{FragmentMap, FragmentSection, MarkerKind};
use crate::utils::error::{FragmentError, Result};
use regex::Regex;
use std::collections::BTreeSet;

pub const DEFAULT_COMMENT_PREFIXES: &[&str] = &["//", "#"];

const NAME_PATTERN: &str = r"[A-Za-z0-9_\-]+";

pub fn is_valid_fragment_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// The comment prefixes markers are recognised after.
#[derive(Debug, Clone)]
pub struct MarkerSyntax {
    begin_fragment: Regex,
    end_fragment: Regex,
    begin_escape: Regex,
    end_escape: Regex,
}

impl MarkerSyntax {
    pub fn new<S: AsRef<str>>(comment_prefixes: &[S]) -> Result<Self> {
        if comment_prefixes.is_empty() {
            return Err(FragmentError::MissingConfigError {
                field: "comment_prefixes".to_string(),
            });
        }
        let alternatives = comment_prefixes
            .iter()
            .map(|p| regex::escape(p.as_ref().trim()))
            .collect::<Vec<_>>()
            .join("|");

        let build = |body: &str| {
            Regex::new(&format!(r"(?:{}) {}", alternatives, body)).map_err(|e| {
                FragmentError::ConfigError {
                    message: format!("Invalid comment prefix: {}", e),
                }
            })
        };

        Ok(Self {
            begin_fragment: build(&format!(r"BEGIN FRAGMENT: ({})", NAME_PATTERN))?,
            end_fragment: build("END FRAGMENT")?,
            begin_escape: build("BEGIN ESCAPE")?,
            end_escape: build("END ESCAPE")?,
        })
    }

    /// When one line carries several markers the strongest wins, in the
    /// order END ESCAPE, BEGIN ESCAPE, END FRAGMENT, BEGIN FRAGMENT.
    pub fn detect_line_type(&self, line: &str) -> Option<MarkerKind> {
        if self.end_escape.is_match(line) {
            return Some(MarkerKind::EndEscape);
        }
        if self.begin_escape.is_match(line) {
            return Some(MarkerKind::BeginEscape);
        }
        if self.end_fragment.is_match(line) {
            return Some(MarkerKind::EndFragment);
        }
        self.begin_fragment
            .captures(line)
            .map(|caps| MarkerKind::BeginFragment(caps[1].to_string()))
    }
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        // the default prefixes are plain literals, so this cannot fail
        Self::new(DEFAULT_COMMENT_PREFIXES).expect("default marker syntax is valid")
    }
}

/// Output of one pass of the stack machine.
#[derive(Debug, Default)]
struct Scan {
    sections: Vec<FragmentSection>,
    excluded: BTreeSet<usize>,
}

pub struct FragmentParser<'a> {
    lines: Vec<&'a str>,
    syntax: MarkerSyntax,
}

impl<'a> FragmentParser<'a> {
    pub fn new(content: &'a str) -> Self {
        Self::with_syntax(content, MarkerSyntax::default())
    }

    pub fn with_syntax(content: &'a str, syntax: MarkerSyntax) -> Self {
        Self {
            lines: content.lines().collect(),
            syntax,
        }
    }

    pub fn detect_line_type(&self, line: &str) -> Option<MarkerKind> {
        self.syntax.detect_line_type(line)
    }

    /// Text of lines `start..end` minus the excluded ones, trimmed and
    /// de-indented. `None` when nothing is left.
    pub fn retrieve_text_section(
        &self,
        start: usize,
        end: usize,
        excluded: &BTreeSet<usize>,
    ) -> Option<String> {
        if end <= start {
            return None;
        }
        let kept: Vec<&str> = (start..end.min(self.lines.len()))
            .filter(|id| !excluded.contains(id))
            .map(|id| self.lines[id])
            .collect();

        let text = clear_indentation(trim_empty_lines(&kept)).join("\n");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn line_content(&self, line_id: usize) -> String {
        self.lines.get(line_id).copied().unwrap_or_default().to_string()
    }

    fn scan(&self) -> Result<Scan> {
        let mut fragment_stack: Vec<(usize, String)> = Vec::new();
        let mut escape_stack: Vec<usize> = Vec::new();
        let mut scan = Scan::default();

        for (line_id, line) in self.lines.iter().enumerate() {
            let Some(kind) = self.detect_line_type(line) else {
                continue;
            };
            match kind {
                MarkerKind::BeginFragment(name) => {
                    fragment_stack.push((line_id, name));
                    scan.excluded.insert(line_id);
                }
                MarkerKind::EndFragment => {
                    let (begin_line, name) =
                        fragment_stack
                            .pop()
                            .ok_or_else(|| FragmentError::UnmatchedEndFragment {
                                line: line_id + 1,
                                content: self.line_content(line_id),
                            })?;
                    scan.excluded.insert(line_id);
                    scan.sections.push(FragmentSection {
                        name,
                        begin_line,
                        end_line: line_id,
                    });
                }
                MarkerKind::BeginEscape => {
                    escape_stack.push(line_id);
                    scan.excluded.insert(line_id);
                }
                MarkerKind::EndEscape => {
                    let begin_line =
                        escape_stack
                            .pop()
                            .ok_or_else(|| FragmentError::UnmatchedEndEscape {
                                line: line_id + 1,
                                content: self.line_content(line_id),
                            })?;
                    scan.excluded.extend(begin_line..=line_id);
                }
            }
        }

        // report the outermost marker that was never closed
        if let Some((line_id, _)) = fragment_stack.first() {
            return Err(FragmentError::UnclosedFragment {
                line: line_id + 1,
                content: self.line_content(*line_id),
            });
        }
        if let Some(line_id) = escape_stack.first() {
            return Err(FragmentError::UnclosedEscape {
                line: line_id + 1,
                content: self.line_content(*line_id),
            });
        }

        Ok(scan)
    }

    /// Closed fragments in the order their END markers appear.
    pub fn sections(&self) -> Result<Vec<FragmentSection>> {
        Ok(self.scan()?.sections)
    }

    /// Every non-empty fragment with its rendered text.
    pub fn extract(&self) -> Result<Vec<(FragmentSection, String)>> {
        let scan = self.scan()?;
        Ok(scan
            .sections
            .into_iter()
            .filter_map(|section| {
                self.retrieve_text_section(section.begin_line + 1, section.end_line, &scan.excluded)
                    .map(|text| (section, text))
            })
            .collect())
    }

    /// Fragment name to text. A later fragment with the same name wins.
    pub fn map_fragments(&self) -> Result<FragmentMap> {
        Ok(self
            .extract()?
            .into_iter()
            .map(|(section, text)| (section.name, text))
            .collect())
    }

    pub fn fragment(&self, name: &str) -> Result<Option<String>> {
        Ok(self.map_fragments()?.remove(name))
    }
}
