//! Properties line parsing
//!
//! A property line has the shape `module.name=value` or `name=value`.
//! The line is split on the first `=` (values may contain `=`), then the
//! key is split on its last `.` (module names may contain `.`).

use serde::{Deserialize, Serialize};

/// Options controlling how property lines are read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Lines starting with any of these prefixes are comments
    pub comment_prefixes: Vec<String>,
    /// Trim surrounding whitespace from lines, keys and values
    pub trim_whitespace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            comment_prefixes: vec!["#".to_string(), "!".to_string()],
            trim_whitespace: true,
        }
    }
}

impl ParseOptions {
    pub fn is_comment(&self, line: &str) -> bool {
        let line = line.trim_start();
        self.comment_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && line.starts_with(prefix.as_str()))
    }

    fn clean<'a>(&self, text: &'a str) -> &'a str {
        if self.trim_whitespace {
            text.trim()
        } else {
            text
        }
    }
}

/// A successfully parsed property line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyLine<'a> {
    /// Empty when the property is unqualified
    pub module: &'a str,
    pub name: &'a str,
    pub value: &'a str,
}

impl PropertyLine<'_> {
    pub fn is_qualified(&self) -> bool {
        !self.module.is_empty()
    }
}

/// Classification of one line of a properties source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Property(PropertyLine<'a>),
    Malformed,
}

/// Classify a raw line from a properties source
pub fn classify_line<'a>(line: &'a str, options: &ParseOptions) -> Line<'a> {
    if line.trim().is_empty() {
        return Line::Blank;
    }

    if options.is_comment(line) {
        return Line::Comment;
    }

    match parse_line(line, options) {
        Some(property) => Line::Property(property),
        None => Line::Malformed,
    }
}

/// Split a line on the first `=` and the key on its last `.`.
///
/// Returns `None` when there is no `=`, the key is empty, or the name part
/// of a qualified key is empty.
pub fn parse_line<'a>(line: &'a str, options: &ParseOptions) -> Option<PropertyLine<'a>> {
    let (key, value) = options.clean(line).split_once('=')?;

    let key = options.clean(key);
    if key.is_empty() {
        return None;
    }

    let (module, name) = parse_property_name(key)?;

    Some(PropertyLine {
        module: options.clean(module),
        name: options.clean(name),
        value: options.clean(value),
    })
}

/// Split a qualified name on its last `.` into `(module, name)`.
///
/// Without a `.` the module is empty and the whole string is the name.
/// Returns `None` if the name part is empty.
pub fn parse_property_name(fullname: &str) -> Option<(&str, &str)> {
    let (module, name) = match fullname.rsplit_once('.') {
        Some((module, name)) => (module, name),
        None => ("", fullname),
    };

    if name.is_empty() {
        None
    } else {
        Some((module, name))
    }
}
