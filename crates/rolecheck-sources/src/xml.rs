//! Authoritative roles from XML
//!
//! Roles are selected with a small path language modelled on XPath:
//!
//! ```text
//! //role/text()          text nodes directly under any <role>
//! /company/roles/role    full text content of each matching <role>
//! //department/*/text()  text of any child element of <department>
//! ```
//!
//! `/` steps to a child, `//` to any descendant and `*` matches any element.
//! A trailing `text()` selects each direct text node; without it the whole
//! text content of the element is selected. Names compare by local name, so
//! namespace prefixes are ignored. Predicates and attributes are not
//! supported.
//!
//! Every selected string is trimmed and blank ones are dropped.

use crate::error::SourceError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Path selecting every `role` element's text
pub const DEFAULT_ROLE_PATH: &str = "//role/text()";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Name(String),
}

impl NameTest {
    fn matches(&self, name: &str) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::Name(expected) => expected == name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
}

/// A parsed role path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePath {
    expression: String,
    steps: Vec<Step>,
    text_nodes: bool,
}

impl RolePath {
    /// Parse a path expression
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidPath`] for relative paths, empty steps,
    /// predicates or a misplaced `text()`.
    pub fn parse(expression: &str) -> Result<Self, SourceError> {
        let invalid = |reason: &str| SourceError::InvalidPath {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let mut rest = expression.trim();
        if !rest.starts_with('/') {
            return Err(invalid("must start with '/' or '//'"));
        }

        let mut steps = Vec::new();
        let mut text_nodes = false;

        while !rest.is_empty() {
            if text_nodes {
                return Err(invalid("text() must be the last step"));
            }

            let axis = if let Some(after) = rest.strip_prefix("//") {
                rest = after;
                Axis::Descendant
            } else if let Some(after) = rest.strip_prefix('/') {
                rest = after;
                Axis::Child
            } else {
                return Err(invalid("expected '/'"));
            };

            let end = rest.find('/').unwrap_or(rest.len());
            let name = &rest[..end];
            rest = &rest[end..];

            match name {
                "" => return Err(invalid("empty step")),
                "text()" => {
                    if axis == Axis::Descendant {
                        return Err(invalid("text() must follow '/'"));
                    }
                    if steps.is_empty() {
                        return Err(invalid("text() needs an element step before it"));
                    }
                    text_nodes = true;
                }
                "*" => steps.push(Step {
                    axis,
                    test: NameTest::Any,
                }),
                _ if name.chars().all(is_name_char) => steps.push(Step {
                    axis,
                    test: NameTest::Name(local_part(name).to_string()),
                }),
                _ => return Err(invalid("only element names, '*' and text() are supported")),
            }
        }

        if steps.is_empty() {
            return Err(invalid("no element steps"));
        }

        Ok(Self {
            expression: expression.trim().to_string(),
            steps,
            text_nodes,
        })
    }

    /// The expression as parsed
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    fn matches(&self, open_elements: &[String]) -> bool {
        matches_steps(&self.steps, open_elements)
    }
}

impl Default for RolePath {
    fn default() -> Self {
        Self {
            expression: DEFAULT_ROLE_PATH.to_string(),
            steps: vec![Step {
                axis: Axis::Descendant,
                test: NameTest::Name("role".to_string()),
            }],
            text_nodes: true,
        }
    }
}

impl FromStr for RolePath {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RolePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

fn local_part(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

// `open_elements` is the stack of element names from the root down.
fn matches_steps(steps: &[Step], open_elements: &[String]) -> bool {
    let Some((step, rest)) = steps.split_first() else {
        return open_elements.is_empty();
    };

    match step.axis {
        Axis::Child => match open_elements.split_first() {
            Some((name, below)) => step.test.matches(name) && matches_steps(rest, below),
            None => false,
        },
        Axis::Descendant => (0..open_elements.len()).any(|i| {
            step.test.matches(&open_elements[i]) && matches_steps(rest, &open_elements[i + 1..])
        }),
    }
}

/// Select roles from an XML string
///
/// # Errors
///
/// Returns [`SourceError::Xml`] when the document is malformed.
pub fn roles_from_str(xml: &str, path: &RolePath) -> Result<Vec<String>, SourceError> {
    let mut reader = Reader::from_str(xml);
    let mut open_elements: Vec<String> = Vec::new();
    // (depth, buffer) for each selected element still open
    let mut captures: Vec<(usize, String)> = Vec::new();
    let mut roles = Vec::new();

    let xml_error = |e: &dyn fmt::Display, position: usize| {
        SourceError::Xml(format!("{} at byte {}", e, position))
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                open_elements.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                if !path.text_nodes && path.matches(&open_elements) {
                    captures.push((open_elements.len(), String::new()));
                }
            }
            Ok(Event::Empty(_)) => {}
            Ok(Event::End(_)) => {
                let depth = open_elements.len();
                if let Some((_, text)) = captures.pop_if(|(open_depth, _)| *open_depth == depth) {
                    push_role(&mut roles, &text);
                }
                open_elements.pop();
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| xml_error(&err, reader.buffer_position()))?;
                collect_text(path, &open_elements, &mut captures, &mut roles, &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e);
                collect_text(path, &open_elements, &mut captures, &mut roles, &text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(&e, reader.buffer_position())),
        }
    }

    if let Some(unclosed) = open_elements.last() {
        return Err(SourceError::Xml(format!(
            "unexpected end of document inside <{}>",
            unclosed
        )));
    }

    Ok(roles)
}

fn collect_text(
    path: &RolePath,
    open_elements: &[String],
    captures: &mut [(usize, String)],
    roles: &mut Vec<String>,
    text: &str,
) {
    if path.text_nodes {
        if path.matches(open_elements) {
            push_role(roles, text);
        }
    } else {
        for (_, buffer) in captures.iter_mut() {
            buffer.push_str(text);
        }
    }
}

fn push_role(roles: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        roles.push(trimmed.to_string());
    }
}

/// Read the roles selected by `path` from an XML file, in document order
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or malformed.
pub fn try_extract_roles(file: &Path, path: &RolePath) -> Result<Vec<String>, SourceError> {
    if !file.exists() {
        return Err(SourceError::NotFound(file.to_path_buf()));
    }

    let content = fs::read_to_string(file).map_err(|source| SourceError::Io {
        path: file.to_path_buf(),
        source,
    })?;

    let roles = roles_from_str(&content, path)?;
    debug!("Selected {} roles with '{}'", roles.len(), path);
    Ok(roles)
}

/// Read the roles selected by `path` from an XML file
///
/// Missing or malformed files are logged and yield no roles.
pub fn extract_roles(file: &Path, path: &RolePath) -> Vec<String> {
    match try_extract_roles(file, path) {
        Ok(roles) => {
            info!("Found {} roles in {}", roles.len(), file.display());
            roles
        }
        Err(e) => {
            warn!("{}; continuing with no authoritative roles", e);
            Vec::new()
        }
    }
}
