//! Graph description parsing.
//!
//! One node per non-blank line, in either form:
//!
//! ```text
//! AA rate=0; tunnels to DD, II, BB
//! Valve HH has flow rate=22; tunnel leads to valve GG
//! ```
//!
//! Node ids are assigned in line order. Neighbor order is preserved.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use flowline_kernel::carrier::graph::{GraphError, GraphV1, NodeRecordV1};

/// Puzzle form (`vid`, `vrate`) or compact form (`id`, `rate`), then an
/// optional whitespace-separated neighbor list. `valve(s)` is only a keyword
/// in the puzzle form.
const LINE_PATTERN: &str = concat!(
    r"^\s*(?:",
    r"Valve\s+(?P<vid>[^\s;,=]+)\s+has\s+flow\s+rate=(?P<vrate>\d+)\s*;\s*tunnels?\s+leads?\s+to\s+valves?",
    r"|",
    r"(?P<id>[^\s;,=]+)\s+rate=(?P<rate>\d+)\s*;\s*tunnels?\s+to",
    r")(?:\s+(?P<neighbors>.*?))?\s*$",
);

/// A line that does not match the node grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number.
    pub line_number: usize,
    /// The offending line, verbatim.
    pub line: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: malformed node record: {:?}", self.line_number, self.line)
    }
}

impl std::error::Error for ParseError {}

/// Failure to load a graph description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Parse(ParseError),
    /// A neighbor or start id names no node. `line_number` is the line of the
    /// referencing record, when there is one.
    Reference {
        id: String,
        line_number: Option<usize>,
    },
    /// Two records share an id.
    Duplicate { id: String, line_number: usize },
    /// The graph exceeds the supported node count.
    TooLarge { count: usize },
    Io { path: String, detail: String },
    /// The line grammar failed to compile.
    Pattern { detail: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Reference {
                id,
                line_number: Some(n),
            } => write!(f, "line {n}: reference to undefined node {id}"),
            Self::Reference {
                id,
                line_number: None,
            } => write!(f, "reference to undefined node {id}"),
            Self::Duplicate { id, line_number } => {
                write!(f, "line {line_number}: duplicate node id {id}")
            }
            Self::TooLarge { count } => write!(f, "graph has too many nodes: {count}"),
            Self::Io { path, detail } => write!(f, "cannot read {path}: {detail}"),
            Self::Pattern { detail } => write!(f, "invalid line grammar: {detail}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

fn line_regex() -> Result<&'static Regex, LoadError> {
    static LINE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    LINE.get_or_init(|| Regex::new(LINE_PATTERN))
        .as_ref()
        .map_err(|e| LoadError::Pattern {
            detail: e.to_string(),
        })
}

/// Parse one line into a node record.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the line does not match the grammar.
pub fn parse_line(line_number: usize, line: &str) -> Result<NodeRecordV1, LoadError> {
    let malformed = || {
        LoadError::Parse(ParseError {
            line_number,
            line: line.to_string(),
        })
    };
    let caps = line_regex()?.captures(line).ok_or_else(malformed)?;
    let label = caps
        .name("vid")
        .or_else(|| caps.name("id"))
        .ok_or_else(malformed)?;
    let rate = caps
        .name("vrate")
        .or_else(|| caps.name("rate"))
        .ok_or_else(malformed)?;

    let rate: u32 = rate.as_str().parse().map_err(|_| malformed())?;
    let neighbors_text = caps.name("neighbors").map_or("", |m| m.as_str().trim());
    let mut neighbors = Vec::new();
    if !neighbors_text.is_empty() {
        for token in neighbors_text.split(',') {
            let id = token.trim();
            if id.is_empty() || id.contains(char::is_whitespace) {
                return Err(malformed());
            }
            neighbors.push(id.to_string());
        }
    }

    Ok(NodeRecordV1 {
        label: label.as_str().to_string(),
        rate,
        neighbors,
    })
}

/// Parse a whole graph description. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] for the first malformed line,
/// [`LoadError::Duplicate`] for a repeated id, and [`LoadError::Reference`]
/// for a neighbor that names no node.
pub fn parse_graph(text: &str) -> Result<GraphV1, LoadError> {
    let mut records = Vec::new();
    let mut line_of: BTreeMap<String, usize> = BTreeMap::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_line(index + 1, line)?;
        if line_of.insert(record.label.clone(), index + 1).is_some() {
            return Err(LoadError::Duplicate {
                id: record.label,
                line_number: index + 1,
            });
        }
        records.push(record);
    }

    GraphV1::from_records(records).map_err(|err| match err {
        GraphError::UnknownNeighbor { node, neighbor } => LoadError::Reference {
            id: neighbor,
            line_number: line_of.get(&node).copied(),
        },
        GraphError::DuplicateNode { label } => LoadError::Duplicate {
            line_number: line_of.get(&label).copied().unwrap_or_default(),
            id: label,
        },
        GraphError::TooManyNodes { count } => LoadError::TooLarge { count },
    })
}

/// Read and parse a graph description file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise as
/// [`parse_graph`].
pub fn load_graph_file(path: &Path) -> Result<GraphV1, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    parse_graph(&text)
}
