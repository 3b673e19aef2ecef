use parley_types::{EdgeId, NodeId, ParseIdError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which end of an edge a token refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Parent,
    Child,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("PARENT"),
            Self::Child => f.write_str("CHILD"),
        }
    }
}

/// Problem found while loading an answer graph.
///
/// None of these abort a load on their own; they are collected into a
/// [`LoadReport`]. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    #[error("line {line}: ID missing, line is ignored")]
    MissingId { line: usize },

    #[error("line {line}: {source}, line is ignored")]
    InvalidId {
        line: usize,
        #[source]
        source: ParseIdError,
    },

    #[error("line {line}: unknown record type '{kind}'")]
    UnknownType { line: usize, kind: String },

    #[error("line {line}: {id} already defined, redefinition ignored")]
    DuplicateNode { line: usize, id: NodeId },

    #[error("line {line}: {id} has no {endpoint} token, edge dropped")]
    MissingEndpoint {
        line: usize,
        id: EdgeId,
        endpoint: Endpoint,
    },

    #[error("line {line}: {id} has an invalid {endpoint}: {source}, edge dropped")]
    InvalidEndpoint {
        line: usize,
        id: EdgeId,
        endpoint: Endpoint,
        #[source]
        source: ParseIdError,
    },

    #[error("line {line}: {id} references unknown {endpoint} {node}, edge dropped")]
    UnresolvedEndpoint {
        line: usize,
        id: EdgeId,
        endpoint: Endpoint,
        node: NodeId,
    },

    #[error("multiple root nodes detected ({}), using {chosen}", format_ids(.candidates))]
    MultipleRoots {
        candidates: Vec<NodeId>,
        chosen: NodeId,
    },
}

fn format_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl LoadIssue {
    /// Source line the issue was found on, if it belongs to one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingId { line }
            | Self::InvalidId { line, .. }
            | Self::UnknownType { line, .. }
            | Self::DuplicateNode { line, .. }
            | Self::MissingEndpoint { line, .. }
            | Self::InvalidEndpoint { line, .. }
            | Self::UnresolvedEndpoint { line, .. } => Some(*line),
            Self::MultipleRoots { .. } => None,
        }
    }

    /// Whether the record on this line was discarded
    pub fn drops_record(&self) -> bool {
        !matches!(self, Self::MultipleRoots { .. } | Self::DuplicateNode { .. })
    }
}

/// Everything that went wrong during a load, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    issues: Vec<LoadIssue>,
}

impl LoadReport {
    pub(crate) fn push(&mut self, issue: LoadIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[LoadIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// No issue of any kind was found
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_multiple_roots(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, LoadIssue::MultipleRoots { .. }))
    }

    /// Line numbers whose records were dropped
    pub fn dropped_lines(&self) -> Vec<usize> {
        self.issues
            .iter()
            .filter(|issue| issue.drops_record())
            .filter_map(LoadIssue::line)
            .collect()
    }
}

impl<'a> IntoIterator for &'a LoadReport {
    type Item = &'a LoadIssue;
    type IntoIter = std::slice::Iter<'a, LoadIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not open graph file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("graph has no root node ({} load issues)", .report.len())]
    NoRoot { report: LoadReport },
}

impl LoadError {
    /// Issues collected before the load failed, if any
    pub fn report(&self) -> Option<&LoadReport> {
        match self {
            Self::NoRoot { report } => Some(report),
            Self::Io { .. } => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot start a conversation: graph has no root node")]
    NoRoot,
}
