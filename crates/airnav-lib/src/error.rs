use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the airnav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A data file could not be opened or read. Aborts the whole load.
    #[error("failed to read data file {path}: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the airnav data directory")]
    ProjectDirsUnavailable,

    /// Raised when adding a node whose key is already present.
    #[error("node {key} already exists")]
    DuplicateNode { key: String },

    /// Raised when a node name or key could not be found in the graph.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when adding an airport whose code is already present.
    #[error("airport {name} already exists")]
    DuplicateAirport { name: String },

    /// Raised when a routing algorithm name is not recognised.
    #[error("unknown routing algorithm: {name}; expected dijkstra or a-star")]
    UnknownAlgorithm { name: String },

    /// Raised when no route could be found between two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when attempting to summarise a route plan with no steps.
    #[error("route plan contained no steps")]
    EmptyRoutePlan,

    /// Raised when a name cannot be written as a single dump token.
    #[error("name {name:?} cannot be written to a graph dump")]
    UnwritableName { name: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unknown_node(name: impl ToString) -> Self {
        Error::UnknownNode {
            name: name.to_string(),
            suggestions: Vec::new(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_lists_suggestions() {
        let err = Error::UnknownNode {
            name: "GODX".to_string(),
            suggestions: vec!["GODOX".to_string()],
        };
        assert_eq!(err.to_string(), "unknown node: GODX. Did you mean 'GODOX'?");

        let err = Error::UnknownNode {
            name: "LEB".to_string(),
            suggestions: vec!["LEBL".to_string(), "LERS".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown node: LEB. Did you mean one of: 'LEBL', 'LERS'?"
        );
    }

    #[test]
    fn unknown_node_without_suggestions_is_plain() {
        assert_eq!(Error::unknown_node(42).to_string(), "unknown node: 42");
    }
}
