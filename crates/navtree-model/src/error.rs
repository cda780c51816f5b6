//! Construction errors.

/// Error returned when input cannot form a well-formed forest.
///
/// Construction is all-or-nothing: no partial forest is produced when any
/// entry is rejected.
#[derive(Debug, thiserror::Error)]
pub enum MalformedTreeError {
    /// Input is not valid JSON once the script wrapper is removed.
    #[error("Syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Script wrapper around the array could not be understood.
    #[error("Invalid assignment: {0}")]
    InvalidWrapper(String),

    /// Top-level value is not an array.
    #[error("Expected a top-level array, found {found}")]
    NotAnArray {
        /// JSON type found instead.
        found: &'static str,
    },

    /// Entry is not a `[label, link, children]` tuple.
    #[error("Invalid entry at {path}: {reason}")]
    InvalidEntry {
        /// Index path of the entry (e.g. `[3][1]`).
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Label is not a string.
    #[error("Invalid label at {path}: expected string, found {found}")]
    InvalidLabel {
        /// Index path of the entry.
        path: String,
        /// JSON type found instead.
        found: &'static str,
    },

    /// Link is neither a string nor null.
    #[error("Invalid link for '{label}': expected string or null, found {found}")]
    InvalidLink {
        /// Label of the offending node.
        label: String,
        /// JSON type found instead.
        found: &'static str,
    },

    /// Children field is neither an array nor null.
    #[error("Invalid children for '{label}': expected array or null, found {found}")]
    InvalidChildren {
        /// Label of the offending node.
        label: String,
        /// JSON type found instead.
        found: &'static str,
    },

    /// A node is its own ancestor.
    #[error("Cycle detected: '{label}' is its own ancestor ({})", .ancestors.join(" > "))]
    Cycle {
        /// Label of the node that closes the cycle.
        label: String,
        /// Labels on the path from the root to the node's parent.
        ancestors: Vec<String>,
    },

    /// Builder was given a node id it never issued.
    #[error("Unknown node id: {0}")]
    UnknownNode(usize),
}
