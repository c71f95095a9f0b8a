use thiserror::Error;

/// Convenient result alias for the Tokyo Metro library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a station display name could not be found in the name table.
    #[error("unknown station name: {name}{}", format_suggestions(.suggestions))]
    UnknownStation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a query references a node code absent from the network.
    #[error("unknown node: {code}")]
    UnknownNode { code: String },

    /// Raised when path-adjacent nodes turn out to have no link between them.
    /// Indicates a corrupt network; fatal to the current query.
    #[error("no link between {from} and {to}")]
    EdgeNotFound { from: String, to: String },

    /// Raised when the destination is unreachable from the source. A normal
    /// negative result, not a crash.
    #[error("no path found between {start} and {goal}")]
    NoPathFound { start: String, goal: String },

    /// Raised when a grand-tour target is cut off from the rest of the
    /// required set.
    #[error("grand tour target {code} is unreachable from {from}")]
    DisconnectedTour { code: String, from: String },

    /// Raised at load time when the network artifact has no nodes or links.
    #[error("network is empty; check the network artifact")]
    EmptyNetwork,

    /// Raised when a computed path lacks any nodes.
    #[error("route was empty")]
    EmptyRoute,

    /// Raised when a node code does not parse as a line letter plus index.
    #[error("malformed node code: {code}")]
    MalformedNodeCode { code: String },

    /// Raised when a link in the artifact fails validation.
    #[error("invalid link {from} -> {to}: {message}")]
    InvalidLink {
        from: String,
        to: String,
        message: String,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
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
