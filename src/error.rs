use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while working with a deck or driving a session.
///
/// None of these end the session on their own; the driver reports them and
/// carries on with the next prompt.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no card with {field} \"{value}\"")]
    NotFound { field: &'static str, value: String },

    #[error("duplicate term or definition: (\"{term}\":\"{definition}\")")]
    DuplicateKey { term: String, definition: String },

    #[error("there are no flashcards in the deck")]
    EmptyDeck,

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("file {} is unavailable: {source}", .path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown action \"{0}\"")]
    UnknownCommand(String),

    #[error("input stream closed")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn term_not_found(term: &str) -> Self {
        Error::NotFound {
            field: "term",
            value: term.to_string(),
        }
    }

    pub(crate) fn definition_not_found(definition: &str) -> Self {
        Error::NotFound {
            field: "definition",
            value: definition.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::term_not_found("France");
        assert_eq!(err.to_string(), "no card with term \"France\"");
    }

    #[test]
    fn test_json_error_is_malformed_input() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_file_unavailable_keeps_source() {
        use std::error::Error as _;

        let err = Error::FileUnavailable {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.json"));
        assert!(err.source().is_some());
    }
}
