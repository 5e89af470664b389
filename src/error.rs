//! Unified error type for store, API and configuration.

/// Things that can go wrong when working with the item store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system problem (read, write, rename).
    Io(String),
    /// Failed to serialize the item list to bytes.
    Serialize(String),
    /// Failed to deserialize bytes back into an item list.
    Deserialize(String),
    /// Bad configuration (bind address, path, etc.).
    Config(String),
    /// A required field was missing, blank or out of range.
    Validation(String),
    /// No item carries this id.
    NotFound(u64),
    /// The largest stored id is `u64::MAX`, so no new id can be handed out.
    IdsExhausted,
}

impl Error {
    /// `true` for errors caused by the caller's input rather than the store.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::Deserialize(msg) => write!(f, "deserialization error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Validation(msg) => write!(f, "validation error: {msg}"),
            Error::NotFound(id) => write!(f, "item {id} not found"),
            Error::IdsExhausted => write!(f, "no item id left above {}", u64::MAX),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() || err.is_data() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
