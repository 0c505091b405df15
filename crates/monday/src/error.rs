use monday_core::DecodeError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Network failure or non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered a well-formed request with errors.
    #[error("monday API error: {}", .0.join("; "))]
    RemoteOperation(Vec<String>),

    /// Column values could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid item id {0:?}: must be numeric")]
    InvalidItemId(String),

    /// A board handed to a decoded read carries an id that is not numeric.
    #[error("Invalid board id {0:?}: must be numeric")]
    InvalidBoardId(String),

    #[error("Board {0} not found")]
    BoardNotFound(u64),

    /// The response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
